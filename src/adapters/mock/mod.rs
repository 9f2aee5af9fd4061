pub mod notification_sink;
pub mod user_status;

pub use notification_sink::{NotificationSink, SentNotification};
pub use user_status::UserStatusService;
