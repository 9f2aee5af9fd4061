pub mod notification_sink;
pub mod user_status;

pub use notification_sink::NotificationSink;
pub use user_status::UserStatusProvider;
