use crate::domain::value_objects::UserId;
use crate::ports::notification_sink::{NotificationSink as NotificationSinkTrait, Result};
use async_trait::async_trait;
use std::sync::{Mutex, PoisonError};

/// 送信済み通知
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentNotification {
    pub user_id: UserId,
    pub message: String,
}

/// Mock implementation of NotificationSink
///
/// Does not deliver anything. Every message is logged and kept in memory
/// so tests can assert on what would have been sent.
pub struct NotificationSink {
    sent: Mutex<Vec<SentNotification>>,
}

impl NotificationSink {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
        }
    }

    /// Notifications sent so far, oldest first
    pub fn sent(&self) -> Vec<SentNotification> {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Default for NotificationSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NotificationSinkTrait for NotificationSink {
    async fn notify_user(&self, user_id: &UserId, message: &str) -> Result<()> {
        tracing::info!(%user_id, text = message, "notification sent");
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(SentNotification {
                user_id: user_id.clone(),
                message: message.to_string(),
            });
        Ok(())
    }
}
