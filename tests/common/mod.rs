#![allow(dead_code)]

use async_trait::async_trait;
use library_lending::domain::{BookId, UserId};
use library_lending::ports::{NotificationSink, UserStatusProvider, notification_sink, user_status};
use std::collections::HashSet;
use std::sync::Mutex;

// ============================================================================
// テスト用ダブル
// ============================================================================

/// 有効な利用者を登録できるUserStatusProvider
pub struct StubUserStatus {
    active_users: Mutex<HashSet<UserId>>,
    calls: Mutex<usize>,
}

impl StubUserStatus {
    pub fn new() -> Self {
        Self {
            active_users: Mutex::new(HashSet::new()),
            calls: Mutex::new(0),
        }
    }

    pub fn activate(&self, user_id: &UserId) {
        self.active_users.lock().unwrap().insert(user_id.clone());
    }

    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl UserStatusProvider for StubUserStatus {
    async fn is_user_active(&self, user_id: &UserId) -> user_status::Result<bool> {
        *self.calls.lock().unwrap() += 1;
        Ok(self.active_users.lock().unwrap().contains(user_id))
    }
}

/// 常に失敗するUserStatusProvider
pub struct FailingUserStatus;

#[async_trait]
impl UserStatusProvider for FailingUserStatus {
    async fn is_user_active(&self, _user_id: &UserId) -> user_status::Result<bool> {
        Err("user directory unavailable".into())
    }
}

/// 送信内容を記録するNotificationSink
pub struct RecordingNotificationSink {
    sent: Mutex<Vec<(UserId, String)>>,
}

impl RecordingNotificationSink {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn sent(&self) -> Vec<(UserId, String)> {
        self.sent.lock().unwrap().clone()
    }

    /// 指定した利用者・メッセージの送信回数
    pub fn count(&self, user_id: &UserId, message: &str) -> usize {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .filter(|(u, m)| u == user_id && m == message)
            .count()
    }

    pub fn count_for(&self, user_id: &UserId) -> usize {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .filter(|(u, _)| u == user_id)
            .count()
    }
}

#[async_trait]
impl NotificationSink for RecordingNotificationSink {
    async fn notify_user(
        &self,
        user_id: &UserId,
        message: &str,
    ) -> notification_sink::Result<()> {
        self.sent
            .lock()
            .unwrap()
            .push((user_id.clone(), message.to_string()));
        Ok(())
    }
}

/// 常に失敗するNotificationSink
pub struct FailingNotificationSink;

#[async_trait]
impl NotificationSink for FailingNotificationSink {
    async fn notify_user(
        &self,
        _user_id: &UserId,
        _message: &str,
    ) -> notification_sink::Result<()> {
        Err("smtp down".into())
    }
}

pub fn book(id: &str) -> BookId {
    BookId::new(id).unwrap()
}

pub fn user(id: &str) -> UserId {
    UserId::new(id).unwrap()
}
