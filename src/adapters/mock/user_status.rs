use crate::domain::value_objects::UserId;
use crate::ports::user_status::{Result, UserStatusProvider};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

/// UserStatusProviderのインメモリ実装
///
/// 有効な利用者IDを保存することで状態を持ったテストをサポート。
/// 登録されていない利用者は非アクティブとして扱う。
pub struct UserStatusService {
    active_users: Mutex<HashSet<UserId>>,
}

impl UserStatusService {
    pub fn new() -> Self {
        Self {
            active_users: Mutex::new(HashSet::new()),
        }
    }

    pub fn with_active_users(users: impl IntoIterator<Item = UserId>) -> Self {
        Self {
            active_users: Mutex::new(users.into_iter().collect()),
        }
    }

    /// 利用者を有効にする
    pub fn activate(&self, user_id: UserId) {
        self.users().insert(user_id);
    }

    /// 利用者を無効にする
    pub fn deactivate(&self, user_id: &UserId) {
        self.users().remove(user_id);
    }

    fn users(&self) -> std::sync::MutexGuard<'_, HashSet<UserId>> {
        self.active_users
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for UserStatusService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserStatusProvider for UserStatusService {
    async fn is_user_active(&self, user_id: &UserId) -> Result<bool> {
        Ok(self.users().contains(user_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unknown_user_is_inactive() {
        let service = UserStatusService::new();
        let user = UserId::new("ghost").unwrap();
        assert!(!service.is_user_active(&user).await.unwrap());
    }

    #[tokio::test]
    async fn test_activate_and_deactivate() {
        let service = UserStatusService::new();
        let user = UserId::new("anna").unwrap();

        service.activate(user.clone());
        assert!(service.is_user_active(&user).await.unwrap());

        service.deactivate(&user);
        assert!(!service.is_user_active(&user).await.unwrap());
    }
}
