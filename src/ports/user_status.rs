use crate::domain::value_objects::UserId;
use async_trait::async_trait;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// 利用者ステータスポート
///
/// 貸出コンテキストと利用者アカウントコンテキストの境界を維持する。
/// 貸出コンテキストはUserIDのみを知り、アカウントの詳細は知らない。
#[async_trait]
pub trait UserStatusProvider: Send + Sync {
    /// 利用者のアカウントが有効か確認する
    ///
    /// ビジネスルール: 有効でない利用者には貸し出せない。
    /// 在庫確認より先に呼ばれる。
    async fn is_user_active(&self, user_id: &UserId) -> Result<bool>;
}
