use crate::domain::value_objects::UserId;
use async_trait::async_trait;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// 通知ポート
///
/// 利用者への通知配信メカニズムを抽象化する。
/// 実装はメール、SMS、プッシュ通知などが考えられる。
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// 利用者にメッセージを送信する
    ///
    /// 送りっぱなし（fire-and-forget）。呼び出し側は失敗をログに残すだけで、
    /// 貸出・返却の結果には影響させない。
    async fn notify_user(&self, user_id: &UserId, message: &str) -> Result<()>;
}
