use thiserror::Error;

use crate::domain::DomainError;

/// 貸出管理アプリケーション層のエラー
///
/// 業務ルールによる拒否（非アクティブ会員・在庫切れ・借主不一致）は
/// ここに含まれない。それらは `Ok(false)` として返る。
#[derive(Debug, Error)]
pub enum LendingError {
    /// 不正な引数（負の延滞日数・負の冊数など）
    #[error(transparent)]
    InvalidArgument(#[from] DomainError),

    /// UserStatusProviderのエラー
    #[error("User status service error")]
    UserStatusError(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// アプリケーション層の Result型
pub type Result<T> = std::result::Result<T, LendingError>;
