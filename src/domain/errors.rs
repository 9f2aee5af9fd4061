use thiserror::Error;

/// ドメイン層のエラー（不正な引数）
///
/// 業務ルールによる拒否（在庫切れ・非アクティブ会員など）はエラーではなく
/// `false` として返すため、ここには含めない。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// 延滞日数が負
    #[error("Overdue days cannot be negative.")]
    NegativeOverdueDays,

    /// 追加冊数が負
    #[error("Copies cannot be negative.")]
    NegativeCopies,

    /// 在庫数が上限を超える
    #[error("Copies exceed the supported maximum.")]
    CopiesOverflow,

    #[error("Book id must not be empty.")]
    EmptyBookId,

    #[error("User id must not be empty.")]
    EmptyUserId,
}
