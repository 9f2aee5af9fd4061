use super::BookId;

/// 非アクティブ会員への通知文
pub const ACCOUNT_NOT_ACTIVE: &str = "Your account is not active.";

/// 貸出確認の通知文
pub fn borrowed_message(book_id: &BookId) -> String {
    format!("You have borrowed the book: {}", book_id)
}

/// 返却確認の通知文
pub fn returned_message(book_id: &BookId) -> String {
    format!("You have returned the book: {}", book_id)
}
