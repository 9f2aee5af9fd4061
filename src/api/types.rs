use serde::{Deserialize, Serialize};

use crate::application::lending::LoanOutcome;
use crate::domain::{BookId, LateFee, UserId};

/// 書籍追加リクエスト（POST /books）
#[derive(Debug, Serialize, Deserialize)]
pub struct AddBookRequest {
    pub book_id: String,
    pub copies: i64,
}

/// 貸出・返却リクエスト（POST /books/:id/borrow, /books/:id/return）
#[derive(Debug, Serialize, Deserialize)]
pub struct LoanRequest {
    pub user_id: String,
}

/// 延滞料金のクエリパラメータ（GET /late-fee）
#[derive(Debug, Deserialize)]
pub struct LateFeeQuery {
    pub overdue_days: i64,
    #[serde(default)]
    pub bestseller: bool,
    #[serde(default)]
    pub premium: bool,
}

/// 書籍の在庫レスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct BookResponse {
    pub book_id: String,
    pub available_copies: u32,
    pub borrowers: Vec<String>,
}

impl BookResponse {
    pub fn new(book_id: &BookId, available_copies: u32, borrowers: Vec<UserId>) -> Self {
        Self {
            book_id: book_id.to_string(),
            available_copies,
            borrowers: borrowers.into_iter().map(String::from).collect(),
        }
    }
}

/// 貸出・返却の結果レスポンス
///
/// 業務ルールによる拒否は`success: false`で返す（HTTPエラーではない）。
#[derive(Debug, Serialize, Deserialize)]
pub struct LoanOutcomeResponse {
    pub book_id: String,
    pub user_id: String,
    pub success: bool,
    pub available_copies: u32,
}

impl LoanOutcomeResponse {
    pub fn new(book_id: BookId, user_id: UserId, outcome: LoanOutcome) -> Self {
        Self {
            book_id: book_id.into(),
            user_id: user_id.into(),
            success: outcome.success,
            available_copies: outcome.available_copies,
        }
    }
}

/// 延滞料金レスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct LateFeeResponse {
    pub overdue_days: i64,
    pub bestseller: bool,
    pub premium: bool,
    pub fee: f64,
}

impl LateFeeResponse {
    pub fn new(query: &LateFeeQuery, fee: LateFee) -> Self {
        Self {
            overdue_days: query.overdue_days,
            bestseller: query.bestseller,
            premium: query.premium,
            fee: fee.as_f64(),
        }
    }
}

/// エラーレスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }
}
