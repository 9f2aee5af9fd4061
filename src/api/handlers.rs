use crate::application::lending::LendingManager;
use crate::domain::{BookId, UserId};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use std::sync::Arc;

use super::{
    error::ApiError,
    types::{
        AddBookRequest, BookResponse, LateFeeQuery, LateFeeResponse, LoanOutcomeResponse,
        LoanRequest,
    },
};

// ============================================================================
// State
// ============================================================================

/// ハンドラー間で共有されるアプリケーション状態
pub struct AppState {
    pub manager: LendingManager,
}

// ============================================================================
// Command handlers (POST)
// ============================================================================

/// POST /books - 書籍を在庫に追加
///
/// 未登録なら新規登録、登録済みなら冊数を加算する。
pub async fn add_book(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AddBookRequest>,
) -> Result<(StatusCode, Json<BookResponse>), ApiError> {
    let book_id = BookId::new(req.book_id)?;

    let available = state.manager.add_book(&book_id, req.copies)?;
    let borrowers = state.manager.borrowers_of(&book_id);

    Ok((
        StatusCode::CREATED,
        Json(BookResponse::new(&book_id, available, borrowers)),
    ))
}

/// POST /books/:id/borrow - 書籍を貸出
///
/// 強制されるビジネスルール:
/// - 利用者が有効であること（在庫より先に確認）
/// - 貸出可能な在庫があること
pub async fn borrow_book(
    State(state): State<Arc<AppState>>,
    Path(book_id): Path<String>,
    Json(req): Json<LoanRequest>,
) -> Result<Json<LoanOutcomeResponse>, ApiError> {
    let book_id = BookId::new(book_id)?;
    let user_id = UserId::new(req.user_id)?;

    let outcome = state.manager.borrow_with_outcome(&book_id, &user_id).await?;

    Ok(Json(LoanOutcomeResponse::new(book_id, user_id, outcome)))
}

/// POST /books/:id/return - 書籍を返却
///
/// 強制されるビジネスルール:
/// - 返却者がその書籍を借りていること
pub async fn return_book(
    State(state): State<Arc<AppState>>,
    Path(book_id): Path<String>,
    Json(req): Json<LoanRequest>,
) -> Result<Json<LoanOutcomeResponse>, ApiError> {
    let book_id = BookId::new(book_id)?;
    let user_id = UserId::new(req.user_id)?;

    let outcome = state.manager.return_with_outcome(&book_id, &user_id).await?;

    Ok(Json(LoanOutcomeResponse::new(book_id, user_id, outcome)))
}

// ============================================================================
// Query handlers (GET)
// ============================================================================

/// GET /books/:id - 在庫と貸出中の利用者を取得
///
/// 未登録の書籍は在庫0として返す（404にはしない）。
pub async fn get_book(
    State(state): State<Arc<AppState>>,
    Path(book_id): Path<String>,
) -> Result<Json<BookResponse>, ApiError> {
    let book_id = BookId::new(book_id)?;

    let available = state.manager.get_available_copies(&book_id);
    let borrowers = state.manager.borrowers_of(&book_id);

    Ok(Json(BookResponse::new(&book_id, available, borrowers)))
}

/// GET /late-fee - 延滞料金を計算
///
/// クエリパラメータ:
/// - overdue_days: 延滞日数（必須、0以上）
/// - bestseller: ベストセラーか（オプション）
/// - premium: プレミアム会員か（オプション）
pub async fn late_fee(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LateFeeQuery>,
) -> Result<Json<LateFeeResponse>, ApiError> {
    let fee = state.manager.calculate_dynamic_late_fee(
        query.overdue_days,
        query.bestseller,
        query.premium,
    )?;

    Ok(Json(LateFeeResponse::new(&query, fee)))
}
