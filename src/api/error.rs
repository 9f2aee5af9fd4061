use crate::application::lending::LendingError;
use crate::domain::DomainError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::types::ErrorResponse;

/// API層のエラー型
///
/// アプリケーション層のエラーをラップし、HTTPレスポンスへのマッピングを提供する。
#[derive(Debug)]
pub struct ApiError(LendingError);

impl From<LendingError> for ApiError {
    fn from(err: LendingError) -> Self {
        ApiError(err)
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        ApiError(LendingError::from(err))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self.0 {
            // 400 Bad Request - 不正な引数
            LendingError::InvalidArgument(ref e) => {
                (StatusCode::BAD_REQUEST, "INVALID_ARGUMENT", e.to_string())
            }

            // 500 Internal Server Error - 外部サービス障害
            // 内部エラーの詳細はログに記録し、クライアントには一般的なメッセージのみを返す
            LendingError::UserStatusError(ref e) => {
                tracing::error!("User status service error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "USER_STATUS_ERROR",
                    "User status service error".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse::new(error_type, message));
        (status, body).into_response()
    }
}
