use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::handlers::{AppState, add_book, borrow_book, get_book, late_fee, return_book};

/// Creates the API router with all lending endpoints
///
/// Command endpoints (Write operations):
/// - POST /books - Add copies of a book
/// - POST /books/:id/borrow - Borrow a copy
/// - POST /books/:id/return - Return a copy
///
/// Query endpoints (Read operations):
/// - GET /books/:id - Available copies and current borrowers
/// - GET /late-fee - Late fee calculation
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check endpoint
        .route("/health", get(health_check))
        // Command endpoints (Write operations)
        .route("/books", post(add_book))
        .route("/books/:id/borrow", post(borrow_book))
        .route("/books/:id/return", post(return_book))
        // Query endpoints (Read operations)
        .route("/books/:id", get(get_book))
        .route("/late-fee", get(late_fee))
        // Add tracing middleware
        .layer(TraceLayer::new_for_http())
        // Add application state
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
