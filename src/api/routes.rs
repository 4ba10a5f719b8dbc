//! API Routes
//!
//! Configures the Axum router for webhook delivery and health checks.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use super::handlers::{health_handler, webhook_handler, AppState};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `POST /webhook` - Telegram update ingestion
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - Tracing: logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/webhook", post(webhook_handler))
        .route("/health", get(health_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
