//! API Module
//!
//! HTTP surface of the bot: webhook ingestion and health checks.

mod handlers;
mod routes;

pub use handlers::{health_handler, webhook_handler, AppState, HealthResponse};
pub use routes::create_router;
