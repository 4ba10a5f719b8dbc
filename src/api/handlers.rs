//! API Handlers
//!
//! HTTP request handlers for the webhook and health endpoints.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use tracing::warn;

use crate::bot::handle_update;
use crate::cache::TimedCache;
use crate::config::Config;
use crate::telegram::{TelegramClient, Update};

/// Application state shared across all handlers.
///
/// Explicitly constructed at startup and injected by handle; there is no
/// process-wide singleton. The referral cache maps a user id to the referral
/// code it arrived with, for at most `referral_max_age`.
#[derive(Clone)]
pub struct AppState {
    /// Referral codes keyed by user id
    pub referrals: Arc<TimedCache<i64, String>>,
    /// Outbound Bot API client
    pub telegram: TelegramClient,
    /// Startup configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates application state around the given client.
    pub fn new(config: Config, telegram: TelegramClient) -> Self {
        Self {
            referrals: Arc::new(TimedCache::new(
                config.referral_max_age,
                config.referral_max_size,
            )),
            telegram,
            config: Arc::new(config),
        }
    }

    /// Creates application state from configuration, against the public
    /// Bot API.
    pub fn from_config(config: Config) -> Self {
        let telegram = TelegramClient::new(&config.token);
        Self::new(config, telegram)
    }

    /// Creates application state with the Bot API redirected to `base_url`.
    ///
    /// Used by tests to avoid real outbound traffic.
    pub fn with_telegram_base_url(config: Config, base_url: &str) -> Self {
        let telegram = TelegramClient::with_base_url(&config.token, base_url);
        Self::new(config, telegram)
    }
}

/// Handler for POST /webhook
///
/// Ingests one Telegram update. Handler failures are logged but the endpoint
/// still acknowledges with 200, otherwise Telegram keeps redelivering the
/// same update.
pub async fn webhook_handler(
    State(state): State<AppState>,
    Json(update): Json<Update>,
) -> StatusCode {
    let update_id = update.update_id;
    if let Err(err) = handle_update(&state, update).await {
        warn!(update_id, error = %err, "update handling failed");
    }
    StatusCode::OK
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Resident referral-cache entries
    pub referral_entries: usize,
    /// Referral-cache hits since startup
    pub cache_hits: u64,
    /// Referral-cache misses since startup
    pub cache_misses: u64,
}

/// Handler for GET /health
///
/// Returns liveness plus a referral-cache snapshot.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let stats = state.referrals.stats();
    Json(HealthResponse {
        status: "healthy".to_string(),
        referral_entries: stats.resident,
        cache_hits: stats.hits,
        cache_misses: stats.misses,
    })
}
