//! Configuration Module
//!
//! Handles loading and managing bot configuration from environment variables.

use std::env;
use std::time::Duration;

use crate::error::{BotError, Result};

/// Bot configuration parameters.
///
/// Loaded once at startup; everything except the token and webhook host has a
/// sensible default. TLS is expected to terminate at a fronting proxy, so the
/// server itself listens on plain HTTP.
#[derive(Debug, Clone)]
pub struct Config {
    /// Telegram Bot API token
    pub token: String,
    /// Public hostname the webhook is registered under
    pub webhook_host: String,
    /// Listen port, also used in the registered webhook URL
    pub webhook_port: u16,
    /// Base URL of the web app opened from the inline keyboard
    pub webapp_url: String,
    /// Channel to gate on, `@`-prefixed
    pub channel_username: String,
    /// Whether channel subscription is required before opening the web app
    pub require_channel_sub: bool,
    /// TTL for remembered referral codes
    pub referral_max_age: Duration,
    /// Capacity of the referral cache
    pub referral_max_size: usize,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `TOKEN` - Telegram Bot API token (required)
    /// - `WEBHOOK_HOST` - public webhook hostname (required)
    /// - `WEBHOOK_PORT` - listen/webhook port (default: 8443)
    /// - `WEBAPP_URL` - web app base URL (default: https://app.example.com/)
    /// - `CHANNEL_USERNAME` - gated channel (default: @example_channel)
    /// - `REQUIRE_CHANNEL_SUB` - enable subscription gating (default: false)
    /// - `REFERRAL_MAX_AGE` - referral TTL in seconds (default: 600)
    /// - `REFERRAL_MAX_SIZE` - referral cache capacity (default: 10000)
    pub fn from_env() -> Result<Self> {
        let token = env::var("TOKEN")
            .map_err(|_| BotError::Config("TOKEN is not set".to_string()))?;
        let webhook_host = env::var("WEBHOOK_HOST")
            .map_err(|_| BotError::Config("WEBHOOK_HOST is not set".to_string()))?;

        Ok(Self {
            token,
            webhook_host,
            webhook_port: env::var("WEBHOOK_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8443),
            webapp_url: env::var("WEBAPP_URL")
                .unwrap_or_else(|_| "https://app.example.com/".to_string()),
            channel_username: env::var("CHANNEL_USERNAME")
                .unwrap_or_else(|_| "@example_channel".to_string()),
            require_channel_sub: env::var("REQUIRE_CHANNEL_SUB")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            referral_max_age: Duration::from_secs(
                env::var("REFERRAL_MAX_AGE")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(600),
            ),
            referral_max_size: env::var("REFERRAL_MAX_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10_000),
        })
    }

    /// The full URL registered with Telegram for webhook delivery.
    pub fn webhook_url(&self) -> String {
        format!(
            "https://{}:{}/webhook",
            self.webhook_host, self.webhook_port
        )
    }

    /// Channel username without the leading `@`, for t.me links.
    pub fn channel_link(&self) -> String {
        format!(
            "https://t.me/{}",
            self.channel_username.trim_start_matches('@')
        )
    }
}
