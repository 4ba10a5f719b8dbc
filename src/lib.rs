//! Referral Bot - Telegram webhook bot with a bounded TTL+LRU referral cache
//!
//! Remembers the referral code a user arrived with across stateless webhook
//! round trips, and gates the web app behind an optional channel-subscription
//! check.

pub mod api;
pub mod bot;
pub mod cache;
pub mod config;
pub mod error;
pub mod telegram;

pub use api::AppState;
pub use cache::TimedCache;
pub use config::Config;
