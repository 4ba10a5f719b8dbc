//! Error types for the bot
//!
//! Provides unified error handling using thiserror.
//!
//! Cache misses are deliberately not represented here: key absence is a
//! normal control-flow outcome (`Option`), never an error.

use thiserror::Error;

// == Bot Error Enum ==
/// Unified error type for the bot's outward-facing operations.
#[derive(Error, Debug)]
pub enum BotError {
    /// The Telegram Bot API rejected a request
    #[error("Telegram API error: {0}")]
    Api(String),

    /// Transport-level failure talking to the Telegram Bot API
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Missing or malformed configuration
    #[error("Invalid configuration: {0}")]
    Config(String),
}

// == Result Type Alias ==
/// Convenience Result type for the bot.
pub type Result<T> = std::result::Result<T, BotError>;
