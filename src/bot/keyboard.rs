//! Keyboard Builders
//!
//! Constructs the inline keyboards the bot attaches to its replies.

use crate::config::Config;
use crate::telegram::{InlineKeyboardButton, InlineKeyboardMarkup};

/// Builds the web app URL, appending the referral code when one is known.
pub fn webapp_url_with_referral(config: &Config, referral_code: &str) -> String {
    if referral_code.is_empty() {
        config.webapp_url.clone()
    } else {
        format!("{}?referral={}", config.webapp_url, referral_code)
    }
}

/// Builds the keyboard for the bot's main reply.
///
/// Members (or everyone, when the subscription gate is off) get a single
/// "Open App" web-app button carrying the referral code. Non-members get a
/// subscribe link plus a callback button to re-check their membership.
pub fn main_keyboard(config: &Config, is_member: bool, referral_code: &str) -> InlineKeyboardMarkup {
    if is_member || !config.require_channel_sub {
        InlineKeyboardMarkup::new(vec![vec![InlineKeyboardButton::web_app(
            "Open App",
            webapp_url_with_referral(config, referral_code),
        )]])
    } else {
        InlineKeyboardMarkup::new(vec![
            vec![InlineKeyboardButton::url(
                "Subscribe to Channel",
                config.channel_link(),
            )],
            vec![InlineKeyboardButton::callback("I've subscribed!", "check_sub")],
        ])
    }
}
