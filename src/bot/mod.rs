//! Bot Module
//!
//! Update handlers and keyboard builders for the bot's two interactions:
//! the `/start` command and the `check_sub` callback.

mod handlers;
mod keyboard;

pub use handlers::handle_update;
pub use keyboard::{main_keyboard, webapp_url_with_referral};
