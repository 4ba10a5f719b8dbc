//! Telegram Module
//!
//! Wire types and a minimal Bot API client for the methods the bot uses.

mod client;
mod types;

pub use client::TelegramClient;
pub use types::{
    BotCommand, CallbackQuery, Chat, ChatMember, InlineKeyboardButton, InlineKeyboardMarkup,
    Message, Update, User, WebAppInfo,
};
