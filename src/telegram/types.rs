//! Telegram Wire Types
//!
//! Serde models for the subset of the Bot API the bot reads and writes.
//! Inbound types ignore unknown fields, so API additions do not break
//! deserialization of incoming updates.

use serde::{Deserialize, Serialize};

// == Inbound Types ==

/// An incoming update delivered to the webhook.
///
/// Exactly one of the optional payloads is set per update; anything the bot
/// does not handle deserializes to an update with both fields empty.
#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    /// Monotonically increasing update identifier
    pub update_id: i64,
    /// New incoming message, if any
    #[serde(default)]
    pub message: Option<Message>,
    /// Incoming callback query from an inline keyboard, if any
    #[serde(default)]
    pub callback_query: Option<CallbackQuery>,
}

/// A chat message.
#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub message_id: i64,
    /// Sender; absent for channel posts
    #[serde(default)]
    pub from: Option<User>,
    pub chat: Chat,
    /// Text content; absent for media-only messages
    #[serde(default)]
    pub text: Option<String>,
}

/// A Telegram user.
#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub username: Option<String>,
}

/// The chat a message belongs to.
#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
}

/// A button press on an inline keyboard.
#[derive(Debug, Clone, Deserialize)]
pub struct CallbackQuery {
    pub id: String,
    pub from: User,
    /// The message the keyboard was attached to; absent if too old
    #[serde(default)]
    pub message: Option<Message>,
    /// Opaque action tag set by the keyboard builder
    #[serde(default)]
    pub data: Option<String>,
}

/// Membership record returned by `getChatMember`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatMember {
    /// One of: creator, administrator, member, restricted, left, kicked
    pub status: String,
}

impl ChatMember {
    /// Whether this record counts as a current channel member.
    pub fn is_member(&self) -> bool {
        !matches!(self.status.as_str(), "left" | "kicked")
    }
}

// == Outbound Types ==

/// An inline keyboard attached to an outgoing message.
#[derive(Debug, Clone, Serialize)]
pub struct InlineKeyboardMarkup {
    pub inline_keyboard: Vec<Vec<InlineKeyboardButton>>,
}

impl InlineKeyboardMarkup {
    /// Creates a keyboard from rows of buttons.
    pub fn new(rows: Vec<Vec<InlineKeyboardButton>>) -> Self {
        Self {
            inline_keyboard: rows,
        }
    }
}

/// A single inline keyboard button.
///
/// Telegram requires exactly one action field per button; the constructors
/// below enforce that.
#[derive(Debug, Clone, Serialize)]
pub struct InlineKeyboardButton {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub web_app: Option<WebAppInfo>,
}

impl InlineKeyboardButton {
    /// Button that opens an external URL.
    pub fn url(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            url: Some(url.into()),
            callback_data: None,
            web_app: None,
        }
    }

    /// Button that sends a callback query back to the bot.
    pub fn callback(text: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            url: None,
            callback_data: Some(data.into()),
            web_app: None,
        }
    }

    /// Button that launches a web app.
    pub fn web_app(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            url: None,
            callback_data: None,
            web_app: Some(WebAppInfo { url: url.into() }),
        }
    }
}

/// Web app descriptor for a `web_app` button.
#[derive(Debug, Clone, Serialize)]
pub struct WebAppInfo {
    pub url: String,
}

/// A bot command registered via `setMyCommands`.
#[derive(Debug, Clone, Serialize)]
pub struct BotCommand {
    pub command: String,
    pub description: String,
}
