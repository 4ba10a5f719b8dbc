//! Telegram Bot API Client
//!
//! Thin reqwest wrapper around the handful of Bot API methods the bot calls.
//! Every method POSTs JSON to `https://api.telegram.org/bot<token>/<method>`
//! and unwraps the standard `{ok, result, description}` envelope.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::{BotError, Result};
use crate::telegram::types::{BotCommand, ChatMember, InlineKeyboardMarkup, Message};

/// Default Bot API endpoint.
const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

// == Api Response Envelope ==
/// Standard Bot API response wrapper.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: serde::Deserialize<'de>"))]
struct ApiResponse<T> {
    ok: bool,
    #[serde(default)]
    result: Option<T>,
    #[serde(default)]
    description: Option<String>,
}

// == Telegram Client ==
/// Client for the Telegram Bot API.
///
/// Cheap to clone; the underlying reqwest client shares its connection pool.
#[derive(Debug, Clone)]
pub struct TelegramClient {
    http: reqwest::Client,
    base_url: String,
}

impl TelegramClient {
    // == Constructor ==
    /// Creates a client for the given bot token against the public API.
    pub fn new(token: &str) -> Self {
        Self::with_base_url(token, TELEGRAM_API_BASE)
    }

    /// Creates a client against a custom API base URL.
    ///
    /// Used by tests to point the client at an unreachable or stub server.
    pub fn with_base_url(token: &str, base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: format!("{}/bot{}", base_url.trim_end_matches('/'), token),
        }
    }

    /// Calls a Bot API method and deserializes the `result` payload.
    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        payload: &impl Serialize,
    ) -> Result<T> {
        let url = format!("{}/{}", self.base_url, method);
        let response = self.http.post(&url).json(payload).send().await?;
        let envelope: ApiResponse<T> = response.json().await?;

        if !envelope.ok {
            return Err(BotError::Api(
                envelope
                    .description
                    .unwrap_or_else(|| format!("{} failed without description", method)),
            ));
        }
        envelope
            .result
            .ok_or_else(|| BotError::Api(format!("{} returned no result", method)))
    }

    /// Calls a Bot API method whose result payload is irrelevant.
    async fn call_discarding(&self, method: &str, payload: &impl Serialize) -> Result<()> {
        let _: serde_json::Value = self.call(method, payload).await?;
        Ok(())
    }

    // == Send Message ==
    /// Sends a text message, optionally with an inline keyboard.
    pub async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        reply_markup: Option<&InlineKeyboardMarkup>,
    ) -> Result<Message> {
        let mut payload = json!({
            "chat_id": chat_id,
            "text": text,
        });
        if let Some(markup) = reply_markup {
            payload["reply_markup"] = serde_json::to_value(markup)
                .map_err(|e| BotError::Api(format!("keyboard serialization failed: {}", e)))?;
        }
        self.call("sendMessage", &payload).await
    }

    // == Edit Message Text ==
    /// Replaces the text (and keyboard) of a previously sent message.
    pub async fn edit_message_text(
        &self,
        chat_id: i64,
        message_id: i64,
        text: &str,
        reply_markup: Option<&InlineKeyboardMarkup>,
    ) -> Result<()> {
        let mut payload = json!({
            "chat_id": chat_id,
            "message_id": message_id,
            "text": text,
        });
        if let Some(markup) = reply_markup {
            payload["reply_markup"] = serde_json::to_value(markup)
                .map_err(|e| BotError::Api(format!("keyboard serialization failed: {}", e)))?;
        }
        self.call_discarding("editMessageText", &payload).await
    }

    // == Answer Callback Query ==
    /// Acknowledges a callback query, optionally showing a notice to the user.
    pub async fn answer_callback_query(&self, query_id: &str, text: Option<&str>) -> Result<()> {
        let mut payload = json!({ "callback_query_id": query_id });
        if let Some(text) = text {
            payload["text"] = json!(text);
        }
        self.call_discarding("answerCallbackQuery", &payload).await
    }

    // == Get Chat Member ==
    /// Fetches a user's membership record in a chat or channel.
    pub async fn get_chat_member(&self, chat_id: &str, user_id: i64) -> Result<ChatMember> {
        let payload = json!({
            "chat_id": chat_id,
            "user_id": user_id,
        });
        self.call("getChatMember", &payload).await
    }

    // == Set Webhook ==
    /// Registers the webhook URL updates should be delivered to.
    pub async fn set_webhook(&self, url: &str) -> Result<()> {
        self.call_discarding("setWebhook", &json!({ "url": url }))
            .await
    }

    // == Set My Commands ==
    /// Publishes the bot's command menu.
    pub async fn set_my_commands(&self, commands: &[BotCommand]) -> Result<()> {
        self.call_discarding("setMyCommands", &json!({ "commands": commands }))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_embeds_token() {
        let client = TelegramClient::with_base_url("123:abc", "http://127.0.0.1:9/");
        assert_eq!(client.base_url, "http://127.0.0.1:9/bot123:abc");
    }

    #[test]
    fn test_envelope_error_deserializes() {
        let json = r#"{"ok": false, "error_code": 400, "description": "Bad Request"}"#;
        let envelope: ApiResponse<serde_json::Value> = serde_json::from_str(json).unwrap();
        assert!(!envelope.ok);
        assert_eq!(envelope.description.as_deref(), Some("Bad Request"));
        assert!(envelope.result.is_none());
    }

    #[tokio::test]
    async fn test_unreachable_server_surfaces_http_error() {
        // Port 9 (discard) refuses connections on loopback
        let client = TelegramClient::with_base_url("123:abc", "http://127.0.0.1:9");
        let result = client.answer_callback_query("q1", None).await;
        assert!(matches!(result, Err(BotError::Http(_))));
    }
}
