use std::sync::Arc;

use anyhow::{bail, Result};
use serde::Serialize;

/// Telegram Bot API base URL.
pub const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// Configuration for TelegramBot
#[derive(Debug, Clone)]
pub struct TelegramBotConfig {
    /// Bot API token
    pub bot_token: String,
    /// Destination chat ID
    pub chat_id: String,
    /// Base URL for API endpoints
    pub base_url: String,
}

impl TelegramBotConfig {
    /// Config pointing at the production API.
    pub fn new(bot_token: String, chat_id: String) -> Self {
        Self {
            bot_token,
            chat_id,
            base_url: TELEGRAM_API_BASE.to_string(),
        }
    }
}

/// Optional delivery parameters for a message. Unset fields are omitted
/// from the request body; `chat_id` and `text` are owned by the client and
/// cannot be overridden here.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SendMessageOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_notification: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_web_page_preview: Option<bool>,
}

#[derive(Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
    #[serde(flatten)]
    options: &'a SendMessageOptions,
}

/// Client for sending messages via Telegram Bot API.
pub struct TelegramBot {
    client: Arc<reqwest::Client>,
    config: TelegramBotConfig,
}

impl TelegramBot {
    pub fn new(client: Arc<reqwest::Client>, config: TelegramBotConfig) -> Self {
        Self { client, config }
    }

    /// Sends a text message to the configured chat.
    pub async fn push_message(&self, text: &str) -> Result<()> {
        self.push_message_with(text, &SendMessageOptions::default())
            .await
    }

    /// Sends a text message with explicit delivery options. A non-success
    /// response surfaces the status and response body in the error.
    pub async fn push_message_with(&self, text: &str, options: &SendMessageOptions) -> Result<()> {
        let url = format!(
            "{}/bot{}/sendMessage",
            self.config.base_url, self.config.bot_token
        );
        let body = SendMessageRequest {
            chat_id: &self.config.chat_id,
            text,
            options,
        };
        let resp = self.client.post(&url).json(&body).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            bail!("telegram sendMessage returned {}: {}", status, body);
        }
        Ok(())
    }
}
