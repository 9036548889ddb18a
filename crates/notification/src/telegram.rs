use anyhow::Context;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::{ChatChannel, ValidSecrets};

pub const TELEGRAM_API_URL: &str = "https://api.telegram.org";

#[derive(Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'a str,
}

#[derive(Deserialize)]
struct SendMessageResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

/// Telegram Bot API `sendMessage` client.
#[derive(Debug, Clone)]
pub struct TelegramService {
    client: Client,
    api_url: String,
}

impl TelegramService {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), api_url)
    }

    pub fn with_client(client: Client, api_url: impl Into<String>) -> Self {
        let api_url = api_url.into().trim_end_matches('/').to_owned();

        Self { client, api_url }
    }
}

impl Default for TelegramService {
    fn default() -> Self {
        Self::new(TELEGRAM_API_URL)
    }
}

#[async_trait::async_trait]
impl ChatChannel for TelegramService {
    #[tracing::instrument(skip_all, fields(chat_id = %secrets.telegram_chat_id()))]
    async fn send_message(&self, secrets: &ValidSecrets, text: &str) -> anyhow::Result<bool> {
        let url = format!(
            "{}/bot{}/sendMessage",
            self.api_url,
            secrets.telegram_bot_token()
        );

        // reqwest errors carry the URL, and the URL carries the bot token.
        let response = self
            .client
            .post(url)
            .json(&SendMessageRequest {
                chat_id: secrets.telegram_chat_id(),
                text,
                parse_mode: "Markdown",
            })
            .send()
            .await
            .map_err(|e| e.without_url())?;

        let status = response.status();
        let body = response
            .json::<SendMessageResponse>()
            .await
            .map_err(|e| e.without_url())
            .with_context(|| format!("unexpected Telegram response ({status})"))?;

        if !body.ok {
            tracing::warn!(
                %status,
                description = body.description.as_deref().unwrap_or_default(),
                "Telegram did not acknowledge message"
            );
        }

        Ok(body.ok)
    }
}
