//! Telegram Bot HTTP API client

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error};

/// Errors from the Telegram Bot API
#[derive(Debug, thiserror::Error)]
pub enum TelegramError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Telegram API error: {status} - {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Telegram API rejected the call: {0}")]
    Api(String),
}

/// One update from the long-poll feed
#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    #[serde(default)]
    pub message: Option<Message>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub chat: Chat,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
}

/// Standard Telegram response envelope
#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    result: Option<T>,
}

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: i64,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    parse_mode: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct GetUpdatesRequest {
    timeout: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    offset: Option<i64>,
}

/// Telegram Bot API client
pub struct TelegramClient {
    client: Client,
    base_url: String,
}

impl TelegramClient {
    pub fn new(token: &str) -> Result<Self, TelegramError> {
        Self::with_base_url(format!("https://api.telegram.org/bot{}", token))
    }

    /// A builder failure here would mean running without the configured
    /// timeouts, so it is propagated instead of papered over.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, TelegramError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .connect_timeout(Duration::from_secs(5))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Send a text message. With `html` set, the message is parsed as
    /// Telegram HTML (see the `html` helpers for safe span construction).
    pub async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        html: bool,
    ) -> Result<(), TelegramError> {
        let url = format!("{}/sendMessage", self.base_url);
        let request = SendMessageRequest {
            chat_id,
            text,
            parse_mode: html.then_some("HTML"),
        };

        debug!("Sending Telegram message to chat {}", chat_id);

        self.call::<serde_json::Value>(self.client.post(&url).json(&request))
            .await?;

        Ok(())
    }

    /// Long-poll for updates. Blocks server-side for up to `timeout_secs`,
    /// so the request timeout is widened past the poll window.
    pub async fn get_updates(
        &self,
        offset: Option<i64>,
        timeout_secs: u64,
    ) -> Result<Vec<Update>, TelegramError> {
        let url = format!("{}/getUpdates", self.base_url);
        let request = GetUpdatesRequest {
            timeout: timeout_secs,
            offset,
        };

        let updates = self
            .call::<Vec<Update>>(
                self.client
                    .post(&url)
                    .timeout(Duration::from_secs(timeout_secs + 10))
                    .json(&request),
            )
            .await?
            .unwrap_or_default();

        Ok(updates)
    }

    async fn call<T: serde::de::DeserializeOwned + Default>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<Option<T>, TelegramError> {
        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!("Telegram API error: {} - {}", status, body);
            return Err(TelegramError::Status { status, body });
        }

        let envelope: ApiResponse<T> = response.json().await?;
        if !envelope.ok {
            let description = envelope
                .description
                .unwrap_or_else(|| "no description".to_string());
            error!("Telegram API rejected the call: {}", description);
            return Err(TelegramError::Api(description));
        }

        Ok(envelope.result)
    }
}
