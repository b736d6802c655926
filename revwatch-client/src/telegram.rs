//! Telegram Bot API client
//!
//! The watcher needs exactly one call from the Bot API surface:
//! `sendMessage`. Everything else is out of scope.

use reqwest::Client;
use serde::Serialize;
use tracing::info;

use crate::error::NotifyError;

/// Default root of the Telegram Bot API
pub const DEFAULT_TELEGRAM_API_ROOT: &str = "https://api.telegram.org";

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
}

/// Client for delivering notifications through a Telegram bot
#[derive(Debug, Clone)]
pub struct TelegramClient {
    /// API root, without the per-bot path segment
    api_root: String,
    /// Bot token, becomes part of the request path
    token: String,
    /// HTTP client instance
    client: Client,
}

impl TelegramClient {
    /// Create a client against the public Bot API
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_api_root(DEFAULT_TELEGRAM_API_ROOT, token)
    }

    /// Create a client against a custom API root
    ///
    /// Useful for tests and for self-hosted Bot API servers.
    pub fn with_api_root(api_root: impl Into<String>, token: impl Into<String>) -> Self {
        let api_root = api_root.into();
        Self {
            api_root: api_root.trim_end_matches('/').to_string(),
            token: token.into(),
            client: Client::new(),
        }
    }

    /// Deliver `text` to `chat_id`
    ///
    /// Transport errors and non-success Bot API answers both map to
    /// [`NotifyError::Delivery`], which keeps the undelivered text for
    /// diagnostics.
    pub async fn send_message(&self, chat_id: &str, text: &str) -> Result<(), NotifyError> {
        let url = format!("{}/bot{}/sendMessage", self.api_root, self.token);
        let response = self
            .client
            .post(&url)
            .json(&SendMessageRequest { chat_id, text })
            .send()
            .await
            .map_err(|err| NotifyError::delivery(text, err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(NotifyError::delivery(
                text,
                format!("status {status}: {detail}"),
            ));
        }

        info!(chat_id, text, "Delivered notification");
        Ok(())
    }
}
