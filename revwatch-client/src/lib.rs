//! Revwatch HTTP clients
//!
//! Typed clients for the two remote collaborators of the watcher: the
//! homework-review API that reports submission statuses, and the Telegram
//! Bot API that carries notifications to the destination chat.
//!
//! # Example
//!
//! ```no_run
//! use revwatch_client::{DEFAULT_REVIEW_API_URL, ReviewApiClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ReviewApiClient::new(DEFAULT_REVIEW_API_URL, "oauth-token");
//!     let body = client.fetch_statuses(1_700_000_000).await?;
//!     println!("statuses: {body}");
//!     Ok(())
//! }
//! ```

pub mod error;
mod telegram;

// Re-export commonly used types
pub use error::{ApiError, NotifyError};
pub use telegram::{DEFAULT_TELEGRAM_API_ROOT, TelegramClient};

use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::info;

/// Default endpoint of the homework-review API
pub const DEFAULT_REVIEW_API_URL: &str =
    "https://practicum.yandex.ru/api/user_api/homework_statuses/";

/// HTTP client for the homework-review API
///
/// The API has a single operation: list homework status changes since a
/// given timestamp. Authentication is an OAuth bearer token sent with
/// every request.
#[derive(Debug, Clone)]
pub struct ReviewApiClient {
    /// Full URL of the status endpoint
    endpoint: String,
    /// OAuth token sent with every request
    token: String,
    /// HTTP client instance
    client: Client,
}

impl ReviewApiClient {
    /// Create a new review API client
    ///
    /// # Arguments
    /// * `endpoint` - Full URL of the status endpoint
    /// * `token` - OAuth token for the `Authorization` header
    pub fn new(endpoint: impl Into<String>, token: impl Into<String>) -> Self {
        Self::with_client(endpoint, token, Client::new())
    }

    /// Create a review API client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    pub fn with_client(
        endpoint: impl Into<String>,
        token: impl Into<String>,
        client: Client,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            token: token.into(),
            client,
        }
    }

    /// Get the endpoint this client talks to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetch homework statuses updated since `from_date`
    ///
    /// Returns the decoded body as untyped JSON; shape validation is the
    /// caller's concern. Any HTTP status other than 200 is an error, as is
    /// a body that does not decode as JSON.
    pub async fn fetch_statuses(&self, from_date: i64) -> Result<Value, ApiError> {
        let response = self
            .client
            .get(&self.endpoint)
            .header("Authorization", format!("OAuth {}", self.token))
            .query(&[("from_date", from_date)])
            .send()
            .await
            .map_err(ApiError::Connection)?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(ApiError::UnexpectedStatus {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("unknown").to_string(),
            });
        }

        let body = response.json().await.map_err(ApiError::MalformedBody)?;
        info!(from_date, "Fetched homework statuses");
        Ok(body)
    }
}
