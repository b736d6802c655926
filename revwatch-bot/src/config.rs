//! Watcher configuration
//!
//! All settings come from the environment, optionally seeded from a
//! `.env` file. The three secrets are required as a group and every
//! missing one is named in the error; everything else has a default.

use std::time::Duration;

use revwatch_client::DEFAULT_REVIEW_API_URL;

/// Default delay between poll cycles, in seconds
const DEFAULT_POLL_INTERVAL_SECS: u64 = 600;

/// Watcher configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// OAuth token for the homework-review API
    pub review_api_token: String,

    /// Telegram bot token
    pub telegram_token: String,

    /// Destination chat identifier
    pub telegram_chat_id: String,

    /// Full URL of the review API status endpoint
    pub review_api_url: String,

    /// Delay between successive poll cycles
    pub poll_interval: Duration,
}

impl Config {
    /// Creates configuration from environment variables
    ///
    /// Expected environment variables:
    /// - PRACTICUM_TOKEN (required)
    /// - TELEGRAM_TOKEN (required)
    /// - TELEGRAM_CHAT_ID (required)
    /// - REVIEW_API_URL (optional, default: public review endpoint)
    /// - POLL_INTERVAL (optional, seconds, default: 600)
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let mut missing = Vec::new();
        let mut require = |name: &'static str| {
            let value = lookup(name);
            if value.is_none() {
                missing.push(name);
            }
            value.unwrap_or_default()
        };

        let review_api_token = require("PRACTICUM_TOKEN");
        let telegram_token = require("TELEGRAM_TOKEN");
        let telegram_chat_id = require("TELEGRAM_CHAT_ID");

        if !missing.is_empty() {
            anyhow::bail!(
                "missing required environment variables: {}",
                missing.join(", ")
            );
        }

        let review_api_url =
            lookup("REVIEW_API_URL").unwrap_or_else(|| DEFAULT_REVIEW_API_URL.to_string());

        let poll_interval = lookup("POLL_INTERVAL")
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS));

        Ok(Self {
            review_api_token,
            telegram_token,
            telegram_chat_id,
            review_api_url,
            poll_interval,
        })
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.review_api_token.is_empty() {
            anyhow::bail!("review API token cannot be empty");
        }

        if self.telegram_token.is_empty() {
            anyhow::bail!("telegram token cannot be empty");
        }

        if self.telegram_chat_id.is_empty() {
            anyhow::bail!("telegram chat id cannot be empty");
        }

        if !self.review_api_url.starts_with("http://")
            && !self.review_api_url.starts_with("https://")
        {
            anyhow::bail!("review API url must start with http:// or https://");
        }

        if self.poll_interval.as_secs() == 0 {
            anyhow::bail!("poll interval must be greater than 0");
        }

        Ok(())
    }
}
