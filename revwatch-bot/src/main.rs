//! Revwatch Bot
//!
//! Watches the homework-review API for status changes on the latest
//! submission and forwards them to a Telegram chat.
//!
//! Architecture:
//! - Configuration: secrets and tuning from the environment (`.env` aware)
//! - Clients: review API and Telegram Bot API (revwatch-client)
//! - Poller: fixed-interval fetch, validate, notify cycle
//!
//! The process has exactly one fatal path: missing or invalid
//! configuration at startup. Every later failure is contained inside the
//! poll loop.

mod config;
mod poller;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::poller::StatusPoller;
use revwatch_client::{ReviewApiClient, TelegramClient};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "revwatch_bot=info,revwatch_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting revwatch bot");

    // Load configuration; this is the only fatal path
    let config = load_config()?;
    info!(
        "Loaded configuration: endpoint={}, poll_interval={:?}",
        config.review_api_url, config.poll_interval
    );

    let api = ReviewApiClient::new(
        config.review_api_url.clone(),
        config.review_api_token.clone(),
    );
    let telegram = TelegramClient::new(config.telegram_token.clone());

    info!("Clients initialized");

    let poller = StatusPoller::new(config, api, telegram);

    info!("Starting poll loop");
    poller.run().await
}

/// Loads and sanity-checks configuration from the environment
fn load_config() -> Result<Config> {
    let config = Config::from_env().context("Startup configuration is incomplete")?;
    config
        .validate()
        .context("Startup configuration is invalid")?;
    Ok(config)
}
