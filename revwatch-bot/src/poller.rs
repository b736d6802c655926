//! Status poller
//!
//! Polls the review API on a fixed interval, validates each answer, and
//! forwards the newest status change to the chat. Every failure inside a
//! cycle is contained here: API and validation failures are logged and
//! reported to the chat, delivery failures are logged only, and the loop
//! never exits.

use anyhow::Result;
use chrono::Utc;
use tokio::time;
use tracing::{debug, error, info};

use revwatch_client::{ReviewApiClient, TelegramClient};
use revwatch_core::{ValidatedResponse, format_status_change, validate_response};

use crate::config::Config;

/// Prefix of the generic failure report sent to the chat
const FAILURE_REPORT_PREFIX: &str = "Сбой в работе программы";

/// Poller that watches homework statuses and notifies the chat
pub struct StatusPoller {
    config: Config,
    api: ReviewApiClient,
    telegram: TelegramClient,
}

impl StatusPoller {
    /// Creates a new status poller
    pub fn new(config: Config, api: ReviewApiClient, telegram: TelegramClient) -> Self {
        Self {
            config,
            api,
            telegram,
        }
    }

    /// Starts the polling loop
    ///
    /// Runs until the process is terminated externally. The cursor starts
    /// at "now" and is threaded through the iterations explicitly; no
    /// state lives outside this function.
    pub async fn run(&self) -> Result<()> {
        info!(
            "Starting status poller (interval: {:?})",
            self.config.poll_interval
        );

        let mut cursor = Utc::now().timestamp();
        let mut interval = time::interval(self.config.poll_interval);

        loop {
            interval.tick().await;

            debug!(cursor, "Polling for homework status changes");
            cursor = self.poll_once(cursor).await;
        }
    }

    /// Performs a single poll cycle
    ///
    /// Returns the cursor for the next cycle: the server-reported
    /// `current_date` when fetch and validation both succeed, the previous
    /// cursor otherwise. The notification outcome does not influence the
    /// cursor.
    async fn poll_once(&self, cursor: i64) -> i64 {
        let validated = match self.fetch_and_validate(cursor).await {
            Ok(validated) => validated,
            Err(error) => {
                error!("Poll cycle failed: {error}");
                self.report_failure(&error.to_string()).await;
                return cursor;
            }
        };

        match validated.homeworks.first() {
            None => info!("No status changes"),
            Some(record) => match format_status_change(record) {
                Ok(text) => self.notify(&text).await,
                Err(error) => {
                    error!("Could not build status message: {error}");
                    self.report_failure(&error.to_string()).await;
                }
            },
        }

        validated.current_date
    }

    /// Fetches one poll window and checks the response shape
    async fn fetch_and_validate(&self, cursor: i64) -> Result<ValidatedResponse> {
        let body = self.api.fetch_statuses(cursor).await?;
        let validated = validate_response(&body)?;
        info!(
            homeworks = validated.homeworks.len(),
            current_date = validated.current_date,
            "Response validated"
        );
        Ok(validated)
    }

    /// Sends the status-change message; a failed delivery is logged only
    async fn notify(&self, text: &str) {
        if let Err(error) = self
            .telegram
            .send_message(&self.config.telegram_chat_id, text)
            .await
        {
            error!("Status message not delivered: {error}");
        }
    }

    /// Sends the generic failure report
    ///
    /// A failed report is logged and dropped; it must never trigger
    /// another send attempt.
    async fn report_failure(&self, detail: &str) {
        let text = format!("{FAILURE_REPORT_PREFIX}: {detail}");
        if let Err(error) = self
            .telegram
            .send_message(&self.config.telegram_chat_id, &text)
            .await
        {
            error!("Failure report not delivered: {error}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn poller(api_url: String, telegram_root: String) -> StatusPoller {
        let config = Config {
            review_api_token: "api-token".to_string(),
            telegram_token: "bot-token".to_string(),
            telegram_chat_id: "42".to_string(),
            review_api_url: api_url.clone(),
            poll_interval: Duration::from_secs(600),
        };
        let api = ReviewApiClient::new(api_url, "api-token");
        let telegram = TelegramClient::with_api_root(telegram_root, "bot-token");
        StatusPoller::new(config, api, telegram)
    }

    async fn mock_api(server: &MockServer, response: ResponseTemplate) {
        Mock::given(method("GET"))
            .and(path("/statuses/"))
            .respond_with(response)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn status_change_is_sent_and_cursor_advances() {
        let api = MockServer::start().await;
        let telegram = MockServer::start().await;

        mock_api(
            &api,
            ResponseTemplate::new(200).set_body_json(json!({
                "homeworks": [{"homework_name": "hw1", "status": "approved"}],
                "current_date": 1_700_000_000,
            })),
        )
        .await;
        Mock::given(method("POST"))
            .and(path("/botbot-token/sendMessage"))
            .and(body_string_contains("hw1"))
            .and(body_string_contains("Ура"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
            .expect(1)
            .mount(&telegram)
            .await;

        let poller = poller(format!("{}/statuses/", api.uri()), telegram.uri());
        let cursor = poller.poll_once(0).await;
        assert_eq!(cursor, 1_700_000_000);
    }

    #[tokio::test]
    async fn empty_list_sends_nothing_and_cursor_advances() {
        let api = MockServer::start().await;
        let telegram = MockServer::start().await;

        mock_api(
            &api,
            ResponseTemplate::new(200).set_body_json(json!({
                "homeworks": [],
                "current_date": 1_700_000_100,
            })),
        )
        .await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&telegram)
            .await;

        let poller = poller(format!("{}/statuses/", api.uri()), telegram.uri());
        let cursor = poller.poll_once(0).await;
        assert_eq!(cursor, 1_700_000_100);
    }

    #[tokio::test]
    async fn api_failure_is_reported_and_cursor_is_kept() {
        let api = MockServer::start().await;
        let telegram = MockServer::start().await;

        mock_api(&api, ResponseTemplate::new(503)).await;
        Mock::given(method("POST"))
            .and(path("/botbot-token/sendMessage"))
            .and(body_string_contains("Сбой в работе программы"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
            .expect(1)
            .mount(&telegram)
            .await;

        let poller = poller(format!("{}/statuses/", api.uri()), telegram.uri());
        let cursor = poller.poll_once(123).await;
        assert_eq!(cursor, 123);
    }

    #[tokio::test]
    async fn unknown_status_is_reported_and_cursor_advances() {
        let api = MockServer::start().await;
        let telegram = MockServer::start().await;

        mock_api(
            &api,
            ResponseTemplate::new(200).set_body_json(json!({
                "homeworks": [{"homework_name": "hw1", "status": "archived"}],
                "current_date": 1_700_000_200,
            })),
        )
        .await;
        Mock::given(method("POST"))
            .and(body_string_contains("Сбой в работе программы"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
            .expect(1)
            .mount(&telegram)
            .await;

        let poller = poller(format!("{}/statuses/", api.uri()), telegram.uri());
        let cursor = poller.poll_once(0).await;
        assert_eq!(cursor, 1_700_000_200);
    }

    #[tokio::test]
    async fn delivery_failure_is_silent_and_cursor_still_advances() {
        let api = MockServer::start().await;
        let telegram = MockServer::start().await;

        mock_api(
            &api,
            ResponseTemplate::new(200).set_body_json(json!({
                "homeworks": [{"homework_name": "hw1", "status": "approved"}],
                "current_date": 1_700_000_300,
            })),
        )
        .await;
        // Exactly one send attempt: the failed delivery must not be
        // re-reported through the chat.
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&telegram)
            .await;

        let poller = poller(format!("{}/statuses/", api.uri()), telegram.uri());
        let cursor = poller.poll_once(0).await;
        assert_eq!(cursor, 1_700_000_300);
    }

    #[tokio::test]
    async fn malformed_body_is_reported() {
        let api = MockServer::start().await;
        let telegram = MockServer::start().await;

        mock_api(&api, ResponseTemplate::new(200).set_body_string("not json")).await;
        Mock::given(method("POST"))
            .and(body_string_contains("Сбой в работе программы"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
            .expect(1)
            .mount(&telegram)
            .await;

        let poller = poller(format!("{}/statuses/", api.uri()), telegram.uri());
        let cursor = poller.poll_once(77).await;
        assert_eq!(cursor, 77);
    }
}
