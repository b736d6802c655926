//! Error types for the revwatch clients

use thiserror::Error;

/// Errors that can occur when talking to the review API
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request could not be completed at the transport level
    #[error("request failed: {0}")]
    Connection(#[source] reqwest::Error),

    /// The API answered with a status other than 200
    #[error("unexpected status {status} ({reason})")]
    UnexpectedStatus {
        /// HTTP status code
        status: u16,
        /// Reason phrase for the status
        reason: String,
    },

    /// The response body could not be decoded as JSON
    #[error("malformed response body: {0}")]
    MalformedBody(#[source] reqwest::Error),
}

impl ApiError {
    /// Check if this error is a server error (5xx status)
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::UnexpectedStatus { status, .. } if *status >= 500)
    }
}

/// Errors that can occur when delivering a chat notification
#[derive(Debug, Error)]
pub enum NotifyError {
    /// The message could not be handed to the Bot API
    #[error("failed to deliver {text:?}: {reason}")]
    Delivery {
        /// The text that failed to go out, kept for diagnostics
        text: String,
        /// What the transport or the Bot API reported
        reason: String,
    },
}

impl NotifyError {
    /// Create a delivery error wrapping the undelivered text
    pub fn delivery(text: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Delivery {
            text: text.into(),
            reason: reason.into(),
        }
    }
}
