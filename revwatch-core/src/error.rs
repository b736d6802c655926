//! Typed validation failures

use thiserror::Error;

/// Errors raised while checking a response body or building a message
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// The body or one of its parts does not have the expected JSON shape
    #[error("unexpected response shape: {0}")]
    InvalidShape(&'static str),

    /// A required key is absent or empty
    #[error("required field `{0}` is missing")]
    MissingField(&'static str),

    /// A status outside the fixed verdict vocabulary
    #[error("unknown homework status `{0}`")]
    UnknownStatus(String),
}

impl ValidationError {
    /// Check if this error is a missing-field error for `field`
    pub fn is_missing(&self, field: &str) -> bool {
        matches!(self, Self::MissingField(name) if *name == field)
    }
}
