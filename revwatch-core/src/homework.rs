//! Homework domain model
//!
//! Represents one submission as reported by the review API, the fixed
//! review-status vocabulary, and the chat message built from a record.

use std::str::FromStr;

use serde::Deserialize;

use crate::error::ValidationError;

/// Review state of a submission
///
/// The vocabulary is fixed at compile time; any other status string is
/// rejected with [`ValidationError::UnknownStatus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeworkStatus {
    /// The reviewer accepted the work
    Approved,

    /// The reviewer picked the work up for review
    Reviewing,

    /// The reviewer sent the work back with remarks
    Rejected,
}

impl HomeworkStatus {
    /// Human-readable verdict text shown in the chat message
    pub fn verdict(&self) -> &'static str {
        match self {
            HomeworkStatus::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            HomeworkStatus::Reviewing => "Работа взята на проверку ревьюером.",
            HomeworkStatus::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }
}

impl FromStr for HomeworkStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "approved" => Ok(HomeworkStatus::Approved),
            "reviewing" => Ok(HomeworkStatus::Reviewing),
            "rejected" => Ok(HomeworkStatus::Rejected),
            other => Err(ValidationError::UnknownStatus(other.to_string())),
        }
    }
}

/// One homework entry from the review API
///
/// Deserialized leniently: the API only guarantees `homework_name` and
/// `status` on entries worth reporting, so every field is optional at
/// decode time and checked when the message is built.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct HomeworkRecord {
    pub id: Option<i64>,
    pub homework_name: Option<String>,
    pub status: Option<String>,
    pub reviewer_comment: Option<String>,
    pub date_updated: Option<String>,
    pub lesson_name: Option<String>,
}

/// Builds the chat message announcing a review-status change
///
/// Fails with [`ValidationError::MissingField`] when `homework_name` or
/// `status` is absent or empty, and with
/// [`ValidationError::UnknownStatus`] when the status is outside the
/// verdict vocabulary. Pure: the same record always yields the same text.
pub fn format_status_change(record: &HomeworkRecord) -> Result<String, ValidationError> {
    let name = record
        .homework_name
        .as_deref()
        .filter(|name| !name.is_empty())
        .ok_or(ValidationError::MissingField("homework_name"))?;
    let status = record
        .status
        .as_deref()
        .filter(|status| !status.is_empty())
        .ok_or(ValidationError::MissingField("status"))?;
    let verdict = status.parse::<HomeworkStatus>()?.verdict();

    Ok(format!(
        "Изменился статус проверки работы \"{name}\". {verdict}"
    ))
}
