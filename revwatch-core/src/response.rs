//! Review API response validation
//!
//! A response body arrives as untyped JSON. This module performs the one
//! consolidated shape check and produces the typed view the poll loop
//! works with, so field-presence checks are not scattered over call sites.

use serde_json::Value;

use crate::error::ValidationError;
use crate::homework::HomeworkRecord;

/// A response body that passed the shape check
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedResponse {
    /// Homework entries, most recent first. May be empty.
    pub homeworks: Vec<HomeworkRecord>,

    /// Server-reported timestamp, used as the next poll cursor
    pub current_date: i64,
}

/// Checks a decoded body against the API contract
///
/// The top level must be an object carrying a `homeworks` array and an
/// integer `current_date`; each entry must itself be an object. Entries
/// are decoded leniently; per-record field checks happen at formatting
/// time. Pure and idempotent.
pub fn validate_response(body: &Value) -> Result<ValidatedResponse, ValidationError> {
    let object = body
        .as_object()
        .ok_or(ValidationError::InvalidShape("body is not an object"))?;

    let homeworks = object
        .get("homeworks")
        .ok_or(ValidationError::MissingField("homeworks"))?;
    let current_date = object
        .get("current_date")
        .ok_or(ValidationError::MissingField("current_date"))?;

    let entries = homeworks
        .as_array()
        .ok_or(ValidationError::InvalidShape("homeworks is not an array"))?;
    let current_date = current_date
        .as_i64()
        .ok_or(ValidationError::InvalidShape("current_date is not an integer"))?;

    let homeworks = entries
        .iter()
        .map(|entry| {
            serde_json::from_value(entry.clone())
                .map_err(|_| ValidationError::InvalidShape("homework entry is not an object"))
        })
        .collect::<Result<Vec<HomeworkRecord>, _>>()?;

    Ok(ValidatedResponse {
        homeworks,
        current_date,
    })
}
