//! Revwatch Core
//!
//! Domain types and pure logic for the homework status watcher.
//!
//! This crate contains:
//! - Homework records and the fixed status/verdict vocabulary
//! - Response validation producing a single typed view of an API answer
//! - Message formatting for status-change notifications
//!
//! Nothing here performs I/O; the HTTP side lives in `revwatch-client`.

pub mod error;
pub mod homework;
pub mod response;

pub use error::ValidationError;
pub use homework::{HomeworkRecord, HomeworkStatus, format_status_change};
pub use response::{ValidatedResponse, validate_response};
