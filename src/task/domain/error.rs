//! Error types for task domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing or mutating domain task values.
///
/// Every variant is a caller-input problem detected before any mutation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// A required text field is empty after trimming.
    #[error("{field} cannot be empty")]
    EmptyField {
        /// Name of the offending field.
        field: &'static str,
    },

    /// A text field exceeds its configured length limit.
    #[error("{field} exceeds {max} characters")]
    FieldTooLong {
        /// Name of the offending field.
        field: &'static str,
        /// Maximum accepted number of characters.
        max: usize,
    },

    /// The deadline string could not be parsed into a point in time.
    #[error("invalid deadline format: {0}")]
    InvalidDeadline(String),

    /// The deadline is not far enough in the future.
    #[error("deadline must be in the future")]
    DeadlineNotInFuture,
}

/// Error returned while parsing task statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);
