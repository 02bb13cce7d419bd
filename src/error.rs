//! Transport-agnostic error classification shared by all services.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse category of a failed engine operation.
///
/// Service layers map these onto their transport (for example HTTP status
/// codes). Only [`ErrorKind::Internal`] is worth retrying unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Malformed, missing or out-of-range caller input.
    Validation,
    /// A referenced task, user or milestone does not exist.
    NotFound,
    /// The actor may not perform the operation.
    Unauthorized,
    /// A concurrent write won the race.
    Conflict,
    /// Persistence or collaborator failure.
    Internal,
}

impl ErrorKind {
    /// Returns `true` when the same request may succeed if retried.
    #[must_use]
    pub const fn is_retryable(self) -> bool {
        matches!(self, Self::Internal)
    }

    /// Returns the canonical name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::NotFound => "not_found",
            Self::Unauthorized => "unauthorized",
            Self::Conflict => "conflict",
            Self::Internal => "internal",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
