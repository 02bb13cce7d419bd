//! Task deadline validation.

use super::TaskDomainError;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Point in time by which a task should be finished.
///
/// Deadlines are only validated when created or explicitly edited;
/// lifecycle transitions never re-check them, so a stored deadline may have
/// passed since.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Deadline(DateTime<Utc>);

impl Deadline {
    /// Validates that `at` lies strictly more than `min_lead` after `now`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::DeadlineNotInFuture`] otherwise.
    pub fn new(
        at: DateTime<Utc>,
        now: DateTime<Utc>,
        min_lead: Duration,
    ) -> Result<Self, TaskDomainError> {
        if at <= now + min_lead {
            return Err(TaskDomainError::DeadlineNotInFuture);
        }
        Ok(Self(at))
    }

    /// Parses and validates a deadline supplied as text.
    ///
    /// Accepts RFC 3339 timestamps and plain `YYYY-MM-DD` dates; a plain
    /// date means the end of that day in UTC.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidDeadline`] when the text is not a
    /// recognised point in time, or [`TaskDomainError::DeadlineNotInFuture`]
    /// when it is not in the future.
    pub fn parse(
        raw: &str,
        now: DateTime<Utc>,
        min_lead: Duration,
    ) -> Result<Self, TaskDomainError> {
        let at = parse_point_in_time(raw.trim())
            .ok_or_else(|| TaskDomainError::InvalidDeadline(raw.to_owned()))?;
        Self::new(at, now, min_lead)
    }

    /// Returns the deadline timestamp.
    #[must_use]
    pub const fn at(self) -> DateTime<Utc> {
        self.0
    }
}

fn parse_point_in_time(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(timestamp.with_timezone(&Utc));
    }
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()?;
    Some(date.and_hms_opt(23, 59, 59)?.and_utc())
}

impl fmt::Display for Deadline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}
