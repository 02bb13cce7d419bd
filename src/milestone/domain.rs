//! Milestone domain types.

use crate::identity::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Unique identifier for a milestone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MilestoneId(Uuid);

impl MilestoneId {
    /// Creates a new random milestone identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for MilestoneId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MilestoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Errors returned while constructing milestone values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MilestoneDomainError {
    /// The milestone text is empty after trimming.
    #[error("milestone text is required and cannot be empty")]
    EmptyText,
}

/// Trimmed, non-empty milestone text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MilestoneText(String);

impl MilestoneText {
    /// Creates validated milestone text.
    ///
    /// # Errors
    ///
    /// Returns [`MilestoneDomainError::EmptyText`] when the value is empty
    /// after trimming.
    pub fn new(value: impl AsRef<str>) -> Result<Self, MilestoneDomainError> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(MilestoneDomainError::EmptyText);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the text as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A posted milestone note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    id: MilestoneId,
    milestone: MilestoneText,
    created_by: UserId,
    created_at: DateTime<Utc>,
}

impl Milestone {
    /// Creates a milestone posted by `created_by` now.
    #[must_use]
    pub fn new(milestone: MilestoneText, created_by: UserId, clock: &impl Clock) -> Self {
        Self {
            id: MilestoneId::new(),
            milestone,
            created_by,
            created_at: clock.utc(),
        }
    }

    /// Returns the identifier.
    #[must_use]
    pub const fn id(&self) -> MilestoneId {
        self.id
    }

    /// Returns the note text.
    #[must_use]
    pub const fn milestone(&self) -> &MilestoneText {
        &self.milestone
    }

    /// Returns the posting user.
    #[must_use]
    pub const fn created_by(&self) -> UserId {
        self.created_by
    }

    /// Returns the posting time.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
