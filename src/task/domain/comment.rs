//! Append-only task comments.

use super::TaskDomainError;
use crate::identity::domain::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Validated comment body.
///
/// Deserialized content is checked for emptiness only; the length limit is
/// a write-time setting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CommentContent(String);

impl CommentContent {
    /// Field name reported in validation errors.
    pub const FIELD: &'static str = "content";

    /// Creates comment content, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyField`] when the content is empty
    /// after trimming, or [`TaskDomainError::FieldTooLong`] when it exceeds
    /// `max_chars` characters.
    pub fn new(value: impl AsRef<str>, max_chars: usize) -> Result<Self, TaskDomainError> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TaskDomainError::EmptyField { field: Self::FIELD });
        }
        if trimmed.chars().count() > max_chars {
            return Err(TaskDomainError::FieldTooLong {
                field: Self::FIELD,
                max: max_chars,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the content as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CommentContent {
    type Error = TaskDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value, usize::MAX)
    }
}

impl From<CommentContent> for String {
    fn from(value: CommentContent) -> Self {
        value.0
    }
}

/// A single entry in a task's comment log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    content: CommentContent,
    commented_by: UserId,
    timestamp: DateTime<Utc>,
}

impl Comment {
    /// Creates a comment entry.
    #[must_use]
    pub const fn new(content: CommentContent, commented_by: UserId, timestamp: DateTime<Utc>) -> Self {
        Self {
            content,
            commented_by,
            timestamp,
        }
    }

    /// Returns the comment body.
    #[must_use]
    pub const fn content(&self) -> &CommentContent {
        &self.content
    }

    /// Returns the author.
    #[must_use]
    pub const fn commented_by(&self) -> UserId {
        self.commented_by
    }

    /// Returns when the comment was posted.
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}
