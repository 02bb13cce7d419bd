//! Port contract for resolving user identities.

use super::domain::{UserId, UserProfile};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for user directory operations.
pub type UserDirectoryResult<T> = Result<T, UserDirectoryError>;

/// Identity lookup contract.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Resolves a user identifier into a display profile.
    ///
    /// Returns `None` when no such user exists.
    async fn resolve_user(&self, id: UserId) -> UserDirectoryResult<Option<UserProfile>>;
}

/// Errors returned by user directory implementations.
#[derive(Debug, Clone, Error)]
pub enum UserDirectoryError {
    /// The backing identity store could not be reached.
    #[error("user directory unavailable: {0}")]
    Unavailable(Arc<dyn std::error::Error + Send + Sync>),
}

impl UserDirectoryError {
    /// Wraps a backing-store failure.
    pub fn unavailable(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Unavailable(Arc::new(err))
    }
}
