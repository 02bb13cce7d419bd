//! In-memory user directory for tests and embedding.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::identity::{
    domain::{UserId, UserProfile},
    ports::{UserDirectory, UserDirectoryError, UserDirectoryResult},
};

/// Thread-safe in-memory user directory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserDirectory {
    users: Arc<RwLock<HashMap<UserId, UserProfile>>>,
}

impl InMemoryUserDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a user profile.
    ///
    /// # Errors
    ///
    /// Returns [`UserDirectoryError::Unavailable`] when the lock is poisoned.
    pub fn insert(&self, profile: UserProfile) -> UserDirectoryResult<()> {
        let mut users = self.users.write().map_err(|err| {
            UserDirectoryError::unavailable(std::io::Error::other(err.to_string()))
        })?;
        users.insert(profile.id, profile);
        Ok(())
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn resolve_user(&self, id: UserId) -> UserDirectoryResult<Option<UserProfile>> {
        let users = self.users.read().map_err(|err| {
            UserDirectoryError::unavailable(std::io::Error::other(err.to_string()))
        })?;
        Ok(users.get(&id).cloned())
    }
}
