//! Service layer for posting and listing milestones.

use crate::error::ErrorKind;
use crate::identity::{
    domain::{Actor, Role, UserId},
    ports::{UserDirectory, UserDirectoryError},
};
use crate::milestone::{
    domain::{Milestone, MilestoneDomainError, MilestoneId, MilestoneText},
    ports::{MilestoneRepository, MilestoneRepositoryError},
};
use crate::task::domain::{AuthorizationError, require_role};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::Serialize;
use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for milestone operations.
#[derive(Debug, Error)]
pub enum MilestoneServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] MilestoneDomainError),
    /// The actor's role may not post milestones.
    #[error(transparent)]
    Unauthorized(#[from] AuthorizationError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] MilestoneRepositoryError),
    /// Identity lookup failed.
    #[error(transparent)]
    Directory(#[from] UserDirectoryError),
}

impl MilestoneServiceError {
    /// Classifies the error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(_) => ErrorKind::Validation,
            Self::Unauthorized(_) => ErrorKind::Unauthorized,
            Self::Repository(MilestoneRepositoryError::DuplicateMilestone(_)) => {
                ErrorKind::Conflict
            }
            Self::Repository(MilestoneRepositoryError::Persistence(_)) | Self::Directory(_) => {
                ErrorKind::Internal
            }
        }
    }
}

/// Result type for milestone service operations.
pub type MilestoneServiceResult<T> = Result<T, MilestoneServiceError>;

/// Milestone with the poster's display name resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MilestoneView {
    /// Identifier.
    pub id: MilestoneId,
    /// Note text.
    pub milestone: String,
    /// Posting user.
    pub created_by: UserId,
    /// Posting time.
    pub created_at: DateTime<Utc>,
    /// Poster's display name, when known.
    pub staff_name: Option<String>,
}

/// Milestone orchestration service.
#[derive(Clone)]
pub struct MilestoneService<R, U, C>
where
    R: MilestoneRepository,
    U: UserDirectory,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    users: Arc<U>,
    clock: Arc<C>,
}

impl<R, U, C> MilestoneService<R, U, C>
where
    R: MilestoneRepository,
    U: UserDirectory,
    C: Clock + Send + Sync,
{
    /// Creates a new milestone service.
    #[must_use]
    pub const fn new(repository: Arc<R>, users: Arc<U>, clock: Arc<C>) -> Self {
        Self {
            repository,
            users,
            clock,
        }
    }

    /// Posts a milestone.
    ///
    /// # Errors
    ///
    /// Returns [`MilestoneServiceError::Unauthorized`] unless the actor is
    /// staff, [`MilestoneServiceError::Domain`] for blank text, or
    /// [`MilestoneServiceError::Repository`] when persistence fails.
    pub async fn create_milestone(
        &self,
        actor: &Actor,
        text: &str,
    ) -> MilestoneServiceResult<Milestone> {
        if let Err(denied) = require_role(actor, Role::Staff, "create milestones") {
            tracing::warn!(actor = %actor.id(), role = %actor.role(), "milestone creation denied");
            return Err(denied.into());
        }
        let milestone = Milestone::new(MilestoneText::new(text)?, actor.id(), &*self.clock);
        self.repository.store(&milestone).await?;
        tracing::info!(milestone_id = %milestone.id(), actor = %actor.id(), "milestone created");
        Ok(milestone)
    }

    /// Lists every milestone, newest first.
    ///
    /// # Errors
    ///
    /// Returns a repository or directory error.
    pub async fn list_milestones(&self) -> MilestoneServiceResult<Vec<MilestoneView>> {
        let mut milestones = self.repository.list().await?;
        milestones.sort_by_key(|milestone| Reverse(milestone.created_at()));

        let mut names: HashMap<UserId, Option<String>> = HashMap::new();
        let mut views = Vec::with_capacity(milestones.len());
        for milestone in milestones {
            let author = milestone.created_by();
            let staff_name = match names.get(&author).cloned() {
                Some(name) => name,
                None => {
                    let name = self
                        .users
                        .resolve_user(author)
                        .await?
                        .map(|profile| profile.name);
                    names.insert(author, name.clone());
                    name
                }
            };
            views.push(MilestoneView {
                id: milestone.id(),
                milestone: milestone.milestone().as_str().to_owned(),
                created_by: author,
                created_at: milestone.created_at(),
                staff_name,
            });
        }
        Ok(views)
    }
}
