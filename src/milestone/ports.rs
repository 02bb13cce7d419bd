//! Repository port for milestone persistence.

use super::domain::{Milestone, MilestoneId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for milestone repository operations.
pub type MilestoneRepositoryResult<T> = Result<T, MilestoneRepositoryError>;

/// Milestone persistence contract.
#[async_trait]
pub trait MilestoneRepository: Send + Sync {
    /// Stores a new milestone.
    ///
    /// # Errors
    ///
    /// Returns [`MilestoneRepositoryError::DuplicateMilestone`] when the ID
    /// already exists.
    async fn store(&self, milestone: &Milestone) -> MilestoneRepositoryResult<()>;

    /// Returns every milestone in unspecified order.
    async fn list(&self) -> MilestoneRepositoryResult<Vec<Milestone>>;
}

/// Errors returned by milestone repository implementations.
#[derive(Debug, Clone, Error)]
pub enum MilestoneRepositoryError {
    /// A milestone with the same identifier already exists.
    #[error("duplicate milestone identifier: {0}")]
    DuplicateMilestone(MilestoneId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl MilestoneRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
