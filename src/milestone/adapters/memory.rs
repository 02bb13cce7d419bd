//! In-memory milestone repository.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::milestone::{
    domain::Milestone,
    ports::{MilestoneRepository, MilestoneRepositoryError, MilestoneRepositoryResult},
};

/// Thread-safe in-memory milestone repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMilestoneRepository {
    milestones: Arc<RwLock<Vec<Milestone>>>,
}

impl InMemoryMilestoneRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MilestoneRepository for InMemoryMilestoneRepository {
    async fn store(&self, milestone: &Milestone) -> MilestoneRepositoryResult<()> {
        let mut milestones = self.milestones.write().map_err(|err| {
            MilestoneRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if milestones.iter().any(|existing| existing.id() == milestone.id()) {
            return Err(MilestoneRepositoryError::DuplicateMilestone(milestone.id()));
        }
        milestones.push(milestone.clone());
        Ok(())
    }

    async fn list(&self) -> MilestoneRepositoryResult<Vec<Milestone>> {
        let milestones = self.milestones.read().map_err(|err| {
            MilestoneRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(milestones.clone())
    }
}
