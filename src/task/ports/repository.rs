//! Repository port for task persistence and lookup.

use crate::identity::domain::UserId;
use crate::task::domain::{Task, TaskId, TaskStatus, TaskVersion};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
///
/// Implementations must make [`TaskRepository::update`] an atomic
/// compare-and-swap on the stored revision so that concurrent writers to the
/// same task cannot both succeed.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the task ID already
    /// exists.
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Replaces an existing task if its stored revision is still
    /// `expected_version`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist
    /// or [`TaskRepositoryError::VersionConflict`] when another write landed
    /// first.
    async fn update(&self, task: &Task, expected_version: TaskVersion) -> TaskRepositoryResult<()>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Returns every task matching `filter`, in unspecified order.
    async fn query(&self, filter: &TaskFilter) -> TaskRepositoryResult<Vec<Task>>;

    /// Removes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()>;
}

/// Conjunctive task predicate; unset criteria match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    assigner: Option<UserId>,
    receiver: Option<UserId>,
    participant: Option<UserId>,
    status: Option<TaskStatus>,
}

impl TaskFilter {
    /// Creates a filter matching every task.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Restricts to tasks created by `user`.
    #[must_use]
    pub const fn assigned_by(mut self, user: UserId) -> Self {
        self.assigner = Some(user);
        self
    }

    /// Restricts to tasks currently held by `user`.
    #[must_use]
    pub const fn received_by(mut self, user: UserId) -> Self {
        self.receiver = Some(user);
        self
    }

    /// Restricts to tasks where `user` is assigner or receiver.
    #[must_use]
    pub const fn involving(mut self, user: UserId) -> Self {
        self.participant = Some(user);
        self
    }

    /// Restricts to tasks in `status`.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Returns `true` when `task` satisfies every set criterion.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        self.assigner.is_none_or(|user| task.assigner() == user)
            && self.receiver.is_none_or(|user| task.receiver() == user)
            && self.participant.is_none_or(|user| task.is_participant(user))
            && self.status.is_none_or(|status| task.status() == status)
    }
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The stored revision moved on since the task was loaded.
    #[error("task {task_id} was modified concurrently: expected {expected}, found {actual}")]
    VersionConflict {
        /// Contended task.
        task_id: TaskId,
        /// Revision the writer loaded.
        expected: TaskVersion,
        /// Revision currently stored.
        actual: TaskVersion,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
