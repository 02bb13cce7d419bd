//! Service layer for task creation and lifecycle transitions.
//!
//! Every operation follows the same shape: load the task, run the guard,
//! validate input, compute the next state on a copy, then persist with an
//! optimistic revision check. Nothing is written until all checks pass.

use super::{
    error::{TaskLifecycleError, TaskLifecycleResult},
    requests::{ApproveCompletionRequest, CreateTaskRequest, EditTaskRequest},
};
use crate::config::EngineConfig;
use crate::identity::{
    domain::{Actor, UserId},
    ports::UserDirectory,
};
use crate::task::{
    domain::{NewTask, Task, TaskAction, TaskId, TaskVersion, authorize},
    ports::{TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;

/// Task lifecycle orchestration service.
#[derive(Clone)]
pub struct TaskLifecycleService<R, U, C>
where
    R: TaskRepository,
    U: UserDirectory,
    C: Clock + Send + Sync,
{
    pub(super) repository: Arc<R>,
    pub(super) users: Arc<U>,
    pub(super) clock: Arc<C>,
    pub(super) config: EngineConfig,
}

impl<R, U, C> TaskLifecycleService<R, U, C>
where
    R: TaskRepository,
    U: UserDirectory,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service with default configuration.
    #[must_use]
    pub fn new(repository: Arc<R>, users: Arc<U>, clock: Arc<C>) -> Self {
        Self {
            repository,
            users,
            clock,
            config: EngineConfig::default(),
        }
    }

    /// Replaces the engine configuration.
    #[must_use]
    pub const fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Creates a `pending` task with `actor` as its assigner.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Domain`] for invalid fields or a
    /// deadline that is not in the future,
    /// [`TaskLifecycleError::UserNotFound`] when the receiver does not exist,
    /// or [`TaskLifecycleError::Repository`] when persistence fails.
    pub async fn create_task(
        &self,
        actor: &Actor,
        request: CreateTaskRequest,
    ) -> TaskLifecycleResult<Task> {
        let receiver = request.receiver();
        let fields = request.into_fields(self.clock.utc(), self.config.min_deadline_lead())?;
        self.require_user(receiver).await?;

        let task = Task::new(
            NewTask {
                title: fields.title,
                description: fields.description,
                assigner: actor.id(),
                receiver,
                deadline: fields.deadline,
                remark: fields.remark,
            },
            &*self.clock,
        );
        self.repository.store(&task).await?;
        tracing::info!(
            task_id = %task.id(),
            assigner = %actor.id(),
            receiver = %receiver,
            "task assigned"
        );
        Ok(task)
    }

    /// Receiver acknowledges the task, moving it to `inProgress`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::TaskNotFound`],
    /// [`TaskLifecycleError::Unauthorized`] for anyone but the receiver, or
    /// [`TaskLifecycleError::Repository`] on a concurrent write.
    pub async fn accept_task(&self, actor: &Actor, id: TaskId) -> TaskLifecycleResult<Task> {
        let mut task = self.load_for(actor, id, TaskAction::Accept).await?;
        let expected = task.version();
        task.accept(&*self.clock);
        self.save(&task, expected, actor, "task accepted").await?;
        Ok(task)
    }

    /// Assigner edits title, description, remark or deadline.
    ///
    /// An empty edit returns the task unchanged without writing.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::TaskNotFound`],
    /// [`TaskLifecycleError::Unauthorized`] for anyone but the assigner,
    /// [`TaskLifecycleError::Domain`] for empty text or an invalid deadline,
    /// or [`TaskLifecycleError::Repository`] on a concurrent write.
    pub async fn edit_task(
        &self,
        actor: &Actor,
        id: TaskId,
        request: EditTaskRequest,
    ) -> TaskLifecycleResult<Task> {
        let mut task = self.load_for(actor, id, TaskAction::Edit).await?;
        let edit = request.validate(self.clock.utc(), self.config.min_deadline_lead())?;
        let expected = task.version();
        if task.apply_edit(edit, &*self.clock) {
            self.save(&task, expected, actor, "task edited").await?;
        }
        Ok(task)
    }

    /// Assigner hands the task to `new_receiver`, resetting it to `pending`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::TaskNotFound`],
    /// [`TaskLifecycleError::Unauthorized`] for anyone but the assigner,
    /// [`TaskLifecycleError::UserNotFound`] when the new receiver does not
    /// exist, or [`TaskLifecycleError::Repository`] on a concurrent write.
    pub async fn reassign_task(
        &self,
        actor: &Actor,
        id: TaskId,
        new_receiver: UserId,
    ) -> TaskLifecycleResult<Task> {
        let mut task = self.load_for(actor, id, TaskAction::Reassign).await?;
        self.require_user(new_receiver).await?;
        let expected = task.version();
        task.reassign(new_receiver, &*self.clock);
        self.save(&task, expected, actor, "task reassigned").await?;
        Ok(task)
    }

    /// Receiver reports the task as done.
    ///
    /// Repeating the call on a completed task succeeds without writing and
    /// keeps the original completion time.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::TaskNotFound`],
    /// [`TaskLifecycleError::Unauthorized`] for anyone but the receiver, or
    /// [`TaskLifecycleError::Repository`] on a concurrent write.
    pub async fn mark_complete(&self, actor: &Actor, id: TaskId) -> TaskLifecycleResult<Task> {
        let mut task = self.load_for(actor, id, TaskAction::MarkComplete).await?;
        let expected = task.version();
        if task.mark_complete(&*self.clock) {
            self.save(&task, expected, actor, "task marked complete")
                .await?;
        } else {
            tracing::debug!(task_id = %id, "task already completed");
        }
        Ok(task)
    }

    /// Assigner approves or rejects the reported completion.
    ///
    /// Approval yields `approved`; rejection yields `pending`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::TaskNotFound`],
    /// [`TaskLifecycleError::Unauthorized`] for anyone but the assigner,
    /// [`TaskLifecycleError::Domain`] for a blank remark, or
    /// [`TaskLifecycleError::Repository`] on a concurrent write.
    pub async fn approve_completion(
        &self,
        actor: &Actor,
        id: TaskId,
        request: ApproveCompletionRequest,
    ) -> TaskLifecycleResult<Task> {
        let mut task = self
            .load_for(actor, id, TaskAction::ApproveCompletion)
            .await?;
        let remark = request.remark()?;
        let expected = task.version();
        task.review(request.is_approved(), remark, &*self.clock);
        let message = if request.is_approved() {
            "task approved"
        } else {
            "task completion rejected"
        };
        self.save(&task, expected, actor, message).await?;
        Ok(task)
    }

    /// Assigner removes the task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::TaskNotFound`],
    /// [`TaskLifecycleError::Unauthorized`] for anyone but the assigner, or
    /// [`TaskLifecycleError::Repository`] when persistence fails.
    pub async fn delete_task(&self, actor: &Actor, id: TaskId) -> TaskLifecycleResult<()> {
        self.load_for(actor, id, TaskAction::Delete).await?;
        self.repository
            .delete(id)
            .await
            .map_err(|err| match err {
                TaskRepositoryError::NotFound(missing) => TaskLifecycleError::TaskNotFound(missing),
                other => other.into(),
            })?;
        tracing::info!(task_id = %id, actor = %actor.id(), "task deleted");
        Ok(())
    }

    /// Loads a task and checks that `actor` may perform `action` on it.
    pub(super) async fn load_for(
        &self,
        actor: &Actor,
        id: TaskId,
        action: TaskAction,
    ) -> TaskLifecycleResult<Task> {
        let task = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(TaskLifecycleError::TaskNotFound(id))?;
        if let Err(denied) = authorize(actor, &task, action, self.config.comment_read_scope) {
            tracing::warn!(
                task_id = %id,
                actor = %actor.id(),
                action = %action,
                "task action denied"
            );
            return Err(denied.into());
        }
        Ok(task)
    }

    /// Persists a mutated task if nobody else wrote it since it was loaded.
    pub(super) async fn save(
        &self,
        task: &Task,
        expected: TaskVersion,
        actor: &Actor,
        message: &'static str,
    ) -> TaskLifecycleResult<()> {
        match self.repository.update(task, expected).await {
            Ok(()) => {
                tracing::info!(
                    task_id = %task.id(),
                    actor = %actor.id(),
                    status = %task.status(),
                    version = %task.version(),
                    "{message}"
                );
                Ok(())
            }
            Err(TaskRepositoryError::NotFound(missing)) => {
                Err(TaskLifecycleError::TaskNotFound(missing))
            }
            Err(err) => {
                if matches!(err, TaskRepositoryError::VersionConflict { .. }) {
                    tracing::warn!(task_id = %task.id(), error = %err, "task write lost race");
                }
                Err(err.into())
            }
        }
    }

    async fn require_user(&self, id: UserId) -> TaskLifecycleResult<()> {
        match self.users.resolve_user(id).await? {
            Some(_) => Ok(()),
            None => Err(TaskLifecycleError::UserNotFound(id)),
        }
    }
}
