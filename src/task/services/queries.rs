//! Read-side task listings.

use super::{
    TaskLifecycleService,
    error::TaskLifecycleResult,
    views::{ProfileCache, TaskView},
};
use crate::identity::{domain::Actor, ports::UserDirectory};
use crate::task::{
    domain::{Task, TaskAction, TaskId, TaskStatus, authorize},
    ports::{TaskFilter, TaskRepository},
};
use mockable::Clock;
use std::cmp::Reverse;

impl<R, U, C> TaskLifecycleService<R, U, C>
where
    R: TaskRepository,
    U: UserDirectory,
    C: Clock + Send + Sync,
{
    /// Returns a single task.
    ///
    /// # Errors
    ///
    /// Returns [`super::TaskLifecycleError::TaskNotFound`] when absent,
    /// [`super::TaskLifecycleError::Unauthorized`] when the actor may not
    /// read it under the configured read scope, or a repository/directory
    /// error.
    pub async fn find_task(&self, actor: &Actor, id: TaskId) -> TaskLifecycleResult<TaskView> {
        let task = self.load_for(actor, id, TaskAction::View).await?;
        tracing::debug!(task_id = %id, actor = %actor.id(), "task fetched");
        Ok(ProfileCache::new(&*self.users).task_view(&task).await?)
    }

    /// Returns every task the actor assigned or received, newest first.
    ///
    /// # Errors
    ///
    /// Returns a repository or directory error.
    pub async fn tasks_for_user(&self, actor: &Actor) -> TaskLifecycleResult<Vec<TaskView>> {
        let mut tasks = self
            .repository
            .query(&TaskFilter::all().involving(actor.id()))
            .await?;
        tasks.sort_by_key(|task| Reverse(task.created_at()));
        self.views(tasks).await
    }

    /// Returns the tasks the actor has accepted and is working on, newest
    /// first.
    ///
    /// # Errors
    ///
    /// Returns a repository or directory error.
    pub async fn accepted_tasks(&self, actor: &Actor) -> TaskLifecycleResult<Vec<TaskView>> {
        let filter = TaskFilter::all()
            .received_by(actor.id())
            .with_status(TaskStatus::InProgress);
        let mut tasks = self.repository.query(&filter).await?;
        tasks.sort_by_key(|task| Reverse(task.created_at()));
        self.views(tasks).await
    }

    /// Returns the actor's completed tasks, most recently completed first.
    ///
    /// # Errors
    ///
    /// Returns a repository or directory error.
    pub async fn my_completed_tasks(&self, actor: &Actor) -> TaskLifecycleResult<Vec<TaskView>> {
        let filter = TaskFilter::all()
            .received_by(actor.id())
            .with_status(TaskStatus::Completed);
        let tasks = self.repository.query(&filter).await?;
        self.views(by_completion(tasks)).await
    }

    /// Returns every completed task the actor may view, most recently
    /// completed first.
    ///
    /// Under [`ReadScope::Participants`](crate::task::domain::ReadScope)
    /// only tasks the actor assigned or received are listed; an open read
    /// scope lists every completed task.
    ///
    /// # Errors
    ///
    /// Returns a repository or directory error.
    pub async fn all_completed_tasks(&self, actor: &Actor) -> TaskLifecycleResult<Vec<TaskView>> {
        let filter = TaskFilter::all().with_status(TaskStatus::Completed);
        let scope = self.config.comment_read_scope;
        let visible = self
            .repository
            .query(&filter)
            .await?
            .into_iter()
            .filter(|task| authorize(actor, task, TaskAction::View, scope).is_ok())
            .collect();
        self.views(by_completion(visible)).await
    }

    /// Returns the tasks the actor assigned, latest deadline first.
    ///
    /// # Errors
    ///
    /// Returns a repository or directory error.
    pub async fn assigned_tasks(&self, actor: &Actor) -> TaskLifecycleResult<Vec<TaskView>> {
        let mut tasks = self
            .repository
            .query(&TaskFilter::all().assigned_by(actor.id()))
            .await?;
        tasks.sort_by_key(|task| Reverse(task.deadline()));
        self.views(tasks).await
    }

    async fn views(&self, tasks: Vec<Task>) -> TaskLifecycleResult<Vec<TaskView>> {
        let mut cache = ProfileCache::new(&*self.users);
        let mut views = Vec::with_capacity(tasks.len());
        for task in &tasks {
            views.push(cache.task_view(task).await?);
        }
        Ok(views)
    }
}

/// Keeps tasks with a completion time, most recent first.
fn by_completion(tasks: Vec<Task>) -> Vec<Task> {
    let mut completed: Vec<Task> = tasks
        .into_iter()
        .filter(|task| task.completed_at().is_some())
        .collect();
    completed.sort_by_key(|task| Reverse(task.completed_at()));
    completed
}
