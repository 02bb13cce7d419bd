//! Comment log operations.

use super::{
    TaskLifecycleService,
    error::TaskLifecycleResult,
    views::{CommentView, ProfileCache},
};
use crate::identity::{domain::Actor, ports::UserDirectory};
use crate::task::{
    domain::{Comment, CommentContent, TaskAction, TaskId},
    ports::TaskRepository,
};
use mockable::Clock;

impl<R, U, C> TaskLifecycleService<R, U, C>
where
    R: TaskRepository,
    U: UserDirectory,
    C: Clock + Send + Sync,
{
    /// Appends a comment from `actor` and returns it with the author
    /// resolved.
    ///
    /// # Errors
    ///
    /// Returns [`super::TaskLifecycleError::Domain`] for blank or oversized
    /// content, [`super::TaskLifecycleError::TaskNotFound`],
    /// [`super::TaskLifecycleError::Unauthorized`] for non-participants,
    /// [`super::TaskLifecycleError::Directory`] when the author cannot be
    /// resolved, or a repository error on a concurrent write. The comment is
    /// only stored when the call succeeds.
    pub async fn add_comment(
        &self,
        actor: &Actor,
        id: TaskId,
        content: &str,
    ) -> TaskLifecycleResult<CommentView> {
        let body = CommentContent::new(content, self.config.max_comment_length)?;
        let mut task = self.load_for(actor, id, TaskAction::AddComment).await?;
        let author = ProfileCache::new(&*self.users).summary(actor.id()).await?;
        let expected = task.version();
        let comment = Comment::new(body, actor.id(), self.clock.utc());
        let stored = task.add_comment(comment, &*self.clock);
        self.save(&task, expected, actor, "comment added").await?;
        Ok(CommentView::authored(&stored, author))
    }

    /// Returns the task's comments in the order they were posted.
    ///
    /// # Errors
    ///
    /// Returns [`super::TaskLifecycleError::TaskNotFound`],
    /// [`super::TaskLifecycleError::Unauthorized`] when the actor may not
    /// read comments under the configured read scope, or a
    /// repository/directory error.
    pub async fn comments(&self, actor: &Actor, id: TaskId) -> TaskLifecycleResult<Vec<CommentView>> {
        let task = self.load_for(actor, id, TaskAction::ReadComments).await?;
        let mut cache = ProfileCache::new(&*self.users);
        let mut views = Vec::with_capacity(task.comments().len());
        for comment in task.comments() {
            views.push(cache.comment_view(comment).await?);
        }
        Ok(views)
    }
}
