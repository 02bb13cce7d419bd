//! Read models returned to callers, with user display fields resolved.

use crate::identity::{
    domain::{UserId, UserProfile},
    ports::{UserDirectory, UserDirectoryResult},
};
use crate::task::domain::{Comment, Deadline, Task, TaskId, TaskStatus};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;

/// User reference with display fields, when the directory knows the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserSummary {
    /// User identifier.
    pub id: UserId,
    /// Display name, `None` for users the directory no longer knows.
    pub name: Option<String>,
    /// Contact email, `None` for users the directory no longer knows.
    pub email: Option<String>,
}

impl UserSummary {
    fn resolved(id: UserId, profile: Option<&UserProfile>) -> Self {
        Self {
            id,
            name: profile.map(|p| p.name.clone()),
            email: profile.map(|p| p.email.clone()),
        }
    }
}

/// Task snapshot with assigner and receiver resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskView {
    /// Task identifier.
    pub id: TaskId,
    /// Title.
    pub title: String,
    /// Description.
    pub description: String,
    /// Lifecycle status.
    pub status: TaskStatus,
    /// Deadline.
    pub deadline: Deadline,
    /// Creating user.
    pub assigner: UserSummary,
    /// Responsible user.
    pub receiver: UserSummary,
    /// Assigner remark, if any.
    pub remark: Option<String>,
    /// When the task last entered `completed`.
    ///
    /// Kept after a rejection or reassignment, so a `pending` task may still
    /// carry the time of an earlier completion. Check `status` before
    /// treating the task as done.
    pub completed_at: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Latest modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Comment with its author resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentView {
    /// Comment body.
    pub content: String,
    /// Author.
    pub commented_by: UserSummary,
    /// Posting time.
    pub timestamp: DateTime<Utc>,
}

impl CommentView {
    pub(super) fn authored(comment: &Comment, commented_by: UserSummary) -> Self {
        Self {
            content: comment.content().as_str().to_owned(),
            commented_by,
            timestamp: comment.timestamp(),
        }
    }
}

/// Per-call memo of directory lookups.
pub(super) struct ProfileCache<'a, U: UserDirectory> {
    directory: &'a U,
    profiles: HashMap<UserId, Option<UserProfile>>,
}

impl<'a, U: UserDirectory> ProfileCache<'a, U> {
    pub(super) fn new(directory: &'a U) -> Self {
        Self {
            directory,
            profiles: HashMap::new(),
        }
    }

    pub(super) async fn summary(&mut self, id: UserId) -> UserDirectoryResult<UserSummary> {
        if let Some(profile) = self.profiles.get(&id) {
            return Ok(UserSummary::resolved(id, profile.as_ref()));
        }
        let profile = self.directory.resolve_user(id).await?;
        let summary = UserSummary::resolved(id, profile.as_ref());
        self.profiles.insert(id, profile);
        Ok(summary)
    }

    pub(super) async fn task_view(&mut self, task: &Task) -> UserDirectoryResult<TaskView> {
        Ok(TaskView {
            id: task.id(),
            title: task.title().to_string(),
            description: task.description().to_string(),
            status: task.status(),
            deadline: task.deadline(),
            assigner: self.summary(task.assigner()).await?,
            receiver: self.summary(task.receiver()).await?,
            remark: task.remark().map(ToString::to_string),
            completed_at: task.completed_at(),
            created_at: task.created_at(),
            updated_at: task.updated_at(),
        })
    }

    pub(super) async fn comment_view(&mut self, comment: &Comment) -> UserDirectoryResult<CommentView> {
        let author = self.summary(comment.commented_by()).await?;
        Ok(CommentView::authored(comment, author))
    }
}
