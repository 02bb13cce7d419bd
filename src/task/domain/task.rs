//! Task aggregate root.

use super::{
    Comment, Deadline, Remark, TaskDescription, TaskId, TaskStatus, TaskTitle, TaskVersion,
    Transition,
};
use crate::identity::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Task aggregate root.
///
/// `assigner` is fixed at creation. `status` only changes through the
/// lifecycle methods below, and `comments` only grows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    id: TaskId,
    title: TaskTitle,
    description: TaskDescription,
    assigner: UserId,
    receiver: UserId,
    deadline: Deadline,
    status: TaskStatus,
    remark: Option<Remark>,
    comments: Vec<Comment>,
    completed_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    version: TaskVersion,
}

/// Validated fields for a task about to be created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    /// Task headline.
    pub title: TaskTitle,
    /// Task body.
    pub description: TaskDescription,
    /// Creating user; becomes the immutable assigner.
    pub assigner: UserId,
    /// User responsible for the work.
    pub receiver: UserId,
    /// Validated future deadline.
    pub deadline: Deadline,
    /// Optional initial remark.
    pub remark: Option<Remark>,
}

/// Field-level changes requested by the assigner.
///
/// `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskEdit {
    /// Replacement title.
    pub title: Option<TaskTitle>,
    /// Replacement description.
    pub description: Option<TaskDescription>,
    /// Replacement remark.
    pub remark: Option<Remark>,
    /// Replacement deadline.
    pub deadline: Option<Deadline>,
}

impl TaskEdit {
    /// Returns `true` when no field would change.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.remark.is_none()
            && self.deadline.is_none()
    }
}

impl Task {
    /// Creates a new `Pending` task.
    #[must_use]
    pub fn new(fields: NewTask, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        let NewTask {
            title,
            description,
            assigner,
            receiver,
            deadline,
            remark,
        } = fields;

        Self {
            id: TaskId::new(),
            title,
            description,
            assigner,
            receiver,
            deadline,
            status: TaskStatus::Pending,
            remark,
            comments: Vec::new(),
            completed_at: None,
            created_at: timestamp,
            updated_at: timestamp,
            version: TaskVersion::INITIAL,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub const fn description(&self) -> &TaskDescription {
        &self.description
    }

    /// Returns the user who created the task.
    #[must_use]
    pub const fn assigner(&self) -> UserId {
        self.assigner
    }

    /// Returns the user currently responsible for the task.
    #[must_use]
    pub const fn receiver(&self) -> UserId {
        self.receiver
    }

    /// Returns the deadline.
    #[must_use]
    pub const fn deadline(&self) -> Deadline {
        self.deadline
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the assigner's remark, if any.
    #[must_use]
    pub const fn remark(&self) -> Option<&Remark> {
        self.remark.as_ref()
    }

    /// Returns the comment log in insertion order.
    #[must_use]
    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    /// Returns when the task last entered `Completed`.
    ///
    /// Rejection and reassignment leave this untouched; it records history,
    /// not the current status.
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the current revision.
    #[must_use]
    pub const fn version(&self) -> TaskVersion {
        self.version
    }

    /// Returns `true` when `user` is the assigner or the current receiver.
    #[must_use]
    pub fn is_participant(&self, user: UserId) -> bool {
        self.assigner == user || self.receiver == user
    }

    /// Moves the task to `InProgress`.
    pub fn accept(&mut self, clock: &impl Clock) {
        self.apply(Transition::Accept, clock);
    }

    /// Moves the task to `Completed` and records the completion time.
    ///
    /// Repeating the call on a completed task changes nothing and returns
    /// `false`; the original `completed_at` is kept.
    pub fn mark_complete(&mut self, clock: &impl Clock) -> bool {
        if self.status == TaskStatus::Completed {
            return false;
        }
        self.apply(Transition::MarkComplete, clock);
        self.completed_at = Some(self.updated_at);
        true
    }

    /// Records the assigner's verdict on a reported completion.
    ///
    /// Approval moves the task to `Approved`; rejection sends it back to
    /// `Pending`. The remark is replaced either way.
    pub fn review(&mut self, approved: bool, remark: Option<Remark>, clock: &impl Clock) {
        let transition = if approved {
            Transition::Approve
        } else {
            Transition::Reject
        };
        self.remark = remark;
        self.apply(transition, clock);
    }

    /// Hands the task to `receiver` and resets it to `Pending`.
    ///
    /// Reassignment is allowed from every status and discards prior
    /// progress.
    pub fn reassign(&mut self, receiver: UserId, clock: &impl Clock) {
        self.receiver = receiver;
        self.apply(Transition::Reassign, clock);
    }

    /// Applies field-level edits without touching the status.
    ///
    /// Returns `false` when the edit was empty and nothing changed.
    pub fn apply_edit(&mut self, edit: TaskEdit, clock: &impl Clock) -> bool {
        if edit.is_empty() {
            return false;
        }
        let TaskEdit {
            title,
            description,
            remark,
            deadline,
        } = edit;
        if let Some(value) = title {
            self.title = value;
        }
        if let Some(value) = description {
            self.description = value;
        }
        if let Some(value) = remark {
            self.remark = Some(value);
        }
        if let Some(value) = deadline {
            self.deadline = value;
        }
        self.touch(clock);
        true
    }

    /// Appends a comment to the log and returns the stored entry.
    pub fn add_comment(&mut self, comment: Comment, clock: &impl Clock) -> Comment {
        self.comments.push(comment.clone());
        self.touch(clock);
        comment
    }

    fn apply(&mut self, transition: Transition, clock: &impl Clock) {
        self.status = self.status.after(transition);
        self.touch(clock);
    }

    /// Stamps `updated_at` and advances the revision.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
        self.version = self.version.next();
    }
}
