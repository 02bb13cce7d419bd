//! Authorization guard for task actions.
//!
//! Permissions are a pure function of the action, the actor and the task's
//! `assigner`/`receiver` fields. The table in [`TaskAction::permission`] is
//! the single source of truth; services call [`authorize`] before touching
//! any state.

use super::{Task, TaskId};
use crate::identity::domain::{Actor, Role, UserId};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// An operation an actor may attempt on an existing task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskAction {
    /// Read the task itself.
    View,
    /// Change title, description, remark or deadline.
    Edit,
    /// Remove the task.
    Delete,
    /// Hand the task to another receiver.
    Reassign,
    /// Approve or reject a reported completion.
    ApproveCompletion,
    /// Acknowledge the task.
    Accept,
    /// Report the work as done.
    MarkComplete,
    /// Append to the comment log.
    AddComment,
    /// Read the comment log.
    ReadComments,
}

/// Relationship to the task an actor must hold for an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Permission {
    /// Only the task's assigner.
    Assigner,
    /// Only the task's current receiver.
    Receiver,
    /// The assigner or the current receiver.
    Participant,
    /// Participants, or anyone when reads are open (see [`ReadScope`]).
    Reader,
}

/// Who may read tasks and their comments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadScope {
    /// Only the assigner and current receiver.
    #[default]
    Participants,
    /// Any authenticated user.
    AnyAuthenticated,
}

impl TaskAction {
    /// Every action, for exhaustive permission checks.
    pub const ALL: [Self; 9] = [
        Self::View,
        Self::Edit,
        Self::Delete,
        Self::Reassign,
        Self::ApproveCompletion,
        Self::Accept,
        Self::MarkComplete,
        Self::AddComment,
        Self::ReadComments,
    ];

    /// Returns the relationship required to perform this action.
    #[must_use]
    pub const fn permission(self) -> Permission {
        match self {
            Self::Edit | Self::Delete | Self::Reassign | Self::ApproveCompletion => {
                Permission::Assigner
            }
            Self::Accept | Self::MarkComplete => Permission::Receiver,
            Self::AddComment => Permission::Participant,
            Self::View | Self::ReadComments => Permission::Reader,
        }
    }

    /// Returns a stable action name for errors and logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Edit => "edit",
            Self::Delete => "delete",
            Self::Reassign => "reassign",
            Self::ApproveCompletion => "approve_completion",
            Self::Accept => "accept",
            Self::MarkComplete => "mark_complete",
            Self::AddComment => "add_comment",
            Self::ReadComments => "read_comments",
        }
    }
}

impl fmt::Display for TaskAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Permission {
    /// Returns `true` when a user holding the given relationship qualifies.
    #[must_use]
    pub const fn admits(self, is_assigner: bool, is_receiver: bool, scope: ReadScope) -> bool {
        match self {
            Self::Assigner => is_assigner,
            Self::Receiver => is_receiver,
            Self::Participant => is_assigner || is_receiver,
            Self::Reader => {
                is_assigner || is_receiver || matches!(scope, ReadScope::AnyAuthenticated)
            }
        }
    }
}

/// Denial returned by the guard.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthorizationError {
    /// The actor lacks the relationship to the task the action requires.
    #[error("user {actor} may not {action} task {task_id}")]
    TaskAction {
        /// Denied user.
        actor: UserId,
        /// Attempted action.
        action: TaskAction,
        /// Target task.
        task_id: TaskId,
    },

    /// The actor's role does not permit the operation.
    #[error("role {role} may not {operation}")]
    Role {
        /// Denied user's role.
        role: Role,
        /// Attempted operation.
        operation: &'static str,
    },
}

/// Checks whether `actor` may perform `action` on `task`.
///
/// # Errors
///
/// Returns [`AuthorizationError::TaskAction`] when the actor does not hold
/// the relationship the action requires.
pub fn authorize(
    actor: &Actor,
    task: &Task,
    action: TaskAction,
    scope: ReadScope,
) -> Result<(), AuthorizationError> {
    let is_assigner = task.assigner() == actor.id();
    let is_receiver = task.receiver() == actor.id();
    if action.permission().admits(is_assigner, is_receiver, scope) {
        return Ok(());
    }
    Err(AuthorizationError::TaskAction {
        actor: actor.id(),
        action,
        task_id: task.id(),
    })
}

/// Checks a role-gated operation that is independent of any task.
///
/// # Errors
///
/// Returns [`AuthorizationError::Role`] when `actor` does not hold `required`.
pub fn require_role(
    actor: &Actor,
    required: Role,
    operation: &'static str,
) -> Result<(), AuthorizationError> {
    if actor.role() == required {
        return Ok(());
    }
    Err(AuthorizationError::Role {
        role: actor.role(),
        operation,
    })
}
