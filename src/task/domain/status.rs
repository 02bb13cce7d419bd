//! Task status values and the transition table between them.

use super::ParseTaskStatusError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TaskStatus {
    /// Assigned but not yet acknowledged by the receiver.
    Pending,
    /// Accepted by the receiver and being worked on.
    InProgress,
    /// Reported complete by the receiver, awaiting review.
    Completed,
    /// Completion approved by the assigner.
    Approved,
}

/// A status-changing lifecycle step.
///
/// Field edits, comments and deletion never change status and therefore have
/// no variant here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transition {
    /// Receiver acknowledges the task.
    Accept,
    /// Receiver reports the work as done.
    MarkComplete,
    /// Assigner approves the reported completion.
    Approve,
    /// Assigner rejects the reported completion.
    Reject,
    /// Assigner hands the task to a different receiver.
    Reassign,
}

impl TaskStatus {
    /// All statuses in lifecycle order.
    pub const ALL: [Self; 4] = [
        Self::Pending,
        Self::InProgress,
        Self::Completed,
        Self::Approved,
    ];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "inProgress",
            Self::Completed => "completed",
            Self::Approved => "approved",
        }
    }

    /// Returns the status reached by applying `transition`.
    ///
    /// Transitions are gated by actor, not by the current status, so every
    /// transition is defined from every status. Rejection returns the task
    /// to `Pending` so the receiver must accept it again.
    #[must_use]
    pub const fn after(self, transition: Transition) -> Self {
        match transition {
            Transition::Accept => Self::InProgress,
            Transition::MarkComplete => Self::Completed,
            Transition::Approve => Self::Approved,
            Transition::Reject | Transition::Reassign => Self::Pending,
        }
    }

    /// Returns `true` for the terminal `Approved` status.
    ///
    /// A terminal task still reopens through reassignment or rejection.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Approved)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "pending" => Ok(Self::Pending),
            "inprogress" | "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "approved" => Ok(Self::Approved),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}
