//! Domain model for the task lifecycle.
//!
//! The task domain models the assigner/receiver workflow: validated task
//! fields, the status transition table, the authorization guard and the
//! append-only comment log. Infrastructure concerns stay outside the domain
//! boundary.

mod comment;
mod deadline;
mod error;
mod guard;
mod ids;
mod status;
mod task;
mod text;

pub use comment::{Comment, CommentContent};
pub use deadline::Deadline;
pub use error::{ParseTaskStatusError, TaskDomainError};
pub use guard::{AuthorizationError, Permission, ReadScope, TaskAction, authorize, require_role};
pub use ids::{TaskId, TaskVersion};
pub use status::{TaskStatus, Transition};
pub use task::{NewTask, Task, TaskEdit};
pub use text::{Remark, TaskDescription, TaskTitle};
