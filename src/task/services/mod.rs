//! Application services for task lifecycle orchestration.

mod comments;
mod error;
mod lifecycle;
mod queries;
mod requests;
mod views;

pub use error::{TaskLifecycleError, TaskLifecycleResult};
pub use lifecycle::TaskLifecycleService;
pub use requests::{ApproveCompletionRequest, CreateTaskRequest, DeadlineInput, EditTaskRequest};
pub use views::{CommentView, TaskView, UserSummary};
