//! Request payloads accepted by the task lifecycle service.
//!
//! Requests carry raw caller input; the service validates it into domain
//! values before any state is touched.

use crate::identity::domain::UserId;
use crate::task::domain::{
    Deadline, Remark, TaskDescription, TaskDomainError, TaskEdit, TaskTitle,
};
use chrono::{DateTime, Duration, Utc};

/// A deadline as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeadlineInput {
    /// Textual date or timestamp still to be parsed.
    Text(String),
    /// Already-parsed point in time.
    At(DateTime<Utc>),
}

impl DeadlineInput {
    pub(super) fn validate(
        &self,
        now: DateTime<Utc>,
        min_lead: Duration,
    ) -> Result<Deadline, TaskDomainError> {
        match self {
            Self::Text(raw) => Deadline::parse(raw, now, min_lead),
            Self::At(at) => Deadline::new(*at, now, min_lead),
        }
    }
}

impl From<String> for DeadlineInput {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for DeadlineInput {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<DateTime<Utc>> for DeadlineInput {
    fn from(value: DateTime<Utc>) -> Self {
        Self::At(value)
    }
}

/// Request payload for assigning a new task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    description: String,
    receiver: UserId,
    deadline: DeadlineInput,
    remark: Option<String>,
}

impl CreateTaskRequest {
    /// Creates a request with the required fields.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        receiver: UserId,
        deadline: impl Into<DeadlineInput>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            receiver,
            deadline: deadline.into(),
            remark: None,
        }
    }

    /// Sets an initial remark.
    #[must_use]
    pub fn with_remark(mut self, remark: impl Into<String>) -> Self {
        self.remark = Some(remark.into());
        self
    }

    /// Returns the requested receiver.
    #[must_use]
    pub const fn receiver(&self) -> UserId {
        self.receiver
    }

    pub(super) fn into_fields(
        self,
        now: DateTime<Utc>,
        min_lead: Duration,
    ) -> Result<ValidatedCreate, TaskDomainError> {
        Ok(ValidatedCreate {
            title: TaskTitle::new(&self.title)?,
            description: TaskDescription::new(&self.description)?,
            remark: self.remark.as_deref().map(Remark::new).transpose()?,
            deadline: self.deadline.validate(now, min_lead)?,
        })
    }
}

/// Validated subset of a [`CreateTaskRequest`].
pub(super) struct ValidatedCreate {
    pub(super) title: TaskTitle,
    pub(super) description: TaskDescription,
    pub(super) remark: Option<Remark>,
    pub(super) deadline: Deadline,
}

/// Request payload for assigner edits; unset fields stay unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditTaskRequest {
    title: Option<String>,
    description: Option<String>,
    remark: Option<String>,
    deadline: Option<DeadlineInput>,
}

impl EditTaskRequest {
    /// Creates an empty edit.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replaces the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replaces the remark.
    #[must_use]
    pub fn with_remark(mut self, remark: impl Into<String>) -> Self {
        self.remark = Some(remark.into());
        self
    }

    /// Replaces the deadline.
    #[must_use]
    pub fn with_deadline(mut self, deadline: impl Into<DeadlineInput>) -> Self {
        self.deadline = Some(deadline.into());
        self
    }

    pub(super) fn validate(
        &self,
        now: DateTime<Utc>,
        min_lead: Duration,
    ) -> Result<TaskEdit, TaskDomainError> {
        Ok(TaskEdit {
            title: self.title.as_deref().map(TaskTitle::new).transpose()?,
            description: self
                .description
                .as_deref()
                .map(TaskDescription::new)
                .transpose()?,
            remark: self.remark.as_deref().map(Remark::new).transpose()?,
            deadline: self
                .deadline
                .as_ref()
                .map(|input| input.validate(now, min_lead))
                .transpose()?,
        })
    }
}

/// Request payload for the assigner's verdict on a completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApproveCompletionRequest {
    is_approved: bool,
    remark: Option<String>,
}

impl ApproveCompletionRequest {
    /// Approves the completion.
    #[must_use]
    pub const fn approve() -> Self {
        Self {
            is_approved: true,
            remark: None,
        }
    }

    /// Rejects the completion, sending the task back to `pending`.
    #[must_use]
    pub const fn reject() -> Self {
        Self {
            is_approved: false,
            remark: None,
        }
    }

    /// Attaches a remark; it replaces any existing remark.
    #[must_use]
    pub fn with_remark(mut self, remark: impl Into<String>) -> Self {
        self.remark = Some(remark.into());
        self
    }

    /// Returns whether the completion is approved.
    #[must_use]
    pub const fn is_approved(&self) -> bool {
        self.is_approved
    }

    pub(super) fn remark(&self) -> Result<Option<Remark>, TaskDomainError> {
        self.remark.as_deref().map(Remark::new).transpose()
    }
}
