//! Validated free-text fields carried by tasks.

use super::TaskDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Trims `raw` and rejects the result when it is empty.
fn non_empty(field: &'static str, raw: &str) -> Result<String, TaskDomainError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(TaskDomainError::EmptyField { field });
    }
    Ok(trimmed.to_owned())
}

macro_rules! text_field {
    ($(#[$meta:meta])* $name:ident, $field:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Field name reported in validation errors.
            pub const FIELD: &'static str = $field;

            /// Creates the value from trimmed, non-empty text.
            ///
            /// # Errors
            ///
            /// Returns [`TaskDomainError::EmptyField`] when the value is
            /// empty after trimming.
            pub fn new(value: impl AsRef<str>) -> Result<Self, TaskDomainError> {
                non_empty(Self::FIELD, value.as_ref()).map(Self)
            }

            /// Returns the text as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = TaskDomainError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

text_field!(
    /// Short task headline.
    TaskTitle,
    "title"
);

text_field!(
    /// Body text describing the work to be done.
    TaskDescription,
    "description"
);

text_field!(
    /// Assigner note, usually left when reviewing a completion.
    Remark,
    "remark"
);
