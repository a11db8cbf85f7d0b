//! User input value object.

use std::fmt;

use crate::domain::foundation::ValidationError;

/// Text submitted by the user; never blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserInput(String);

impl UserInput {
    /// Creates an input, rejecting empty or whitespace-only text.
    pub fn try_new(text: impl Into<String>) -> Result<Self, ValidationError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(ValidationError::empty_field("text"));
        }
        Ok(Self(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for UserInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
