//! Observable result state of a rule.

use serde::{Deserialize, Serialize};

/// Details of a failed validation: the error message and an optional
/// association naming the subject of the failure (typically a field).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Failure {
    pub message: String,
    pub association: Option<String>,
}

impl Failure {
    /// Create a failure with no association.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            association: None,
        }
    }

    /// Create a failure tagged with an association.
    pub fn associated(message: impl Into<String>, association: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            association: Some(association.into()),
        }
    }
}

/// Result state of a rule.
///
/// A rule is valid exactly when it carries no [`Failure`], so a valid
/// outcome can never hold an error message or association. Before the
/// first execution an outcome is valid.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    failure: Option<Failure>,
}

impl Outcome {
    /// A passing outcome.
    pub fn valid() -> Self {
        Self { failure: None }
    }

    /// A failing outcome carrying `failure`.
    pub fn invalid(failure: Failure) -> Self {
        Self {
            failure: Some(failure),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.failure.is_none()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.failure.as_ref().map(|f| f.message.as_str())
    }

    pub fn association(&self) -> Option<&str> {
        self.failure.as_ref().and_then(|f| f.association.as_deref())
    }

    pub fn failure(&self) -> Option<&Failure> {
        self.failure.as_ref()
    }

    /// Optimistic reset at the start of an execution.
    pub(crate) fn reset(&mut self) {
        self.failure = None;
    }

    /// Mark invalid. Once invalid, the first failure is kept.
    pub(crate) fn fail(&mut self, failure: Failure) {
        if self.failure.is_none() {
            self.failure = Some(failure);
        }
    }
}
