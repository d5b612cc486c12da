//! Results surfaced to the caller of a command.

use crate::core::Failure;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single failure reported by a command: a message plus an optional
/// association naming what failed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub message: String,
    pub association: Option<String>,
}

impl ValidationResult {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            association: None,
        }
    }

    pub fn associated(message: impl Into<String>, association: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            association: Some(association.into()),
        }
    }
}

impl From<&Failure> for ValidationResult {
    fn from(failure: &Failure) -> Self {
        Self {
            message: failure.message.clone(),
            association: failure.association.clone(),
        }
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.association {
            Some(association) => write!(f, "{association}: {}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

/// Outcome of running a command.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExecutionResult<T> {
    pub success: bool,
    pub value: Option<T>,
    pub errors: Vec<ValidationResult>,
}

impl<T> ExecutionResult<T> {
    pub fn succeeded(value: T) -> Self {
        Self {
            success: true,
            value: Some(value),
            errors: Vec::new(),
        }
    }

    pub fn failed(errors: Vec<ValidationResult>) -> Self {
        Self {
            success: false,
            value: None,
            errors,
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }
}
