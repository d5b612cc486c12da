//! Error types for the command pipeline.

use std::error::Error as StdError;
use thiserror::Error;

/// Errors that can occur when building a command.
#[derive(Debug, Error, PartialEq)]
pub enum BuildError {
    #[error("Command action not specified. Call .action(effect) or .action_fn(f)")]
    MissingAction,
}

/// An expected, domain-level fault raised while a command runs its
/// initializer or action.
///
/// The command converts it into a failed [`ExecutionResult`](super::ExecutionResult)
/// carrying a single validation result with this message.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("{message}")]
pub struct DomainError {
    pub message: String,
}

impl DomainError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Failure of a command's initializer or action.
#[derive(Debug, Error)]
pub enum ActionError {
    /// Converted into a failed execution result.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Returned to the caller as [`CommandError::Unexpected`].
    #[error("{0}")]
    Unexpected(Box<dyn StdError + Send + Sync>),
}

impl ActionError {
    pub fn domain(message: impl Into<String>) -> Self {
        Self::Domain(DomainError::new(message))
    }

    pub fn unexpected<E>(error: E) -> Self
    where
        E: Into<Box<dyn StdError + Send + Sync>>,
    {
        Self::Unexpected(error.into())
    }
}

/// Errors a command returns instead of an execution result.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Command failed unexpectedly: {0}")]
    Unexpected(#[source] Box<dyn StdError + Send + Sync>),
}
