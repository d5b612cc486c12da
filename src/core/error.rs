//! Errors raised when wiring rule trees.

use thiserror::Error;

/// Misuse detected while building a rule tree.
///
/// Ordinary validation failures are never reported through this type; they
/// live in the rule's [`Outcome`](super::Outcome).
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RuleError {
    #[error("Successor group attached to rule '{rule}' is empty. Supply at least one rule")]
    EmptySuccessorGroup { rule: String },
}
