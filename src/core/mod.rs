//! Core rule types.
//!
//! This module contains the building blocks of a rule tree:
//! - Self-check capabilities via the `Check` and `AsyncCheck` traits
//! - The `Rule` entity with its outcome, callbacks and successor groups
//! - Read-only introspection of successor trees
//!
//! Executing a tree is the job of the [`engine`](crate::engine) module.

mod check;
mod error;
mod outcome;
pub(crate) mod rule;
mod successor;

pub use check::{AsyncCheck, AsyncFnCheck, Check, FnCheck, Verdict};
pub use error::RuleError;
pub use outcome::{Failure, Outcome};
pub use rule::Rule;
pub use successor::{SuccessorContainer, SuccessorGroup, Walk};
