//! Rulechain: composable validation rules with short-circuiting successors
//!
//! Business and validation logic is written as small, individually testable
//! rules. A rule may own groups of successor rules that only run when it
//! passes, so rules chain into trees. The first failure anywhere in a tree
//! stops the rest of that tree and is reported on the root, together with an
//! optional association naming what failed.
//!
//! # Core Concepts
//!
//! - **Rule**: a pass/fail check plus successor groups and callbacks
//! - **Engine**: one depth-first traversal, with blocking and async entry points
//! - **Command**: runs top-level rules before an action and maps the outcome
//!
//! # Example
//!
//! ```rust
//! use rulechain::core::{Check, Rule, Verdict};
//!
//! struct MinimumAge(u32);
//!
//! impl Check for MinimumAge {
//!     fn check(&mut self, verdict: &mut Verdict) {
//!         if self.0 < 18 {
//!             verdict.invalidate_with("Must be at least 18", "Age");
//!         }
//!     }
//! }
//!
//! let mut rule = Rule::from_fn("HasAccount", || Ok(()))
//!     .if_valid_then_validate([Rule::new(MinimumAge(16))])
//!     .unwrap();
//!
//! rule.execute();
//!
//! assert!(!rule.is_valid());
//! assert_eq!(rule.error_message(), Some("Must be at least 18"));
//! assert_eq!(rule.association(), Some("Age"));
//! ```

pub mod command;
pub mod core;
pub mod engine;

// Re-export commonly used types
pub use command::{Command, CommandBuilder, ExecutionResult, ValidationResult};
pub use core::{AsyncCheck, Check, Failure, Rule, Verdict};
pub use engine::{ExecutionConfig, SuccessCallbackPolicy};
