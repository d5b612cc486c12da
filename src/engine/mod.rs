//! Rule execution engine.
//!
//! Executing a rule runs its own check and, if that passes, each successor
//! group in attachment order, one rule at a time. The first successor that
//! ends invalid stops the traversal and its message and association are
//! copied onto the parent. Callbacks fire once the rule's outcome is known.
//!
//! There is a single traversal algorithm. [`Rule::execute`] drives it to
//! completion on the calling thread, [`Rule::execute_async`] awaits it, so
//! both variants visit the same rules in the same order and leave the same
//! outcome behind.
//!
//! # Example
//!
//! ```rust
//! use rulechain::core::{Failure, Rule};
//! use rulechain::engine::{ExecutionConfig, SuccessCallbackPolicy};
//!
//! let mut rule = Rule::from_fn("A", || Ok(()))
//!     .if_valid_then_validate([Rule::from_fn("B", || Err(Failure::new("B failed")))])
//!     .unwrap();
//!
//! let config = ExecutionConfig::new().success_callback(SuccessCallbackPolicy::OnlyWhenValid);
//! rule.execute_with(&config);
//!
//! assert!(!rule.is_valid());
//! assert_eq!(rule.error_message(), Some("B failed"));
//! assert_eq!(rule.association(), None);
//! ```

mod callback;
mod traversal;

pub(crate) use callback::Callback;

use crate::core::Rule;

/// When a rule's success callback fires.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SuccessCallbackPolicy {
    /// Fire whenever the rule's own check passed, even if a successor then
    /// invalidated the rule. In that case the failure callback fires first.
    #[default]
    AfterTraversal,

    /// Fire only when the rule and all executed successors passed.
    OnlyWhenValid,
}

/// Settings applied to every rule in an executed tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionConfig {
    pub success_callback: SuccessCallbackPolicy,
}

impl ExecutionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set when success callbacks fire.
    pub fn success_callback(mut self, policy: SuccessCallbackPolicy) -> Self {
        self.success_callback = policy;
        self
    }
}

impl Rule {
    /// Execute this rule and its successors, blocking the calling thread
    /// until every check and callback has completed.
    ///
    /// Suspending checks and callbacks are driven on the calling thread by
    /// `futures::executor::block_on`, outside any runtime. Those that await
    /// runtime-bound futures (tokio timers, sockets) panic here; use
    /// [`Rule::execute_async`] for them.
    pub fn execute(&mut self) -> &mut Self {
        self.execute_with(&ExecutionConfig::default())
    }

    /// [`Rule::execute`] with explicit settings. The same runtime caveat
    /// applies.
    pub fn execute_with(&mut self, config: &ExecutionConfig) -> &mut Self {
        futures::executor::block_on(traversal::traverse(self, config));
        self
    }

    /// Execute this rule and its successors without blocking.
    pub async fn execute_async(&mut self) -> &mut Self {
        self.execute_async_with(&ExecutionConfig::default()).await
    }

    /// [`Rule::execute_async`] with explicit settings.
    pub async fn execute_async_with(&mut self, config: &ExecutionConfig) -> &mut Self {
        traversal::traverse(self, config).await;
        self
    }
}
