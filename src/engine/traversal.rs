//! Depth-first, short-circuiting traversal over a rule tree.

use super::callback::{fire, Slot};
use super::{ExecutionConfig, SuccessCallbackPolicy};
use crate::core::rule::SelfCheck;
use crate::core::{Failure, Rule, SuccessorGroup, Verdict};
use futures::future::BoxFuture;
use futures::FutureExt;
use tracing::{debug, trace, warn};

/// Execute `rule` and, if it passes, its successor groups.
///
/// This is the only implementation of the algorithm. The blocking entry
/// points drive the returned future to completion on the calling thread.
pub(crate) fn traverse<'a>(rule: &'a mut Rule, config: &'a ExecutionConfig) -> BoxFuture<'a, ()> {
    async move {
        rule.outcome.reset();
        trace!(rule = %rule.name, "executing rule");

        let mut verdict = Verdict::new();
        match &mut rule.check {
            SelfCheck::Blocking(check) => check.check(&mut verdict),
            SelfCheck::Suspending(check) => check.check(&mut verdict).await,
        }
        if verdict.ignored() > 0 {
            warn!(
                rule = %rule.name,
                ignored = verdict.ignored(),
                "rule invalidated more than once, keeping the first failure"
            );
        }

        if let Some(failure) = verdict.into_failure() {
            debug!(
                rule = %rule.name,
                error_message = %failure.message,
                association = ?failure.association,
                "rule failed its own check"
            );
            rule.outcome.fail(failure);
            fire(rule, Slot::Failure).await;
            return;
        }

        if let Some(failure) = first_failure(&mut rule.groups, config).await {
            debug!(
                rule = %rule.name,
                error_message = %failure.message,
                association = ?failure.association,
                "successor failed, invalidating parent"
            );
            rule.outcome.fail(failure);
            fire(rule, Slot::Failure).await;
        }

        let fire_success = match config.success_callback {
            SuccessCallbackPolicy::AfterTraversal => true,
            SuccessCallbackPolicy::OnlyWhenValid => rule.outcome.is_valid(),
        };
        if fire_success {
            fire(rule, Slot::Success).await;
        }
        if rule.outcome.is_valid() {
            trace!(rule = %rule.name, "rule passed");
        }
    }
    .boxed()
}

/// Run successor groups in attachment order, stopping at the first rule that
/// ends invalid. Later rules and later groups are never executed.
async fn first_failure(groups: &mut [SuccessorGroup], config: &ExecutionConfig) -> Option<Failure> {
    for group in groups.iter_mut() {
        for successor in group.rules_mut() {
            traverse(successor, config).await;
            if let Some(failure) = successor.outcome.failure() {
                return Some(failure.clone());
            }
        }
    }
    None
}
