//! Mapping executed rules to validation results.
//!
//! Every top-level rule runs, and each one contributes at most one failure
//! (the first failure in its tree). Failures are accumulated with
//! `Validation` instead of stopping at the first failing top-level rule.

use super::error::ActionError;
use super::result::ValidationResult;
use crate::core::Rule;
use crate::engine::ExecutionConfig;
use futures::future::BoxFuture;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Holder of the top-level rules to run before an action.
///
/// Building the rules may itself suspend, for example to load a record the
/// rules are checked against. Building fails with an [`ActionError`], which
/// callers treat like a failing action.
pub trait RulesContainer<Env> {
    /// Fresh, unexecuted rules for one run against `env`.
    fn rules_async<'a>(&'a self, env: &'a Env) -> BoxFuture<'a, Result<Vec<Rule>, ActionError>>;

    /// [`RulesContainer::rules_async`], blocking the calling thread.
    fn rules(&self, env: &Env) -> Result<Vec<Rule>, ActionError> {
        futures::executor::block_on(self.rules_async(env))
    }
}

/// Execute every rule, blocking, and collect the failures in rule order.
pub fn validation_results(rules: &mut [Rule], config: &ExecutionConfig) -> Vec<ValidationResult> {
    futures::executor::block_on(validation_results_async(rules, config))
}

/// Execute every rule without blocking and collect the failures in rule
/// order.
pub async fn validation_results_async(
    rules: &mut [Rule],
    config: &ExecutionConfig,
) -> Vec<ValidationResult> {
    for rule in rules.iter_mut() {
        rule.execute_async_with(config).await;
    }
    collect(rules)
}

fn check(rule: &Rule) -> Validation<(), NonEmptyVec<ValidationResult>> {
    match rule.outcome().failure() {
        Some(failure) => Validation::fail(ValidationResult::from(failure)),
        None => Validation::success(()),
    }
}

fn collect(rules: &[Rule]) -> Vec<ValidationResult> {
    let checks: Vec<Validation<(), NonEmptyVec<ValidationResult>>> =
        rules.iter().map(check).collect();

    match Validation::all_vec(checks) {
        Validation::Success(_) => Vec::new(),
        Validation::Failure(errors) => errors.iter().cloned().collect(),
    }
}
