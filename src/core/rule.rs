//! The rule entity: a self-check plus owned successor groups and callbacks.

use super::check::{AsyncCheck, AsyncFnCheck, Check, FnCheck};
use super::error::RuleError;
use super::outcome::{Failure, Outcome};
use super::successor::{SuccessorContainer, SuccessorGroup, Walk};
use crate::engine::Callback;
use futures::future::BoxFuture;
use std::fmt;
use std::future::Future;

/// The self-check a rule runs, in either flavour.
pub(crate) enum SelfCheck {
    Blocking(Box<dyn Check>),
    Suspending(Box<dyn AsyncCheck>),
}

/// A pass/fail validation unit that may own further rules to run when it
/// passes.
///
/// Rules are wired builder-style and then executed with
/// [`Rule::execute`] or [`Rule::execute_async`]. After execution the
/// outcome accessors report the result of the whole tree: if any successor
/// failed, the first failure in traversal order is copied onto this rule.
///
/// # Example
///
/// ```rust
/// use rulechain::core::{Failure, Rule};
///
/// let mut rule = Rule::from_fn("CustomerExists", || Ok(()))
///     .if_valid_then_validate([
///         Rule::from_fn("CreditLimit", || {
///             Err(Failure::associated("Credit limit exceeded", "Amount"))
///         }),
///     ])
///     .unwrap();
///
/// rule.execute();
///
/// assert!(!rule.is_valid());
/// assert_eq!(rule.error_message(), Some("Credit limit exceeded"));
/// assert_eq!(rule.association(), Some("Amount"));
/// ```
pub struct Rule {
    pub(crate) name: String,
    pub(crate) check: SelfCheck,
    pub(crate) outcome: Outcome,
    pub(crate) groups: Vec<SuccessorGroup>,
    pub(crate) on_success: Option<Callback>,
    pub(crate) on_failure: Option<Callback>,
}

impl Rule {
    /// Create a rule around a blocking check.
    pub fn new<C: Check + 'static>(check: C) -> Self {
        let name = check.name().to_string();
        Self::with_check(name, SelfCheck::Blocking(Box::new(check)))
    }

    /// Create a rule around a suspending check.
    ///
    /// If the check awaits runtime-bound futures such as tokio timers or I/O,
    /// execute the rule with [`Rule::execute_async`] inside that runtime.
    /// [`Rule::execute`] has no reactor and panics on them.
    pub fn new_async<C: AsyncCheck + 'static>(check: C) -> Self {
        let name = check.name().to_string();
        Self::with_check(name, SelfCheck::Suspending(Box::new(check)))
    }

    /// Create a rule from a closure. `Err` invalidates the rule.
    pub fn from_fn<F>(name: impl Into<String>, check: F) -> Self
    where
        F: FnMut() -> Result<(), Failure> + Send + Sync + 'static,
    {
        Self::new(FnCheck::new(name, check))
    }

    /// Create a rule from a closure returning a future. `Err` invalidates the
    /// rule.
    ///
    /// The same runtime caveat as [`Rule::new_async`] applies.
    pub fn from_async_fn<F, Fut>(name: impl Into<String>, check: F) -> Self
    where
        F: FnMut() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), Failure>> + Send + 'static,
    {
        Self::new_async(AsyncFnCheck::new(name, check))
    }

    fn with_check(name: String, check: SelfCheck) -> Self {
        Self {
            name,
            check,
            outcome: Outcome::valid(),
            groups: Vec::new(),
            on_success: None,
            on_failure: None,
        }
    }

    /// Override the name used for logging and introspection.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attach a successor group and return the rule for chaining.
    ///
    /// The rules run, in the order given, only if this rule passes its own
    /// check. Groups run in the order they were attached. Returns an error if
    /// `rules` is empty.
    pub fn if_valid_then_validate<I>(mut self, rules: I) -> Result<Self, RuleError>
    where
        I: IntoIterator<Item = Rule>,
    {
        self.attach(rules)?;
        Ok(self)
    }

    /// Attach a successor group to an already constructed rule.
    pub fn attach<I>(&mut self, rules: I) -> Result<&mut Self, RuleError>
    where
        I: IntoIterator<Item = Rule>,
    {
        let group = SuccessorGroup::new(&self.name, rules.into_iter().collect())?;
        self.groups.push(group);
        Ok(self)
    }

    /// Invoke `callback` after a successful execution. Replaces any
    /// previously attached success callback.
    pub fn on_success<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&Rule) + Send + Sync + 'static,
    {
        self.on_success = Some(Callback::blocking(callback));
        self
    }

    /// Suspending variant of [`Rule::on_success`].
    pub fn on_success_async<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&Rule) -> BoxFuture<'static, ()> + Send + Sync + 'static,
    {
        self.on_success = Some(Callback::suspending(callback));
        self
    }

    /// Invoke `callback` after a failed execution. Replaces any previously
    /// attached failure callback.
    pub fn on_failure<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&Rule) + Send + Sync + 'static,
    {
        self.on_failure = Some(Callback::blocking(callback));
        self
    }

    /// Suspending variant of [`Rule::on_failure`].
    pub fn on_failure_async<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&Rule) -> BoxFuture<'static, ()> + Send + Sync + 'static,
    {
        self.on_failure = Some(Callback::suspending(callback));
        self
    }

    pub fn is_valid(&self) -> bool {
        self.outcome.is_valid()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.outcome.error_message()
    }

    pub fn association(&self) -> Option<&str> {
        self.outcome.association()
    }

    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    /// Walk this rule and all of its successors depth-first.
    pub fn walk(&self) -> Walk<'_> {
        Walk::new(self)
    }
}

impl SuccessorContainer for Rule {
    fn successors(&self) -> &[SuccessorGroup] {
        &self.groups
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.check {
            SelfCheck::Blocking(_) => "blocking",
            SelfCheck::Suspending(_) => "suspending",
        };
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("check", &kind)
            .field("outcome", &self.outcome)
            .field("successor_groups", &self.groups.len())
            .finish()
    }
}
