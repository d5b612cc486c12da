//! Self-check capabilities implemented by concrete rules.
//!
//! A rule's own validation logic lives behind one of two traits:
//! [`Check`] for checks that complete immediately and [`AsyncCheck`] for
//! checks that need to suspend (a lookup, a remote call). Either way the
//! check reports failure by calling [`Verdict::invalidate`] and never by
//! returning an error.

use super::outcome::Failure;
use futures::future::BoxFuture;
use futures::FutureExt;
use std::future::Future;

/// Handle a check uses to invalidate its rule.
///
/// The first invalidation wins. Later calls within the same execution are
/// counted and otherwise ignored.
#[derive(Debug, Default)]
pub struct Verdict {
    failure: Option<Failure>,
    ignored: usize,
}

impl Verdict {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Invalidate the rule with an error message.
    pub fn invalidate(&mut self, message: impl Into<String>) {
        self.reject(Failure::new(message));
    }

    /// Invalidate the rule with an error message tagged with an association.
    pub fn invalidate_with(&mut self, message: impl Into<String>, association: impl Into<String>) {
        self.reject(Failure::associated(message, association));
    }

    /// Invalidate the rule with a prepared failure.
    pub fn reject(&mut self, failure: Failure) {
        if self.failure.is_some() {
            self.ignored += 1;
            return;
        }
        self.failure = Some(failure);
    }

    /// Whether the rule has been invalidated during this check.
    pub fn is_invalid(&self) -> bool {
        self.failure.is_some()
    }

    /// Number of invalidations ignored because the rule was already invalid.
    pub(crate) fn ignored(&self) -> usize {
        self.ignored
    }

    pub(crate) fn into_failure(self) -> Option<Failure> {
        self.failure
    }
}

/// Self-check that completes without suspending.
///
/// # Example
///
/// ```rust
/// use rulechain::core::{Check, Rule, Verdict};
///
/// struct RequiredName(String);
///
/// impl Check for RequiredName {
///     fn check(&mut self, verdict: &mut Verdict) {
///         if self.0.trim().is_empty() {
///             verdict.invalidate_with("Name is required", "Name");
///         }
///     }
/// }
///
/// let mut rule = Rule::new(RequiredName(String::new()));
/// rule.execute();
///
/// assert!(!rule.is_valid());
/// assert_eq!(rule.association(), Some("Name"));
/// ```
pub trait Check: Send + Sync {
    /// Run the validation logic, invalidating `verdict` on failure.
    fn check(&mut self, verdict: &mut Verdict);

    /// Name used for logging and introspection.
    ///
    /// Default implementation returns the implementing type's name
    /// without its module path.
    fn name(&self) -> &str {
        short_type_name::<Self>()
    }
}

/// Self-check that may suspend.
///
/// [`Rule::execute`](crate::core::Rule::execute) drives suspending checks on
/// the calling thread with a plain executor, outside any runtime. A check
/// that awaits runtime-bound futures (tokio timers, sockets, `spawn`) panics
/// there and must be run with
/// [`Rule::execute_async`](crate::core::Rule::execute_async) inside that
/// runtime.
///
/// # Example
///
/// ```rust
/// use futures::future::BoxFuture;
/// use futures::FutureExt;
/// use rulechain::core::{AsyncCheck, Verdict};
///
/// struct UniqueEmail {
///     email: String,
/// }
///
/// impl AsyncCheck for UniqueEmail {
///     fn check<'a>(&'a mut self, verdict: &'a mut Verdict) -> BoxFuture<'a, ()> {
///         async move {
///             let taken = self.email == "taken@example.com";
///             if taken {
///                 verdict.invalidate_with("Email is already registered", "Email");
///             }
///         }
///         .boxed()
///     }
/// }
/// ```
pub trait AsyncCheck: Send + Sync {
    /// Run the validation logic, invalidating `verdict` on failure.
    fn check<'a>(&'a mut self, verdict: &'a mut Verdict) -> BoxFuture<'a, ()>;

    /// Name used for logging and introspection.
    fn name(&self) -> &str {
        short_type_name::<Self>()
    }
}

/// Blocking check backed by a closure.
pub struct FnCheck<F> {
    name: String,
    check: F,
}

impl<F> FnCheck<F>
where
    F: FnMut() -> Result<(), Failure> + Send + Sync,
{
    pub fn new(name: impl Into<String>, check: F) -> Self {
        Self {
            name: name.into(),
            check,
        }
    }
}

impl<F> Check for FnCheck<F>
where
    F: FnMut() -> Result<(), Failure> + Send + Sync,
{
    fn check(&mut self, verdict: &mut Verdict) {
        if let Err(failure) = (self.check)() {
            verdict.reject(failure);
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Suspending check backed by a closure returning a future.
pub struct AsyncFnCheck<F> {
    name: String,
    check: F,
}

impl<F, Fut> AsyncFnCheck<F>
where
    F: FnMut() -> Fut + Send + Sync,
    Fut: Future<Output = Result<(), Failure>> + Send + 'static,
{
    pub fn new(name: impl Into<String>, check: F) -> Self {
        Self {
            name: name.into(),
            check,
        }
    }
}

impl<F, Fut> AsyncCheck for AsyncFnCheck<F>
where
    F: FnMut() -> Fut + Send + Sync,
    Fut: Future<Output = Result<(), Failure>> + Send + 'static,
{
    fn check<'a>(&'a mut self, verdict: &'a mut Verdict) -> BoxFuture<'a, ()> {
        let pending = (self.check)();
        async move {
            if let Err(failure) = pending.await {
                verdict.reject(failure);
            }
        }
        .boxed()
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Type name with module paths stripped, keeping generic arguments readable.
pub(crate) fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    match base.rfind("::") {
        Some(idx) => &full[idx + 2..],
        None => full,
    }
}
