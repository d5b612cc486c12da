//! Success and failure callbacks attached to a rule.

use crate::core::Rule;
use futures::future::BoxFuture;

type BlockingFn = Box<dyn FnMut(&Rule) + Send + Sync>;
type SuspendingFn = Box<dyn FnMut(&Rule) -> BoxFuture<'static, ()> + Send + Sync>;

/// A callback invoked with the rule once its outcome for the current
/// execution is known.
///
/// Suspending callbacks receive the rule synchronously and return a future,
/// so anything they need from the rule must be copied out before the future
/// is created.
pub(crate) enum Callback {
    Blocking(BlockingFn),
    Suspending(SuspendingFn),
}

impl Callback {
    pub(crate) fn blocking<F>(callback: F) -> Self
    where
        F: FnMut(&Rule) + Send + Sync + 'static,
    {
        Self::Blocking(Box::new(callback))
    }

    pub(crate) fn suspending<F>(callback: F) -> Self
    where
        F: FnMut(&Rule) -> BoxFuture<'static, ()> + Send + Sync + 'static,
    {
        Self::Suspending(Box::new(callback))
    }
}

/// Which callback slot of a rule to fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Slot {
    Success,
    Failure,
}

/// Invoke the callback in `slot`, if any.
///
/// The callback is taken out of the rule while it runs so it can observe the
/// rule itself, then put back for the next execution.
pub(crate) async fn fire(rule: &mut Rule, slot: Slot) {
    let taken = match slot {
        Slot::Success => rule.on_success.take(),
        Slot::Failure => rule.on_failure.take(),
    };
    let Some(mut callback) = taken else {
        return;
    };

    match &mut callback {
        Callback::Blocking(f) => f(rule),
        Callback::Suspending(f) => {
            let pending = f(rule);
            pending.await;
        }
    }

    match slot {
        Slot::Success => rule.on_success = Some(callback),
        Slot::Failure => rule.on_failure = Some(callback),
    }
}
