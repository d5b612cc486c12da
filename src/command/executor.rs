//! Command: runs top-level rules before an action.

use super::builder::{CommandBuilder, EffectFactory, RuleFactory};
use super::error::{ActionError, CommandError};
use super::result::{ExecutionResult, ValidationResult};
use super::validation::{validation_results_async, RulesContainer};
use crate::core::Rule;
use crate::engine::ExecutionConfig;
use futures::future::BoxFuture;
use futures::FutureExt;
use stillwater::effect::Effect;
use tracing::{debug, error, info, warn};

/// A unit of work guarded by rules.
///
/// Execution follows a fixed pipeline:
/// 1. run the initializer, if any
/// 2. build every top-level rule, awaiting rule effects in registration order
/// 3. execute the rules, collecting their failures
/// 4. if any rule failed, return a failed result without running the action
/// 5. otherwise run the action and return its value
///
/// A [`DomainError`](super::DomainError) raised by the initializer, a rule
/// effect or the action becomes a failed result. Any other [`ActionError`]
/// is returned as [`CommandError::Unexpected`].
///
/// # Example
///
/// ```rust
/// use rulechain::command::{ActionError, CommandBuilder};
/// use rulechain::core::{Failure, Rule};
///
/// #[derive(Clone)]
/// struct Order {
///     quantity: u32,
/// }
///
/// let command = CommandBuilder::new()
///     .rule(|order: &Order| {
///         let quantity = order.quantity;
///         Rule::from_fn("PositiveQuantity", move || {
///             if quantity > 0 {
///                 Ok(())
///             } else {
///                 Err(Failure::associated("Quantity must be positive", "Quantity"))
///             }
///         })
///     })
///     .action_fn(|order: &Order| Ok::<_, ActionError>(order.quantity * 2))
///     .build()
///     .unwrap();
///
/// let result = command.execute(&Order { quantity: 0 }).unwrap();
/// assert!(!result.success);
/// assert_eq!(result.errors[0].association.as_deref(), Some("Quantity"));
///
/// let result = command.execute(&Order { quantity: 3 }).unwrap();
/// assert_eq!(result.value, Some(6));
/// ```
pub struct Command<T, Env> {
    pub(crate) initializer: Option<EffectFactory<(), Env>>,
    pub(crate) rules: Vec<RuleFactory<Env>>,
    pub(crate) action: EffectFactory<T, Env>,
    pub(crate) config: ExecutionConfig,
}

impl<T, Env> Command<T, Env>
where
    T: Send + 'static,
    Env: Clone + Send + Sync + 'static,
{
    /// Start building a command.
    pub fn builder() -> CommandBuilder<T, Env> {
        CommandBuilder::new()
    }

    /// Run the pipeline, blocking the calling thread until it completes.
    pub fn execute(&self, env: &Env) -> Result<ExecutionResult<T>, CommandError> {
        futures::executor::block_on(self.execute_async(env))
    }

    /// Run the pipeline without blocking.
    pub async fn execute_async(&self, env: &Env) -> Result<ExecutionResult<T>, CommandError> {
        debug!(rule_sets = self.rules.len(), "executing command");

        if let Some(initializer) = &self.initializer {
            if let Err(err) = initializer().run(env).await {
                return handle_fault(err);
            }
        }

        let errors = match self.rules_async(env).await {
            Ok(mut rules) => validation_results_async(&mut rules, &self.config).await,
            Err(err) => return handle_fault(err),
        };
        if !errors.is_empty() {
            info!(errors = errors.len(), "command rejected by rules");
            return Ok(ExecutionResult::failed(errors));
        }

        match (self.action)().run(env).await {
            Ok(value) => Ok(ExecutionResult::succeeded(value)),
            Err(err) => handle_fault(err),
        }
    }

    /// Execute the command's rules only, blocking, and return their failures.
    pub fn validate(&self, env: &Env) -> Result<Vec<ValidationResult>, CommandError> {
        futures::executor::block_on(self.validate_async(env))
    }

    /// Execute the command's rules only and return their failures.
    ///
    /// A domain fault while building the rules is reported as a single
    /// failure.
    pub async fn validate_async(&self, env: &Env) -> Result<Vec<ValidationResult>, CommandError> {
        match self.rules_async(env).await {
            Ok(mut rules) => Ok(validation_results_async(&mut rules, &self.config).await),
            Err(err) => fault_results(err),
        }
    }
}

impl<T, Env> RulesContainer<Env> for Command<T, Env>
where
    Env: Clone + Send + Sync + 'static,
{
    fn rules_async<'a>(&'a self, env: &'a Env) -> BoxFuture<'a, Result<Vec<Rule>, ActionError>> {
        async move {
            let mut rules = Vec::new();
            for factory in &self.rules {
                rules.extend(factory().run(env).await?);
            }
            Ok::<_, ActionError>(rules)
        }
        .boxed()
    }
}

fn handle_fault<T>(err: ActionError) -> Result<ExecutionResult<T>, CommandError> {
    fault_results(err).map(ExecutionResult::failed)
}

fn fault_results(err: ActionError) -> Result<Vec<ValidationResult>, CommandError> {
    match err {
        ActionError::Domain(fault) => {
            warn!(fault = %fault, "domain fault converted to failed result");
            Ok(vec![ValidationResult::new(fault.message)])
        }
        ActionError::Unexpected(source) => {
            error!(error = %source, "command failed unexpectedly");
            Err(CommandError::Unexpected(source))
        }
    }
}
