//! Builder for constructing commands.

use super::error::{ActionError, BuildError};
use super::executor::Command;
use crate::core::Rule;
use crate::engine::ExecutionConfig;
use std::sync::Arc;
use stillwater::effect::BoxedEffect;
use stillwater::prelude::*;

/// Factory producing a fresh effect for every execution.
pub(crate) type EffectFactory<T, Env> =
    Arc<dyn Fn() -> BoxedEffect<T, ActionError, Env> + Send + Sync>;

/// Factory producing an effect that builds fresh top-level rules.
pub(crate) type RuleFactory<Env> = EffectFactory<Vec<Rule>, Env>;

/// Builder for constructing commands with a fluent API.
pub struct CommandBuilder<T, Env> {
    initializer: Option<EffectFactory<(), Env>>,
    rules: Vec<RuleFactory<Env>>,
    action: Option<EffectFactory<T, Env>>,
    config: ExecutionConfig,
}

impl<T, Env> CommandBuilder<T, Env>
where
    T: Send + 'static,
    Env: Clone + Send + Sync + 'static,
{
    /// Create a new command builder.
    pub fn new() -> Self {
        Self {
            initializer: None,
            rules: Vec::new(),
            action: None,
            config: ExecutionConfig::default(),
        }
    }

    /// Set an initialization effect run before any rule (optional).
    pub fn initialize<F>(mut self, effect: F) -> Self
    where
        F: Fn() -> BoxedEffect<(), ActionError, Env> + Send + Sync + 'static,
    {
        self.initializer = Some(Arc::new(effect));
        self
    }

    /// Add one top-level rule built from the environment.
    pub fn rule<F>(self, factory: F) -> Self
    where
        F: Fn(&Env) -> Rule + Send + Sync + 'static,
    {
        self.rules(move |env: &Env| vec![factory(env)])
    }

    /// Add several top-level rules built from the environment.
    pub fn rules<F>(self, factory: F) -> Self
    where
        F: Fn(&Env) -> Vec<Rule> + Send + Sync + 'static,
    {
        let factory = Arc::new(factory);
        self.rules_effect(move || {
            let factory = Arc::clone(&factory);
            from_fn(move |env: &Env| Ok::<_, ActionError>(factory(env))).boxed()
        })
    }

    /// Add top-level rules built by an effect.
    ///
    /// Use this when the rules depend on something that has to be loaded
    /// first. A [`DomainError`](super::DomainError) from the effect fails
    /// the command the same way a failing action does.
    pub fn rules_effect<F>(mut self, effect: F) -> Self
    where
        F: Fn() -> BoxedEffect<Vec<Rule>, ActionError, Env> + Send + Sync + 'static,
    {
        self.rules.push(Arc::new(effect));
        self
    }

    /// Set the action effect (required).
    pub fn action<F>(mut self, effect: F) -> Self
    where
        F: Fn() -> BoxedEffect<T, ActionError, Env> + Send + Sync + 'static,
    {
        self.action = Some(Arc::new(effect));
        self
    }

    /// Set the action from a plain function of the environment.
    pub fn action_fn<F>(self, action: F) -> Self
    where
        F: Fn(&Env) -> Result<T, ActionError> + Send + Sync + 'static,
    {
        let action = Arc::new(action);
        self.action(move || {
            let action = Arc::clone(&action);
            from_fn(move |env: &Env| action(env)).boxed()
        })
    }

    /// Settings used when executing the command's rules.
    pub fn execution_config(mut self, config: ExecutionConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the command.
    pub fn build(self) -> Result<Command<T, Env>, BuildError> {
        let action = self.action.ok_or(BuildError::MissingAction)?;

        Ok(Command {
            initializer: self.initializer,
            rules: self.rules,
            action,
            config: self.config,
        })
    }
}

impl<T, Env> Default for CommandBuilder<T, Env>
where
    T: Send + 'static,
    Env: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}
