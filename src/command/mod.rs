//! Commands: units of work guarded by rules.
//!
//! A command builds fresh top-level rules from its environment, executes all
//! of them, and only runs its action when none failed. Each failing rule
//! tree contributes one [`ValidationResult`]; all of them are returned
//! together in an [`ExecutionResult`].
//!
//! Initializers, actions and rule effects (rules that need a lookup before
//! they can be built) are Stillwater effects, created fresh by a factory on
//! every execution. They fail with [`ActionError`]: a [`DomainError`]
//! becomes a failed result, anything else is returned to the caller as
//! [`CommandError::Unexpected`].
//!
//! # Example
//!
//! ```rust
//! use rulechain::command::{ActionError, Command};
//! use rulechain::core::{Failure, Rule};
//!
//! let command = Command::<String, String>::builder()
//!     .rule(|name: &String| {
//!         let empty = name.is_empty();
//!         Rule::from_fn("NameRequired", move || {
//!             if empty {
//!                 Err(Failure::associated("Name is required", "Name"))
//!             } else {
//!                 Ok(())
//!             }
//!         })
//!     })
//!     .action_fn(|name: &String| Ok::<_, ActionError>(format!("Hello, {name}")))
//!     .build()
//!     .unwrap();
//!
//! let result = command.execute(&"Ada".to_string()).unwrap();
//! assert_eq!(result.value.as_deref(), Some("Hello, Ada"));
//! ```

pub mod builder;
pub mod error;
pub mod executor;
pub mod result;
pub mod validation;

// Re-export commonly used types
pub use builder::CommandBuilder;
pub use error::{ActionError, BuildError, CommandError, DomainError};
pub use executor::Command;
pub use result::{ExecutionResult, ValidationResult};
pub use validation::{validation_results, validation_results_async, RulesContainer};
