//! Validation runs.
//!
//! A [`Validator`] holds a validation block and a [`Configuration`]. Each call
//! to [`validate`](Validator::validate) allocates its own registry and
//! validatable tree, runs the block against the root and finalizes the
//! result. The validator itself is immutable, so one definition can serve any
//! number of concurrent runs.

use std::fmt;
use std::sync::Arc;

use rayon::prelude::*;

use crate::config::Configuration;
use crate::registry::run_with_constraint_registry;
use crate::validatable::Validatable;
use crate::validation::ValidationResult;
use crate::Flow;

type Block<T, C> = dyn Fn(&C, &Validatable<'_, T>) -> Flow + Send + Sync;

/// A reusable validation definition for values of type `T`, optionally
/// reading a context of type `C`.
///
/// # Example
///
/// ```rust
/// use constrain::{Path, Validator};
///
/// struct Third { ok: bool }
/// struct Second { third: Third }
/// struct First { second: Second }
///
/// let third = Validator::<Third>::new(|v| {
///     v.constrain(|t| t.ok)?.explain(|| "third is invalid");
///     Ok(())
/// });
/// let second = Validator::<Second>::new(move |v| {
///     v.field("third", |s| &s.third).validate_with(&third)
/// });
/// let first = Validator::<First>::new(move |v| {
///     v.field("second", |f| &f.second).validate_with(&second)
/// });
///
/// let result = first.validate(First { second: Second { third: Third { ok: false } } });
/// let violation = result.violations().unwrap().first().unwrap().clone();
/// assert_eq!(violation.path(), &Path::from(["second", "third"]));
/// ```
pub struct Validator<T, C = ()> {
    configuration: Configuration,
    block: Arc<Block<T, C>>,
}

impl<T> Validator<T> {
    /// Creates a validator whose block only reads the value.
    pub fn new<F>(block: F) -> Self
    where
        F: Fn(&Validatable<'_, T>) -> Flow + Send + Sync + 'static,
    {
        Self::contextual(move |_, validatable| block(validatable))
    }

    /// Validates `value` in a run of its own.
    pub fn validate(&self, value: T) -> ValidationResult<T> {
        self.validate_in_context(&(), value)
    }

    /// Validates every value in parallel, each in a run of its own.
    ///
    /// Results are returned in the order of `values`.
    pub fn validate_par(&self, values: Vec<T>) -> Vec<ValidationResult<T>>
    where
        T: Send,
    {
        self.validate_par_in_context(&(), values)
    }
}

impl<T, C> Validator<T, C> {
    /// Creates a validator whose block reads a context alongside the value.
    pub fn contextual<F>(block: F) -> Self
    where
        F: Fn(&C, &Validatable<'_, T>) -> Flow + Send + Sync + 'static,
    {
        Self {
            configuration: Configuration::default(),
            block: Arc::new(block),
        }
    }

    /// Replaces the configuration used by top-level runs.
    pub fn with_configuration(mut self, configuration: Configuration) -> Self {
        self.configuration = configuration;
        self
    }

    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    /// Validates `value` with `context` in a run of its own.
    pub fn validate_in_context(&self, context: &C, value: T) -> ValidationResult<T> {
        tracing::debug!(value_type = std::any::type_name::<T>(), "validation run started");
        run_with_constraint_registry(value, self.configuration.clone(), |value, registry| {
            (self.block)(context, &Validatable::root(value, registry))
        })
    }

    /// Validates every value in parallel with a shared `context`.
    ///
    /// Results are returned in the order of `values`.
    pub fn validate_par_in_context(&self, context: &C, values: Vec<T>) -> Vec<ValidationResult<T>>
    where
        T: Send,
        C: Sync,
    {
        values
            .into_par_iter()
            .map(|value| self.validate_in_context(context, value))
            .collect()
    }

    /// Runs the block against a node of an enclosing run.
    ///
    /// No registry is created: findings land in the registry of
    /// `validatable`, under its path, and the enclosing run's configuration
    /// applies.
    pub(crate) fn run_nested(&self, context: &C, validatable: &Validatable<'_, T>) -> Flow {
        validatable.registry().check_first_violation()?;
        (self.block)(context, validatable)
    }
}

impl<T, C> Clone for Validator<T, C> {
    fn clone(&self) -> Self {
        Self {
            configuration: self.configuration.clone(),
            block: Arc::clone(&self.block),
        }
    }
}

impl<T, C> fmt::Debug for Validator<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator")
            .field("configuration", &self.configuration)
            .finish_non_exhaustive()
    }
}

impl<'a, T> Validatable<'a, T> {
    /// Validates this node with a validator defined for its type.
    ///
    /// Violations are reported in the current run, prefixed with this
    /// node's path.
    ///
    /// # Errors
    ///
    /// Propagates `FirstViolationAbort` from the nested block.
    pub fn validate_with(&self, validator: &Validator<T>) -> Flow {
        validator.run_nested(&(), self)
    }

    /// Like [`validate_with`](Self::validate_with), for a contextual validator.
    ///
    /// # Errors
    ///
    /// Propagates `FirstViolationAbort` from the nested block.
    pub fn validate_with_context<C>(&self, validator: &Validator<T, C>, context: &C) -> Flow {
        validator.run_nested(context, self)
    }
}
