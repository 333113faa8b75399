//! Validators whose blocks may suspend.

use std::fmt;
use std::sync::Arc;

use futures::future::BoxFuture;

use crate::config::Configuration;
use crate::registry::ConstraintRegistry;
use crate::validatable::Validatable;
use crate::validation::ValidationResult;
use crate::validator::Validator;
use crate::Flow;

type AsyncBlock<T, C> =
    dyn for<'v> Fn(&'v C, &'v Validatable<'v, T>) -> BoxFuture<'v, Flow> + Send + Sync;

/// The asynchronous counterpart of [`Validator`].
///
/// Blocks return a boxed future (`async move { .. }.boxed()`); the future
/// borrows the validatable for as long as it runs.
pub struct SuspendableValidator<T, C = ()> {
    configuration: Configuration,
    block: Arc<AsyncBlock<T, C>>,
}

impl<T> SuspendableValidator<T> {
    /// Creates a validator whose block only reads the value.
    pub fn new<F>(block: F) -> Self
    where
        F: for<'v> Fn(&'v Validatable<'v, T>) -> BoxFuture<'v, Flow> + Send + Sync + 'static,
    {
        Self::contextual(move |_, validatable| block(validatable))
    }

    /// Validates `value` in a run of its own.
    pub async fn validate(&self, value: T) -> ValidationResult<T> {
        self.validate_in_context(&(), value).await
    }
}

impl<T, C> SuspendableValidator<T, C> {
    /// Creates a validator whose block reads a context alongside the value.
    pub fn contextual<F>(block: F) -> Self
    where
        F: for<'v> Fn(&'v C, &'v Validatable<'v, T>) -> BoxFuture<'v, Flow> + Send + Sync + 'static,
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
    ///
    /// If the returned future is dropped before completion the run is
    /// abandoned without a result.
    pub async fn validate_in_context(&self, context: &C, value: T) -> ValidationResult<T> {
        tracing::debug!(value_type = std::any::type_name::<T>(), "async validation run started");
        let registry = ConstraintRegistry::new(self.configuration.clone());
        let outcome = {
            let root = Validatable::root(&value, &registry);
            (self.block)(context, &root).await
        };
        if let Err(abort) = outcome {
            tracing::debug!(violation = %abort.violation(), "stopped at first violation");
        }
        registry.finalize(value)
    }

    pub(crate) async fn run_nested(&self, context: &C, validatable: &Validatable<'_, T>) -> Flow {
        validatable.registry().check_first_violation()?;
        (self.block)(context, validatable).await
    }
}

impl<T> Validator<T> {
    /// Shorthand for [`SuspendableValidator::new`].
    pub fn suspendable<F>(block: F) -> SuspendableValidator<T>
    where
        F: for<'v> Fn(&'v Validatable<'v, T>) -> BoxFuture<'v, Flow> + Send + Sync + 'static,
    {
        SuspendableValidator::new(block)
    }
}

impl<T, C> Clone for SuspendableValidator<T, C> {
    fn clone(&self) -> Self {
        Self {
            configuration: self.configuration.clone(),
            block: Arc::clone(&self.block),
        }
    }
}

impl<T, C> fmt::Debug for SuspendableValidator<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SuspendableValidator")
            .field("configuration", &self.configuration)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConstraintViolation;
    use crate::path::Path;
    use futures::FutureExt;

    #[test]
    fn test_satisfied_run_returns_success() {
        let validate = SuspendableValidator::<Option<u8>>::new(|v| {
            async move {
                v.constrain(|_| true)?;
                Flow::Ok(())
            }
            .boxed()
        });
        let result = futures::executor::block_on(validate.validate(None));
        assert_eq!(result, ValidationResult::Success(None));
    }

    #[test]
    fn test_unsatisfied_run_returns_violation() {
        let validate = Validator::<u8>::suspendable(|v| {
            async move {
                v.constrain_async(|_| async { false })
                    .await?
                    .explain(|| "Bad value")
                    .with_path(|p| p.absolute(["path", "to", "value"]));
                Flow::Ok(())
            }
            .boxed()
        });

        let result = futures::executor::block_on(validate.validate(1));
        let violations = result.violations().unwrap();
        assert_eq!(violations.len(), 1);
        assert_eq!(
            violations.first().unwrap(),
            &ConstraintViolation::new("Bad value", Path::from(["path", "to", "value"]))
        );
    }

    #[test]
    fn test_dropped_run_produces_nothing() {
        let validate = SuspendableValidator::<u8>::new(|v| {
            async move {
                v.constrain_async(|_| futures::future::pending::<bool>()).await?;
                Flow::Ok(())
            }
            .boxed()
        });

        let pending = validate.validate(1).now_or_never();
        assert!(pending.is_none());
    }
}
