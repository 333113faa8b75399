//! Suspending counterparts of the constraint operations on [`Validatable`].

use std::future::Future;

use crate::constraint::Constraint;
use crate::suspendable::SuspendableValidator;
use crate::validatable::Validatable;
use crate::Flow;

impl<'a, T: ?Sized> Validatable<'a, T> {
    /// Awaits `predicate` against the value and registers the outcome.
    ///
    /// # Errors
    ///
    /// Returns `FirstViolationAbort` without evaluating `predicate` when the
    /// run is fail-fast and already holds a violation.
    pub async fn constrain_async<F, Fut>(&self, predicate: F) -> Flow<Constraint>
    where
        F: FnOnce(&'a T) -> Fut,
        Fut: Future<Output = bool>,
    {
        self.registry().check_first_violation()?;
        let satisfied = predicate(self.value()).await;
        Ok(self.register(satisfied))
    }
}

impl<'a, T> Validatable<'a, Option<T>> {
    /// Like [`constrain_async`](Self::constrain_async), but `None` is always
    /// satisfied and the predicate is never called for it.
    ///
    /// # Errors
    ///
    /// Same as [`constrain_async`](Self::constrain_async).
    pub async fn constrain_if_some_async<F, Fut>(&self, predicate: F) -> Flow<Constraint>
    where
        F: FnOnce(&'a T) -> Fut,
        Fut: Future<Output = bool>,
    {
        self.registry().check_first_violation()?;
        let satisfied = match self.value() {
            Some(value) => predicate(value).await,
            None => true,
        };
        Ok(self.register(satisfied))
    }
}

impl<'a, T> Validatable<'a, T> {
    /// Validates this node with a suspendable validator defined for its type.
    ///
    /// Violations are reported in the current run, prefixed with this
    /// node's path.
    ///
    /// # Errors
    ///
    /// Propagates `FirstViolationAbort` from the nested block.
    pub async fn validate_with_async(&self, validator: &SuspendableValidator<T>) -> Flow {
        validator.run_nested(&(), self).await
    }

    /// Like [`validate_with_async`](Self::validate_with_async), for a
    /// contextual validator.
    ///
    /// # Errors
    ///
    /// Propagates `FirstViolationAbort` from the nested block.
    pub async fn validate_with_async_context<C>(
        &self,
        validator: &SuspendableValidator<T, C>,
        context: &C,
    ) -> Flow {
        validator.run_nested(context, self).await
    }
}
