//! The outcome of a validation run.

use stillwater::Validation;

use crate::error::{ConstraintViolationSet, ValidationError};

/// The outcome of a run. Both variants hand the input value back untouched;
/// a failure also carries every violation found in it.
///
/// # Example
///
/// ```rust
/// use constrain::{ValidationResult, Validator};
///
/// let validate = Validator::new(|v| {
///     v.constrain(|n: &i32| *n > 0)?.explain(|| "must be positive");
///     Ok(())
/// });
///
/// assert_eq!(validate.validate(3), ValidationResult::Success(3));
///
/// let result = validate.validate(-3);
/// assert_eq!(*result.value(), -3);
///
/// let error = result.into_result().unwrap_err();
/// assert_eq!(error.violations().first().unwrap().message(), "must be positive");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValidationResult<T> {
    /// No constraint was violated; carries the input value.
    Success(T),
    /// At least one constraint was violated.
    Failure {
        value: T,
        violations: ConstraintViolationSet,
    },
}

impl<T> ValidationResult<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, ValidationResult::Success(_))
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, ValidationResult::Failure { .. })
    }

    /// The input value of the run, whatever its outcome.
    pub fn value(&self) -> &T {
        match self {
            ValidationResult::Success(value) | ValidationResult::Failure { value, .. } => value,
        }
    }

    /// The violations, if the run failed.
    pub fn violations(&self) -> Option<&ConstraintViolationSet> {
        match self {
            ValidationResult::Success(_) => None,
            ValidationResult::Failure { violations, .. } => Some(violations),
        }
    }

    /// Gives the input value back, discarding any violations.
    pub fn into_value(self) -> T {
        self.into_parts().0
    }

    /// Splits into the input value and the violations of a failed run.
    pub fn into_parts(self) -> (T, Option<ConstraintViolationSet>) {
        match self {
            ValidationResult::Success(value) => (value, None),
            ValidationResult::Failure { value, violations } => (value, Some(violations)),
        }
    }

    /// Returns the value, or an error carrying the whole violation set.
    ///
    /// The value of a failed run is dropped; use
    /// [`into_parts`](Self::into_parts) to keep it.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for a `Failure`.
    pub fn into_result(self) -> Result<T, ValidationError> {
        match self {
            ValidationResult::Success(value) => Ok(value),
            ValidationResult::Failure { violations, .. } => Err(ValidationError::new(violations)),
        }
    }

    /// Converts into a stillwater `Validation`, for combining with other
    /// accumulating validations. The value of a failed run is dropped.
    pub fn into_validation(self) -> Validation<T, ConstraintViolationSet> {
        match self {
            ValidationResult::Success(value) => Validation::Success(value),
            ValidationResult::Failure { violations, .. } => Validation::Failure(violations),
        }
    }

    /// Transforms the carried value, keeping the outcome and violations.
    pub fn map<U, F>(self, f: F) -> ValidationResult<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            ValidationResult::Success(value) => ValidationResult::Success(f(value)),
            ValidationResult::Failure { value, violations } => ValidationResult::Failure {
                value: f(value),
                violations,
            },
        }
    }
}

impl<T> From<ValidationResult<T>> for Result<T, ValidationError> {
    fn from(result: ValidationResult<T>) -> Self {
        result.into_result()
    }
}

impl<T> From<ValidationResult<T>> for Validation<T, ConstraintViolationSet> {
    fn from(result: ValidationResult<T>) -> Self {
        result.into_validation()
    }
}
