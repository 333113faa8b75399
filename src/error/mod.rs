//! Error and violation types.
//!
//! Violations are data: they live in a [`ConstraintViolationSet`] carried by
//! [`ValidationResult::Failure`](crate::ValidationResult::Failure). The error
//! types here are for turning that data into a `Result`, for misuse of the
//! constraint API, and for the fail-fast signal.

mod violation;

pub use violation::{ConstraintViolation, ConstraintViolationSet};

use thiserror::Error;

use crate::path::Path;

/// Returned when a failed validation is unwrapped.
///
/// Always carries the complete violation set of the run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{violations}")]
pub struct ValidationError {
    violations: ConstraintViolationSet,
}

impl ValidationError {
    pub fn new(violations: ConstraintViolationSet) -> Self {
        Self { violations }
    }

    pub fn violations(&self) -> &ConstraintViolationSet {
        &self.violations
    }

    pub fn into_violations(self) -> ConstraintViolationSet {
        self.violations
    }
}

/// Misuse of the constraint API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstraintError {
    /// Only unsatisfied constraints describe a violation.
    #[error("cannot convert the satisfied constraint at `{path}` into a violation")]
    InvalidConversion { path: Path },
}

/// Signal raised when a fail-fast run meets its first violation.
///
/// Validation blocks return [`Flow`](crate::Flow) and propagate this with `?`.
/// The validator that started the run consumes it and finalizes with the
/// violations accumulated so far; it never reaches the caller of the run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("validation stopped at the first violation: {violation}")]
pub struct FirstViolationAbort {
    violation: ConstraintViolation,
}

impl FirstViolationAbort {
    pub(crate) fn new(violation: ConstraintViolation) -> Self {
        Self { violation }
    }

    /// The violation that stopped the run.
    pub fn violation(&self) -> &ConstraintViolation {
        &self.violation
    }
}
