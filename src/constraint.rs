//! The outcome of one predicate evaluation.
//!
//! A [`Constraint`] is created by [`Validatable::constrain`] and friends. When
//! unsatisfied it is registered into the run's registry right away, but its
//! message and path stay editable until the run finalizes: the registry keeps
//! a handle to the same state, not a copy.

use std::hash::{Hash, Hasher};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::{ConstraintError, ConstraintViolation};
use crate::path::{Path, PathBuilder, PathNode};
use crate::validatable::Validatable;

#[derive(Debug)]
struct Details {
    message: String,
    path: Path,
}

/// The outcome (satisfied or not) of a predicate bound to a validatable.
///
/// `explain` and `with_path` are no-ops on satisfied constraints, so their
/// closures only run when there is a violation to describe.
///
/// # Example
///
/// ```rust
/// use constrain::{Configuration, ConstraintRegistry, Path, Validatable};
///
/// let registry = ConstraintRegistry::new(Configuration::default());
/// let age = 12;
/// let validatable = Validatable::named(&age, "age", &registry);
///
/// let constraint = validatable
///     .constrain(|age| *age >= 18)
///     .unwrap()
///     .explain(|| format!("must be an adult, got {}", age))
///     .with_path(|p| p.appended(["years"]));
///
/// assert!(!constraint.is_satisfied());
/// assert_eq!(constraint.message(), "must be an adult, got 12");
/// assert_eq!(constraint.path(), Path::from(["age", "years"]));
/// ```
#[derive(Debug, Clone)]
pub struct Constraint {
    satisfied: bool,
    node: Arc<PathNode>,
    details: Arc<Mutex<Details>>,
}

impl Constraint {
    /// Creates a constraint bound to `validatable`, with an empty message and
    /// the validatable's path.
    ///
    /// The constraint is not registered; use [`Validatable::constrain`] for that.
    pub fn new<T: ?Sized>(satisfied: bool, validatable: &Validatable<'_, T>) -> Self {
        Self::bound(satisfied, Arc::clone(validatable.node()))
    }

    pub(crate) fn bound(satisfied: bool, node: Arc<PathNode>) -> Self {
        let path = node.path();
        Self {
            satisfied,
            node,
            details: Arc::new(Mutex::new(Details {
                message: String::new(),
                path,
            })),
        }
    }

    pub fn is_satisfied(&self) -> bool {
        self.satisfied
    }

    /// The message, empty until explained.
    pub fn message(&self) -> String {
        self.details.lock().message.clone()
    }

    pub fn path(&self) -> Path {
        self.details.lock().path.clone()
    }

    /// Sets the message of an unsatisfied constraint.
    pub fn explain<S, F>(self, message: F) -> Self
    where
        S: Into<String>,
        F: FnOnce() -> S,
    {
        if !self.satisfied {
            let message = message().into();
            self.details.lock().message = message;
        }
        self
    }

    /// Recomputes the path of an unsatisfied constraint from its bound node.
    pub fn with_path<F>(self, path: F) -> Self
    where
        F: FnOnce(PathBuilder<'_>) -> Path,
    {
        if !self.satisfied {
            let path = path(PathBuilder::new(&self.node));
            self.details.lock().path = path;
        }
        self
    }

    /// Converts an unsatisfied constraint into a violation.
    ///
    /// An empty message is replaced by `default_message` and the path is
    /// prefixed with `root_path`.
    ///
    /// # Errors
    ///
    /// Returns `ConstraintError::InvalidConversion` if the constraint is satisfied.
    pub fn to_violation(
        &self,
        default_message: &str,
        root_path: &Path,
    ) -> Result<ConstraintViolation, ConstraintError> {
        if self.satisfied {
            return Err(ConstraintError::InvalidConversion { path: self.path() });
        }
        Ok(self.violation(default_message, root_path))
    }

    pub(crate) fn violation(&self, default_message: &str, root_path: &Path) -> ConstraintViolation {
        let details = self.details.lock();
        let message = if details.message.is_empty() {
            default_message.to_string()
        } else {
            details.message.clone()
        };
        ConstraintViolation::new(message, root_path.join(&details.path))
    }

    /// Returns true if both handles point to the same constraint.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.details, &other.details)
    }
}

impl PartialEq for Constraint {
    fn eq(&self, other: &Self) -> bool {
        self.satisfied == other.satisfied
            && self.node.path() == other.node.path()
            && self.message() == other.message()
    }
}

impl Eq for Constraint {}

impl Hash for Constraint {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.satisfied.hash(state);
        self.node.path().hash(state);
        self.message().hash(state);
    }
}
