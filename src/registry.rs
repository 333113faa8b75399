//! Per-run accumulation of unsatisfied constraints.
//!
//! This module provides the [`ConstraintRegistry`] type that collects the
//! unsatisfied constraints of one validation run, enforces the fail-fast
//! policy and turns the collected constraints into the run's result.

use parking_lot::Mutex;

use crate::config::Configuration;
use crate::constraint::Constraint;
use crate::error::{ConstraintViolationSet, FirstViolationAbort};
use crate::validation::ValidationResult;
use crate::Flow;

/// The accumulator behind one validation run.
///
/// Every validatable of a run holds a reference to the same registry. A
/// registry is created for a single run and consumed by [`finalize`], so it is
/// never shared between runs and nothing can be registered once the result
/// exists.
///
/// Only one constraint is evaluated at a time within a run. The mutex makes
/// the registry `Sync` so runs can be driven from any thread or executor; it
/// is never contended.
///
/// [`finalize`]: ConstraintRegistry::finalize
///
/// # Example
///
/// ```rust
/// use constrain::{Configuration, ConstraintRegistry, Validatable};
///
/// let registry = ConstraintRegistry::new(Configuration::default());
/// let value = 42;
/// let root = Validatable::root(&value, &registry);
///
/// root.constrain(|v| *v < 10).unwrap().explain(|| "too large");
///
/// let result = registry.finalize(value);
/// assert!(result.is_failure());
/// ```
#[derive(Debug)]
pub struct ConstraintRegistry {
    configuration: Configuration,
    constraints: Mutex<Vec<Constraint>>,
}

impl ConstraintRegistry {
    /// Creates an empty registry for one run.
    pub fn new(configuration: Configuration) -> Self {
        Self {
            configuration,
            constraints: Mutex::new(Vec::new()),
        }
    }

    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    /// Records the constraint if it is unsatisfied.
    ///
    /// The registry keeps a handle on the constraint, so later calls to
    /// `explain` or `with_path` are reflected in the final violations.
    pub fn register(&self, constraint: &Constraint) {
        if constraint.is_satisfied() {
            return;
        }
        tracing::trace!(path = %constraint.path(), "registered unsatisfied constraint");
        self.constraints.lock().push(constraint.clone());
    }

    /// Stops the run if it is fail-fast and already holds a violation.
    ///
    /// # Errors
    ///
    /// Returns `FirstViolationAbort` carrying the first registered violation.
    pub fn check_first_violation(&self) -> Flow {
        if !self.configuration.fail_on_first_violation() {
            return Ok(());
        }
        let constraints = self.constraints.lock();
        match constraints.first() {
            Some(first) => Err(FirstViolationAbort::new(first.violation(
                self.configuration.default_violation_message(),
                self.configuration.root_path(),
            ))),
            None => Ok(()),
        }
    }

    /// Handles to the registered constraints, in registration order.
    pub fn constraints(&self) -> Vec<Constraint> {
        self.constraints.lock().clone()
    }

    /// Returns the number of registered constraints.
    pub fn len(&self) -> usize {
        self.constraints.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.lock().is_empty()
    }

    /// Ends the run.
    ///
    /// Returns `Success(value)` when nothing was registered, otherwise a
    /// failure holding `value` and every registered constraint converted
    /// into a violation.
    pub fn finalize<T>(self, value: T) -> ValidationResult<T> {
        let constraints = self.constraints.into_inner();
        if constraints.is_empty() {
            tracing::debug!("validation run succeeded");
            return ValidationResult::Success(value);
        }

        let default_message = self.configuration.default_violation_message();
        let root_path = self.configuration.root_path();
        let mut violations = ConstraintViolationSet::new();
        for constraint in &constraints {
            violations.insert(constraint.violation(default_message, root_path));
        }
        tracing::debug!(
            constraints = constraints.len(),
            violations = violations.len(),
            "validation run failed"
        );
        ValidationResult::Failure { value, violations }
    }
}

/// Runs `block` against a fresh registry and finalizes it with `value`.
///
/// A `FirstViolationAbort` returned by the block ends it early; the result is
/// built from whatever was registered before.
pub fn run_with_constraint_registry<T, F>(
    value: T,
    configuration: Configuration,
    block: F,
) -> ValidationResult<T>
where
    F: FnOnce(&T, &ConstraintRegistry) -> Flow,
{
    let registry = ConstraintRegistry::new(configuration);
    if let Err(abort) = block(&value, &registry) {
        tracing::debug!(violation = %abort.violation(), "stopped at first violation");
    }
    registry.finalize(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::{Path, PathNode};

    fn constraint(satisfied: bool, segment: Option<&str>) -> Constraint {
        Constraint::bound(satisfied, PathNode::orphan(segment.map(str::to_string)))
    }

    #[test]
    fn test_register_satisfied_leaves_registry_empty() {
        let registry = ConstraintRegistry::new(Configuration::default());
        registry.register(&constraint(true, None));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_register_unsatisfied_keeps_same_instance() {
        let registry = ConstraintRegistry::new(Configuration::default());
        let unsatisfied = constraint(false, None);
        registry.register(&unsatisfied);

        let registered = registry.constraints();
        assert_eq!(registered.len(), 1);
        assert!(registered[0].ptr_eq(&unsatisfied));
    }

    #[test]
    fn test_register_preserves_order_of_unsatisfied() {
        let registry = ConstraintRegistry::new(Configuration::default());
        let first = constraint(false, Some("path1"));
        let second = constraint(true, Some("path2"));
        let third = constraint(false, Some("path3"));
        registry.register(&first);
        registry.register(&second);
        registry.register(&third);

        let paths: Vec<Path> = registry.constraints().iter().map(Constraint::path).collect();
        assert_eq!(paths, vec![Path::from(["path1"]), Path::from(["path3"])]);
    }

    #[test]
    fn test_run_returns_success_when_all_satisfied() {
        let result = run_with_constraint_registry("value", Configuration::default(), |_, registry| {
            registry.register(&constraint(true, Some("path1")));
            registry.register(&constraint(true, Some("path2")));
            Ok(())
        });
        assert_eq!(result, ValidationResult::Success("value"));
    }

    #[test]
    fn test_run_returns_failure_with_unsatisfied_messages() {
        let result = run_with_constraint_registry((), Configuration::default(), |_, registry| {
            registry.register(&constraint(true, Some("path1")).explain(|| "message 1"));
            registry.register(&constraint(false, Some("path2")).explain(|| "message 2"));
            registry.register(&constraint(false, Some("path3")).explain(|| "message 3"));
            Ok(())
        });

        let violations = result.violations().unwrap();
        let messages: Vec<_> = violations.iter().map(|v| v.message()).collect();
        assert_eq!(messages, vec!["message 2", "message 3"]);
    }

    #[test]
    fn test_root_path_is_prepended() {
        let config = Configuration::builder().root_path(["foo", "bar"]).build();
        let result = run_with_constraint_registry((), config, |_, registry| {
            registry.register(&constraint(false, Some("baz")));
            Ok(())
        });

        let violations = result.violations().unwrap();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations.first().unwrap().path(), &Path::from(["foo", "bar", "baz"]));
    }

    #[test]
    fn test_default_message_replaces_empty_messages() {
        let config = Configuration::builder().default_violation_message("default").build();
        let result = run_with_constraint_registry((), config, |_, registry| {
            registry.register(&constraint(false, None));
            Ok(())
        });
        assert_eq!(result.violations().unwrap().first().unwrap().message(), "default");
    }

    #[test]
    fn test_fail_fast_skips_upcoming_constraints() {
        let config = Configuration::builder().fail_on_first_violation(true).build();
        let result = run_with_constraint_registry((), config, |_, registry| {
            registry.register(&constraint(false, None).explain(|| "first message"));
            registry.check_first_violation()?;
            registry.register(&constraint(false, None).explain(|| "second message"));
            Ok(())
        });

        let violations = result.violations().unwrap();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations.first().unwrap().message(), "first message");
    }

    #[test]
    fn test_without_fail_fast_all_constraints_run() {
        let result = run_with_constraint_registry((), Configuration::default(), |_, registry| {
            registry.register(&constraint(false, None).explain(|| "first message"));
            registry.check_first_violation()?;
            registry.register(&constraint(false, None).explain(|| "second message"));
            Ok(())
        });
        assert_eq!(result.violations().unwrap().len(), 2);
    }

    #[test]
    fn test_check_on_empty_registry_passes() {
        let config = Configuration::builder().fail_on_first_violation(true).build();
        let registry = ConstraintRegistry::new(config);
        assert!(registry.check_first_violation().is_ok());
    }

    #[test]
    fn test_semantic_duplicates_collapse() {
        let result = run_with_constraint_registry((), Configuration::default(), |_, registry| {
            registry.register(&constraint(false, Some("a")).explain(|| "same"));
            registry.register(&constraint(false, Some("a")).explain(|| "same"));
            Ok(())
        });
        assert_eq!(result.violations().unwrap().len(), 1);
    }
}
