//! # Constrain
//!
//! A structural validation engine: run user-declared predicates against a
//! value and any of its nested fields or elements, and get back either the
//! value itself or every violation, each tagged with the path of the
//! offending field.
//!
//! ## Overview
//!
//! A [`Validator`] owns a validation block. Each run creates a fresh
//! [`ConstraintRegistry`] and wraps the input in a root [`Validatable`]. The
//! block derives child validatables for fields and elements and calls
//! [`Validatable::constrain`] on them; unsatisfied constraints are collected
//! by the registry and become [`ConstraintViolation`]s when the run ends.
//! Validators for nested types compose with [`Validatable::validate_with`],
//! reporting into the same run under the nested path.
//!
//! ## Core Types
//!
//! - [`Path`]: Ordered segments locating a value (e.g., `users.0.email`)
//! - [`Validatable`]: A value under validation together with its position
//! - [`Constraint`]: The outcome of one predicate, explainable until the run ends
//! - [`ConstraintRegistry`]: The per-run accumulator and fail-fast policy
//! - [`ValidationResult`]: `Success(value)` or `Failure { value, violations }`
//! - [`Configuration`]: Default message, root path and fail-fast switch
//!
//! ## Example
//!
//! ```rust
//! use constrain::{Path, Validator};
//!
//! struct User {
//!     name: String,
//!     emails: Vec<String>,
//! }
//!
//! let validate = Validator::<User>::new(|user| {
//!     user.field("name", |u| &u.name)
//!         .constrain(|name| !name.is_empty())?
//!         .explain(|| "name is required");
//!     user.field("emails", |u| &u.emails).each(|email| {
//!         email.constrain(|e| e.contains('@'))?.explain(|| "invalid email");
//!         Ok(())
//!     })
//! });
//!
//! let result = validate.validate(User {
//!     name: String::new(),
//!     emails: vec!["a@b.c".into(), "nope".into()],
//! });
//!
//! let violations = result.violations().unwrap();
//! assert_eq!(violations.len(), 2);
//! assert_eq!(violations.at_path(&Path::from(["emails", "1"])).len(), 1);
//! ```

pub mod config;
pub mod constraint;
pub mod error;
pub mod path;
pub mod registry;
pub mod validatable;
pub mod validation;
pub mod validator;

#[cfg(feature = "async")]
pub mod suspendable;

pub use config::{Configuration, ConfigurationBuilder, DEFAULT_VIOLATION_MESSAGE};
pub use constraint::Constraint;
pub use error::{
    ConstraintError, ConstraintViolation, ConstraintViolationSet, FirstViolationAbort,
    ValidationError,
};
pub use path::{Path, PathBuilder};
pub use registry::{run_with_constraint_registry, ConstraintRegistry};
pub use validatable::{Compound, Elements, Validatable};
pub use validation::ValidationResult;
pub use validator::Validator;

#[cfg(feature = "async")]
pub use suspendable::SuspendableValidator;

/// Control flow of a validation block.
///
/// `Err` only ever carries the fail-fast signal; blocks propagate it with `?`
/// and the validator that started the run consumes it.
pub type Flow<T = ()> = Result<T, FirstViolationAbort>;
