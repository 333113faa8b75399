//! Validation with suspending predicates.
//!
//! This module mirrors the synchronous API for blocks and predicates that
//! await, such as a uniqueness lookup against a database:
//! - [`SuspendableValidator`] runs an asynchronous block in a run of its own
//! - [`Validatable::constrain_async`](crate::Validatable::constrain_async)
//!   evaluates a predicate returning a future
//! - [`Validatable::validate_with_async`](crate::Validatable::validate_with_async)
//!   nests another suspendable validator in the current run
//!
//! Constraints still run one at a time, in the order they are awaited. No
//! runtime is required; the futures are driven by whichever executor awaits
//! them. Dropping a run's future before it completes abandons the run and
//! produces no result.
//!
//! # Feature Flag
//!
//! This module is only available when the `async` feature is enabled (it is
//! by default).
//!
//! # Example
//!
//! ```rust
//! use constrain::{Flow, SuspendableValidator};
//! use futures::FutureExt;
//!
//! async fn is_available(name: &str) -> bool {
//!     name != "taken"
//! }
//!
//! let validate = SuspendableValidator::<String>::new(|v| {
//!     async move {
//!         v.constrain_async(|name| is_available(name))
//!             .await?
//!             .explain(|| "name is already taken");
//!         Flow::Ok(())
//!     }
//!     .boxed()
//! });
//!
//! let result = futures::executor::block_on(validate.validate("taken".to_string()));
//! assert!(result.is_failure());
//! ```

mod constrain;
mod validator;

pub use validator::SuspendableValidator;
