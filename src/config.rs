//! Run configuration.
//!
//! A [`Configuration`] is immutable. New configurations are built with
//! [`ConfigurationBuilder`], either from the defaults or derived from an
//! existing configuration, which is left untouched.

use crate::path::Path;

/// Message used for violations whose constraint was never explained.
pub const DEFAULT_VIOLATION_MESSAGE: &str = "The value is invalid.";

/// Settings applied by a validation run.
///
/// - **default_violation_message**: replaces empty constraint messages
/// - **root_path**: prepended to the path of every violation
/// - **fail_on_first_violation**: stops the run after the first violation
///
/// # Example
///
/// ```rust
/// use constrain::{Configuration, Path};
///
/// let base = Configuration::builder()
///     .default_violation_message("invalid")
///     .root_path(["request"])
///     .build();
///
/// let strict = base.to_builder().fail_on_first_violation(true).build();
///
/// assert!(strict.fail_on_first_violation());
/// assert!(!base.fail_on_first_violation());
/// assert_eq!(strict.root_path(), &Path::from(["request"]));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Configuration {
    default_violation_message: String,
    root_path: Path,
    fail_on_first_violation: bool,
}

impl Configuration {
    /// Starts a builder initialized with the default values.
    pub fn builder() -> ConfigurationBuilder {
        ConfigurationBuilder::from(Self::default())
    }

    /// Starts a builder initialized with the values of this configuration.
    pub fn to_builder(&self) -> ConfigurationBuilder {
        ConfigurationBuilder::from(self.clone())
    }

    pub fn default_violation_message(&self) -> &str {
        &self.default_violation_message
    }

    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    pub fn fail_on_first_violation(&self) -> bool {
        self.fail_on_first_violation
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            default_violation_message: DEFAULT_VIOLATION_MESSAGE.to_string(),
            root_path: Path::root(),
            fail_on_first_violation: false,
        }
    }
}

/// Builder for [`Configuration`].
///
/// `build` takes the builder by reference, so a builder kept around after
/// building cannot alter configurations it already produced.
#[derive(Debug, Clone)]
pub struct ConfigurationBuilder {
    inner: Configuration,
}

impl ConfigurationBuilder {
    /// Sets the message used for constraints left without one.
    pub fn default_violation_message(mut self, message: impl Into<String>) -> Self {
        self.inner.default_violation_message = message.into();
        self
    }

    /// Sets the path prepended to every violation path.
    pub fn root_path<I>(mut self, segments: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.inner.root_path = Path::new(segments);
        self
    }

    /// Enables or disables stopping at the first violation.
    pub fn fail_on_first_violation(mut self, enabled: bool) -> Self {
        self.inner.fail_on_first_violation = enabled;
        self
    }

    /// Current default message, for derivations that build on it.
    pub fn current_violation_message(&self) -> &str {
        &self.inner.default_violation_message
    }

    /// Current root path, for derivations that build on it.
    pub fn current_root_path(&self) -> &Path {
        &self.inner.root_path
    }

    pub fn build(&self) -> Configuration {
        self.inner.clone()
    }
}

impl From<Configuration> for ConfigurationBuilder {
    fn from(inner: Configuration) -> Self {
        Self { inner }
    }
}
