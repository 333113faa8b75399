//! Constraint violation types.
//!
//! This module provides [`ConstraintViolation`] for a single reported failure
//! and [`ConstraintViolationSet`] for the deduplicated set a run produces.

use std::fmt::{self, Display};
use std::hash::{Hash, Hasher};

use indexmap::{IndexMap, IndexSet};
use stillwater::prelude::*;

use crate::path::Path;

/// A single violation: what went wrong and where.
///
/// # Example
///
/// ```rust
/// use constrain::{ConstraintViolation, Path};
///
/// let violation = ConstraintViolation::new("must not be empty", ["user", "name"]);
///
/// assert_eq!(violation.message(), "must not be empty");
/// assert_eq!(violation.path(), &Path::from(["user", "name"]));
/// assert_eq!(violation.to_string(), "user.name: must not be empty");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConstraintViolation {
    message: String,
    path: Path,
}

impl ConstraintViolation {
    pub fn new(message: impl Into<String>, path: impl Into<Path>) -> Self {
        Self {
            message: message.into(),
            path: path.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Display for ConstraintViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_root() {
            write!(f, "(root): {}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

/// The violations reported by one validation run.
///
/// Iteration follows the order in which constraints were registered. Equal
/// violations collapse into one. Two sets are equal when they hold the same
/// violations, whatever their order.
///
/// # Example
///
/// ```rust
/// use constrain::{ConstraintViolation, ConstraintViolationSet, Path};
///
/// let set: ConstraintViolationSet = [
///     ConstraintViolation::new("required", ["name"]),
///     ConstraintViolation::new("too short", ["name"]),
///     ConstraintViolation::new("invalid", ["email"]),
///     ConstraintViolation::new("required", ["name"]),
/// ]
/// .into_iter()
/// .collect();
///
/// assert_eq!(set.len(), 3);
/// assert_eq!(set.at_path(&Path::from(["name"])).len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConstraintViolationSet(IndexSet<ConstraintViolation>);

impl ConstraintViolationSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of violations in this set.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the violations in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &ConstraintViolation> {
        self.0.iter()
    }

    pub fn first(&self) -> Option<&ConstraintViolation> {
        self.0.first()
    }

    pub fn contains(&self, violation: &ConstraintViolation) -> bool {
        self.0.contains(violation)
    }

    /// Returns all violations at the specified path.
    pub fn at_path(&self, path: &Path) -> Vec<&ConstraintViolation> {
        self.0.iter().filter(|v| &v.path == path).collect()
    }

    /// Groups violations by path.
    ///
    /// Paths appear in the order of their first violation.
    pub fn by_path(&self) -> IndexMap<&Path, Vec<&ConstraintViolation>> {
        let mut index: IndexMap<&Path, Vec<&ConstraintViolation>> = IndexMap::new();
        for violation in &self.0 {
            index.entry(&violation.path).or_default().push(violation);
        }
        index
    }

    pub(crate) fn insert(&mut self, violation: ConstraintViolation) -> bool {
        self.0.insert(violation)
    }
}

impl PartialEq for ConstraintViolationSet {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for ConstraintViolationSet {}

impl Hash for ConstraintViolationSet {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let mut sorted: Vec<_> = self.0.iter().collect();
        sorted.sort();
        sorted.hash(state);
    }
}

impl Semigroup for ConstraintViolationSet {
    fn combine(mut self, other: Self) -> Self {
        self.0.extend(other.0);
        self
    }
}

impl FromIterator<ConstraintViolation> for ConstraintViolationSet {
    fn from_iter<I: IntoIterator<Item = ConstraintViolation>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Display for ConstraintViolationSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Validation failed with {} violation(s):", self.len())?;
        for (i, violation) in self.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, violation)?;
        }
        Ok(())
    }
}

impl IntoIterator for ConstraintViolationSet {
    type Item = ConstraintViolation;
    type IntoIter = indexmap::set::IntoIter<ConstraintViolation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ConstraintViolationSet {
    type Item = &'a ConstraintViolation;
    type IntoIter = indexmap::set::Iter<'a, ConstraintViolation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<ConstraintViolationSet>();
    assert_sync::<ConstraintViolationSet>();
};
