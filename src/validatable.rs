//! Nodes of the validation tree.
//!
//! A [`Validatable`] wraps a reference to one value together with its
//! position in the validated structure and the registry of the run it
//! belongs to. Child nodes for fields and sequence elements are derived from
//! their parent, so the path of every constraint follows the shape of the
//! data without being threaded by hand.

use std::fmt;
use std::sync::Arc;

use crate::constraint::Constraint;
use crate::path::{Path, PathBuilder, PathNode};
use crate::registry::ConstraintRegistry;
use crate::Flow;

/// A value under validation, with its path and the registry of its run.
///
/// # Example
///
/// ```rust
/// use constrain::{Configuration, ConstraintRegistry, Path, Validatable};
///
/// #[derive(Debug)]
/// struct Address { city: String }
/// #[derive(Debug)]
/// struct User { address: Address }
///
/// let user = User { address: Address { city: String::new() } };
/// let registry = ConstraintRegistry::new(Configuration::default());
/// let root = Validatable::root(&user, &registry);
///
/// let city = root
///     .field("address", |u| &u.address)
///     .field("city", |a| &a.city);
/// city.constrain(|c| !c.is_empty()).unwrap().explain(|| "required");
///
/// let violations = registry.finalize(user).into_result().unwrap_err();
/// assert_eq!(
///     violations.violations().first().unwrap().path(),
///     &Path::from(["address", "city"])
/// );
/// ```
pub struct Validatable<'a, T: ?Sized> {
    value: &'a T,
    node: Arc<PathNode>,
    registry: &'a ConstraintRegistry,
}

impl<'a, T: ?Sized> Validatable<'a, T> {
    /// Wraps the root value of a run. The root contributes no path segment.
    pub fn root(value: &'a T, registry: &'a ConstraintRegistry) -> Self {
        Self {
            value,
            node: PathNode::orphan(None),
            registry,
        }
    }

    /// Wraps a value that has no parent but names its own path segment.
    pub fn named(value: &'a T, segment: impl Into<String>, registry: &'a ConstraintRegistry) -> Self {
        Self {
            value,
            node: PathNode::orphan(Some(segment.into())),
            registry,
        }
    }

    /// Wraps `value` as a child of this node, under `segment`.
    pub fn child<U: ?Sized>(&self, value: &'a U, segment: impl Into<String>) -> Validatable<'a, U> {
        Validatable {
            value,
            node: PathNode::child(&self.node, segment),
            registry: self.registry,
        }
    }

    /// Wraps the field reached through `accessor`, named `name`.
    ///
    /// The child's path is this node's path followed by `name`.
    pub fn field<U, F>(&self, name: impl Into<String>, accessor: F) -> Validatable<'a, U>
    where
        U: ?Sized,
        F: FnOnce(&'a T) -> &'a U,
    {
        self.child(accessor(self.value), name)
    }

    pub fn value(&self) -> &'a T {
        self.value
    }

    /// The path from the root of the run to this node.
    pub fn path(&self) -> Path {
        self.node.path()
    }

    /// Computes a path anchored on this node.
    pub fn path_with<F>(&self, path: F) -> Path
    where
        F: FnOnce(PathBuilder<'_>) -> Path,
    {
        path(PathBuilder::new(&self.node))
    }

    pub fn registry(&self) -> &'a ConstraintRegistry {
        self.registry
    }

    pub(crate) fn node(&self) -> &Arc<PathNode> {
        &self.node
    }

    /// Evaluates `predicate` against the value and registers the outcome.
    ///
    /// The returned constraint can still be explained or re-pathed; the
    /// registry sees those changes.
    ///
    /// # Errors
    ///
    /// Returns `FirstViolationAbort` without evaluating `predicate` when the
    /// run is fail-fast and already holds a violation.
    pub fn constrain<F>(&self, predicate: F) -> Flow<Constraint>
    where
        F: FnOnce(&'a T) -> bool,
    {
        self.registry.check_first_violation()?;
        Ok(self.register(predicate(self.value)))
    }

    pub(crate) fn register(&self, satisfied: bool) -> Constraint {
        let constraint = Constraint::bound(satisfied, Arc::clone(&self.node));
        self.registry.register(&constraint);
        constraint
    }

    /// Groups this node with another one of the same type.
    pub fn and(&self, other: &Validatable<'a, T>) -> Compound<'a, T> {
        Compound::new(self.clone()).and(other)
    }
}

impl<'a, T> Validatable<'a, Option<T>> {
    /// Like [`constrain`](Self::constrain), but `None` is always satisfied and
    /// the predicate only sees present values.
    ///
    /// # Errors
    ///
    /// Same as [`constrain`](Self::constrain).
    pub fn constrain_if_some<F>(&self, predicate: F) -> Flow<Constraint>
    where
        F: FnOnce(&'a T) -> bool,
    {
        self.constrain(|value| value.as_ref().map_or(true, predicate))
    }

    /// The present value, wrapped at the same path.
    pub fn some(&self) -> Option<Validatable<'a, T>> {
        self.value.as_ref().map(|value| Validatable {
            value,
            node: Arc::clone(&self.node),
            registry: self.registry,
        })
    }

    /// Elements of an optional collection; empty when the value is `None`.
    pub fn iter_some<U>(&self) -> Elements<'a, <&'a T as IntoIterator>::IntoIter>
    where
        &'a T: IntoIterator<Item = &'a U>,
        U: ?Sized + 'a,
    {
        Elements {
            inner: self.value.as_ref().map(|c| c.into_iter().enumerate()),
            parent: Arc::clone(&self.node),
            registry: self.registry,
        }
    }
}

impl<'a, T: ?Sized> Validatable<'a, T> {
    /// Lazily wraps each element of a collection, under its index.
    pub fn iter<U>(&self) -> Elements<'a, <&'a T as IntoIterator>::IntoIter>
    where
        &'a T: IntoIterator<Item = &'a U>,
        U: ?Sized + 'a,
    {
        Elements {
            inner: Some(self.value.into_iter().enumerate()),
            parent: Arc::clone(&self.node),
            registry: self.registry,
        }
    }

    /// Runs `block` for each element of a collection, in order.
    ///
    /// # Errors
    ///
    /// Propagates the first `FirstViolationAbort` returned by `block`.
    pub fn each<U, F>(&self, mut block: F) -> Flow
    where
        &'a T: IntoIterator<Item = &'a U>,
        U: ?Sized + 'a,
        F: FnMut(&Validatable<'a, U>) -> Flow,
    {
        for element in self.iter() {
            block(&element)?;
        }
        Ok(())
    }
}

impl<T: ?Sized> Clone for Validatable<'_, T> {
    fn clone(&self) -> Self {
        Self {
            value: self.value,
            node: Arc::clone(&self.node),
            registry: self.registry,
        }
    }
}

impl<T: ?Sized + PartialEq> PartialEq for Validatable<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value && self.path() == other.path()
    }
}

impl<T: ?Sized + fmt::Debug> fmt::Debug for Validatable<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validatable")
            .field("value", &self.value)
            .field("path", &self.path())
            .finish()
    }
}

/// Lazy iterator over the elements of a wrapped collection.
///
/// Each element is a child of the collection's node whose segment is its
/// index (`"0"`, `"1"`, ...).
pub struct Elements<'a, I> {
    inner: Option<std::iter::Enumerate<I>>,
    parent: Arc<PathNode>,
    registry: &'a ConstraintRegistry,
}

impl<'a, I, U> Iterator for Elements<'a, I>
where
    I: Iterator<Item = &'a U>,
    U: ?Sized + 'a,
{
    type Item = Validatable<'a, U>;

    fn next(&mut self) -> Option<Self::Item> {
        let (index, value) = self.inner.as_mut()?.next()?;
        Some(Validatable {
            value,
            node: PathNode::child(&self.parent, index.to_string()),
            registry: self.registry,
        })
    }
}

/// Several validatables of the same type that receive the same constraints.
///
/// Members keep their own paths; a node already present at the same path is
/// not added twice.
pub struct Compound<'a, T: ?Sized> {
    members: Vec<Validatable<'a, T>>,
}

impl<'a, T: ?Sized> Compound<'a, T> {
    fn new(first: Validatable<'a, T>) -> Self {
        Self {
            members: vec![first],
        }
    }

    pub fn and(mut self, other: &Validatable<'a, T>) -> Self {
        let path = other.path();
        if !self.members.iter().any(|member| member.path() == path) {
            self.members.push(other.clone());
        }
        self
    }

    pub fn members(&self) -> &[Validatable<'a, T>] {
        &self.members
    }

    /// Applies `block` to every member, in the order they were added.
    ///
    /// # Errors
    ///
    /// Propagates the first `FirstViolationAbort` returned by `block`.
    pub fn each<F>(&self, mut block: F) -> Flow
    where
        F: FnMut(&Validatable<'a, T>) -> Flow,
    {
        for member in &self.members {
            block(member)?;
        }
        Ok(())
    }
}
