//! Path representation for locating values in nested structures.
//!
//! This module provides [`Path`], the ordered list of segments naming a field
//! or element inside the validated value, and [`PathBuilder`], which computes
//! paths relative to a node of the validation tree.

use std::fmt::{self, Display};
use std::sync::Arc;

/// A path to a value in a nested structure.
///
/// Segments are plain strings: field names for struct members and
/// string-encoded indices (`"0"`, `"1"`, ...) for sequence elements.
///
/// # Example
///
/// ```rust
/// use constrain::Path;
///
/// let path = Path::root().push("users").push("0").push("email");
///
/// assert_eq!(path.to_string(), "users.0.email");
/// assert_eq!(path, Path::from(["users", "0", "email"]));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Path {
    segments: Vec<String>,
}

impl Path {
    /// Creates an empty path representing the root value.
    pub fn root() -> Self {
        Self::default()
    }

    /// Creates a path from any sequence of segments.
    pub fn new<I>(segments: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns a new path with a segment appended.
    ///
    /// This method does not modify the original path; it returns a new one.
    pub fn push(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment.into());
        Self { segments }
    }

    /// Returns a new path made of this path followed by every segment of `other`.
    pub fn join(&self, other: &Path) -> Self {
        let mut segments = Vec::with_capacity(self.segments.len() + other.segments.len());
        segments.extend_from_slice(&self.segments);
        segments.extend_from_slice(&other.segments);
        Self { segments }
    }

    /// Returns true if this is the root path (no segments).
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns the number of segments in this path.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true if this path has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns an iterator over the path segments.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().map(String::as_str)
    }

    /// Returns the segments as a slice.
    pub fn as_slice(&self) -> &[String] {
        &self.segments
    }

    /// Returns the parent path (all segments except the last), or None if this is root.
    pub fn parent(&self) -> Option<Self> {
        if self.segments.is_empty() {
            None
        } else {
            Some(Self {
                segments: self.segments[..self.segments.len() - 1].to_vec(),
            })
        }
    }

    /// Returns the last segment, or None if this is root.
    pub fn last(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    fn extended<I>(mut self, segments: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.segments.extend(segments.into_iter().map(Into::into));
        self
    }
}

impl Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

impl<S: Into<String>, const N: usize> From<[S; N]> for Path {
    fn from(segments: [S; N]) -> Self {
        Self::new(segments)
    }
}

impl From<Vec<String>> for Path {
    fn from(segments: Vec<String>) -> Self {
        Self { segments }
    }
}

impl<S: Into<String>> FromIterator<S> for Path {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

/// The path-defining context of one node in the validation tree.
///
/// A node knows its own segment and holds a back-reference to its parent.
/// The reference only serves path computation; values are never reached
/// through it.
#[derive(Debug)]
pub(crate) struct PathNode {
    segment: Option<String>,
    parent: Option<Arc<PathNode>>,
}

impl PathNode {
    pub(crate) fn orphan(segment: Option<String>) -> Arc<Self> {
        Arc::new(Self {
            segment,
            parent: None,
        })
    }

    pub(crate) fn child(parent: &Arc<Self>, segment: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            segment: Some(segment.into()),
            parent: Some(Arc::clone(parent)),
        })
    }

    /// Walks up to the root collecting segments.
    pub(crate) fn path(&self) -> Path {
        let mut segments = Vec::new();
        let mut current = Some(self);
        while let Some(node) = current {
            if let Some(segment) = &node.segment {
                segments.push(segment.clone());
            }
            current = node.parent.as_deref();
        }
        segments.reverse();
        Path { segments }
    }

    fn parent_path(&self) -> Path {
        self.parent
            .as_deref()
            .map(PathNode::path)
            .unwrap_or_default()
    }
}

/// Computes paths anchored on a node of the validation tree.
///
/// Handed to [`Constraint::with_path`](crate::Constraint::with_path) and
/// [`Validatable::path_with`](crate::Validatable::path_with).
///
/// # Example
///
/// ```rust
/// use constrain::{Configuration, ConstraintRegistry, Path, Validatable};
///
/// let registry = ConstraintRegistry::new(Configuration::default());
/// let value = (1, 2);
/// let root = Validatable::root(&value, &registry);
/// let first = root.field("first", |v| &v.0);
///
/// assert_eq!(first.path_with(|p| p.appended(["x"])), Path::from(["first", "x"]));
/// assert_eq!(first.path_with(|p| p.relative(["second"])), Path::from(["second"]));
/// assert_eq!(first.path_with(|p| p.absolute(["y"])), Path::from(["y"]));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct PathBuilder<'n> {
    node: &'n PathNode,
}

impl<'n> PathBuilder<'n> {
    pub(crate) fn new(node: &'n PathNode) -> Self {
        Self { node }
    }

    /// A path made of the given segments only, ignoring ancestry.
    pub fn absolute<I>(&self, segments: I) -> Path
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Path::new(segments)
    }

    /// The path of the node's parent followed by the given segments.
    ///
    /// A node without a parent has nothing to inherit, so this is the same
    /// as [`absolute`](Self::absolute).
    pub fn relative<I>(&self, segments: I) -> Path
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.node.parent_path().extended(segments)
    }

    /// The full path of the node followed by the given segments.
    pub fn appended<I>(&self, segments: I) -> Path
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.node.path().extended(segments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_path_is_empty() {
        let path = Path::root();
        assert!(path.is_root());
        assert!(path.is_empty());
        assert_eq!(path.len(), 0);
        assert_eq!(path.to_string(), "");
    }

    #[test]
    fn test_nested_segments_display() {
        let path = Path::root().push("body").push("items").push("0").push("name");
        assert_eq!(path.to_string(), "body.items.0.name");
    }

    #[test]
    fn test_path_immutability() {
        let base = Path::root().push("users");
        let path_a = base.push("0");
        let path_b = base.push("1");

        assert_eq!(base.to_string(), "users");
        assert_eq!(path_a.to_string(), "users.0");
        assert_eq!(path_b.to_string(), "users.1");
    }

    #[test]
    fn test_join_prepends_receiver() {
        let root = Path::from(["foo", "bar"]);
        let joined = root.join(&Path::from(["baz"]));
        assert_eq!(joined, Path::from(["foo", "bar", "baz"]));
        assert_eq!(root.len(), 2);
    }

    #[test]
    fn test_segment_views() {
        let path = Path::from(["users", "0"]);
        assert_eq!(path.as_slice(), ["users".to_string(), "0".to_string()]);
        assert_eq!(path.segments().collect::<Vec<_>>(), vec!["users", "0"]);
        assert!(Path::root().as_slice().is_empty());
    }

    #[test]
    fn test_parent_and_last() {
        let path = Path::from(["a", "b"]);
        assert_eq!(path.last(), Some("b"));
        assert_eq!(path.parent(), Some(Path::from(["a"])));
        assert!(Path::root().parent().is_none());
        assert_eq!(Path::root().last(), None);
    }

    #[test]
    fn test_equality_is_order_sensitive() {
        assert_eq!(Path::from(["a", "b"]), Path::from(["a", "b"]));
        assert_ne!(Path::from(["a", "b"]), Path::from(["b", "a"]));
    }

    #[test]
    fn test_node_path_walks_ancestors() {
        let root = PathNode::orphan(None);
        let a = PathNode::child(&root, "a");
        let b = PathNode::child(&a, "b");

        assert_eq!(root.path(), Path::root());
        assert_eq!(b.path(), Path::from(["a", "b"]));
        assert_eq!(b.parent_path(), Path::from(["a"]));
    }

    #[test]
    fn test_orphan_with_segment() {
        let node = PathNode::orphan(Some("foo".to_string()));
        let builder = PathBuilder::new(&node);

        assert_eq!(node.path(), Path::from(["foo"]));
        assert_eq!(builder.absolute(["bar", "baz"]), Path::from(["bar", "baz"]));
        assert_eq!(builder.relative(["bar"]), Path::from(["bar"]));
        assert_eq!(builder.appended(["bar"]), Path::from(["foo", "bar"]));
    }

    #[test]
    fn test_relative_uses_parent_path() {
        let parent = PathNode::orphan(Some("foo".to_string()));
        let child = PathNode::child(&parent, "bar");

        assert_eq!(PathBuilder::new(&child).relative(["baz"]), Path::from(["foo", "baz"]));
    }

    #[test]
    fn test_rootless_orphan_relative_equals_absolute() {
        let orphan = PathNode::orphan(None);
        let builder = PathBuilder::new(&orphan);
        assert_eq!(builder.relative(["x"]), builder.absolute(["x"]));
    }
}
