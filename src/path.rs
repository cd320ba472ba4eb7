//! Field paths for locating values inside a request payload.
//!
//! Every [`Violation`](crate::Violation) names the offending field through a
//! [`FieldPath`], rendered the way clients see it (`address.lines[0]`).

use std::fmt::{self, Display};

/// One step into a payload: an object key or an array position.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// An object key (e.g., `email`)
    Field(String),
    /// An array position (e.g., `[2]`)
    Index(usize),
}

/// The location of a value inside a payload.
///
/// Paths are immutable; `push_field` and `push_index` return extended copies
/// so sibling fields can share a common parent.
///
/// # Example
///
/// ```rust
/// use intake::FieldPath;
///
/// let path = FieldPath::root()
///     .push_field("address")
///     .push_field("lines")
///     .push_index(0);
///
/// assert_eq!(path.to_string(), "address.lines[0]");
/// assert_eq!(path.field_name(), "lines");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct FieldPath {
    segments: Vec<PathSegment>,
}

impl FieldPath {
    /// The payload itself.
    pub fn root() -> Self {
        Self::default()
    }

    /// A path of a single top-level field.
    pub fn from_field(name: impl Into<String>) -> Self {
        Self {
            segments: vec![PathSegment::Field(name.into())],
        }
    }

    /// Returns a new path with an object key appended.
    pub fn push_field(&self, name: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Field(name.into()));
        Self { segments }
    }

    /// Returns a new path with an array position appended.
    pub fn push_index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Index(index));
        Self { segments }
    }

    /// True for the path of the payload itself.
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Same as [`is_root`](Self::is_root).
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Iterates the segments from the root down.
    pub fn segments(&self) -> impl Iterator<Item = &PathSegment> {
        self.segments.iter()
    }

    /// Returns the nearest field name, used as the subject of violation messages.
    ///
    /// Array positions are skipped, so `tags[3]` yields `tags`. The root path
    /// yields `value`.
    pub fn field_name(&self) -> &str {
        self.segments
            .iter()
            .rev()
            .find_map(|segment| match segment {
                PathSegment::Field(name) => Some(name.as_str()),
                PathSegment::Index(_) => None,
            })
            .unwrap_or("value")
    }
}

impl Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Field(name) => {
                    if i > 0 {
                        write!(f, ".")?;
                    }
                    write!(f, "{}", name)?;
                }
                PathSegment::Index(idx) => write!(f, "[{}]", idx)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_renders_empty() {
        let path = FieldPath::root();
        assert!(path.is_root());
        assert_eq!(path.len(), 0);
        assert_eq!(path.to_string(), "");
    }

    #[test]
    fn test_nested_fields_are_dotted() {
        let path = FieldPath::root().push_field("user").push_field("email");
        assert_eq!(path.to_string(), "user.email");
    }

    #[test]
    fn test_indices_are_bracketed() {
        let path = FieldPath::root()
            .push_field("items")
            .push_index(2)
            .push_field("sku");
        assert_eq!(path.to_string(), "items[2].sku");

        let path = FieldPath::root().push_index(0);
        assert_eq!(path.to_string(), "[0]");
    }

    #[test]
    fn test_push_leaves_parent_untouched() {
        let base = FieldPath::from_field("tags");
        let first = base.push_index(0);
        let second = base.push_index(1);

        assert_eq!(base.to_string(), "tags");
        assert_eq!(first.to_string(), "tags[0]");
        assert_eq!(second.to_string(), "tags[1]");
    }

    #[test]
    fn test_field_name_skips_indices() {
        assert_eq!(FieldPath::root().field_name(), "value");
        assert_eq!(FieldPath::from_field("name").field_name(), "name");
        assert_eq!(
            FieldPath::from_field("tags").push_index(3).field_name(),
            "tags"
        );
        assert_eq!(FieldPath::root().push_index(3).field_name(), "value");
    }

    #[test]
    fn test_segments_iterator() {
        let path = FieldPath::root().push_field("a").push_index(1);
        let segments: Vec<_> = path.segments().collect();
        assert_eq!(segments[0], &PathSegment::Field("a".to_string()));
        assert_eq!(segments[1], &PathSegment::Index(1));
    }
}
