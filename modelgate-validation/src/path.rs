// Property path accumulation

use modelgate_core::PathSegment;
use std::fmt;

/// Chain of path segments from the validated root to the current instance.
///
/// Renders as a dotted/indexed path, e.g. `ChildModels[0].Email`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyChain {
    segments: Vec<PathSegment>,
}

impl PropertyChain {
    /// An empty chain (the validated instance itself)
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_segments(segments: impl IntoIterator<Item = PathSegment>) -> Self {
        let mut chain = Self::new();
        for segment in segments {
            chain.push(segment);
        }
        chain
    }

    /// Append a segment. Empty property names are ignored.
    pub fn push(&mut self, segment: PathSegment) {
        if matches!(&segment, PathSegment::Property(name) if name.is_empty()) {
            return;
        }
        self.segments.push(segment);
    }

    pub fn push_property(&mut self, name: impl Into<String>) {
        self.push(PathSegment::Property(name.into()));
    }

    pub fn push_index(&mut self, index: usize) {
        self.push(PathSegment::Index(index));
    }

    /// A copy of this chain extended by `segment`
    pub fn child(&self, segment: PathSegment) -> Self {
        let mut chain = self.clone();
        chain.push(segment);
        chain
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Full path of `property` below this chain
    pub fn build(&self, property: &str) -> String {
        join_path(&self.to_string(), property)
    }
}

impl fmt::Display for PropertyChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 && matches!(segment, PathSegment::Property(_)) {
                f.write_str(".")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

/// Join two path fragments; no separator is added before an index.
pub fn join_path(prefix: &str, path: &str) -> String {
    match (prefix.is_empty(), path.is_empty()) {
        (true, _) => path.to_string(),
        (false, true) => prefix.to_string(),
        (false, false) if path.starts_with('[') => format!("{}{}", prefix, path),
        (false, false) => format!("{}.{}", prefix, path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_chain() {
        let chain = PropertyChain::new();
        assert!(chain.is_empty());
        assert_eq!(chain.to_string(), "");
        assert_eq!(chain.build("Name"), "Name");
    }

    #[test]
    fn test_rendering() {
        let mut chain = PropertyChain::new();
        chain.push_property("ChildModels");
        chain.push_index(0);
        assert_eq!(chain.to_string(), "ChildModels[0]");
        assert_eq!(chain.build("Email"), "ChildModels[0].Email");

        let chain = PropertyChain::from_segments([PathSegment::Index(1)]);
        assert_eq!(chain.build("Surname"), "[1].Surname");
    }

    #[test]
    fn test_empty_property_is_ignored() {
        let chain = PropertyChain::new().child(PathSegment::property(""));
        assert!(chain.is_empty());
    }

    #[test]
    fn test_child_does_not_modify_parent() {
        let parent = PropertyChain::from_segments([PathSegment::property("Child")]);
        let child = parent.child(PathSegment::property("Name"));
        assert_eq!(parent.len(), 1);
        assert_eq!(child.to_string(), "Child.Name");
    }

    #[test]
    fn test_join_path() {
        assert_eq!(join_path("", "Email"), "Email");
        assert_eq!(join_path("test", ""), "test");
        assert_eq!(join_path("test", "[0].Email"), "test[0].Email");
        assert_eq!(join_path("test", "Id"), "test.Id");
    }
}
