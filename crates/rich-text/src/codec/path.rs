//! Key/index trail locating a subtree inside a rich-text payload.

use std::fmt;

/// One step of a [`Path`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Object member.
    Key(&'static str),
    /// Array element.
    Index(usize),
}

/// Location of a node relative to the field root.
///
/// Displays as a JSON Pointer (RFC 6901), e.g. `/content/0/data/target`.
/// The root is the empty pointer. Keys are wire field names, which never
/// contain `/` or `~`, so no escaping is needed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Path {
    segments: Vec<Segment>,
}

impl Path {
    /// Creates the empty (root) path.
    pub fn root() -> Self {
        Self::default()
    }

    /// Returns true if this is the root path.
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns the segments from the root down.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Appends an object member step.
    pub fn push_key(&mut self, key: &'static str) {
        self.segments.push(Segment::Key(key));
    }

    /// Appends an array element step.
    pub fn push_index(&mut self, index: usize) {
        self.segments.push(Segment::Index(index));
    }

    /// Removes the last step.
    pub fn pop(&mut self) -> Option<Segment> {
        self.segments.pop()
    }

    /// Returns a copy of this path extended by one key.
    pub fn with_key(&self, key: &'static str) -> Self {
        let mut path = self.clone();
        path.push_key(key);
        path
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            match segment {
                Segment::Key(key) => write!(f, "/{key}")?,
                Segment::Index(index) => write!(f, "/{index}")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_is_empty_pointer() {
        let path = Path::root();
        assert!(path.is_root());
        assert_eq!(path.to_string(), "");
    }

    #[test]
    fn test_push_pop() {
        let mut path = Path::root();
        path.push_key("content");
        path.push_index(3);
        path.push_key("data");
        assert_eq!(path.to_string(), "/content/3/data");

        assert_eq!(path.pop(), Some(Segment::Key("data")));
        assert_eq!(path.segments(), &[Segment::Key("content"), Segment::Index(3)]);
        assert_eq!(path.with_key("marks").to_string(), "/content/3/marks");
    }
}
