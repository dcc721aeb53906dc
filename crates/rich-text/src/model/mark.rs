//! Inline style marks applied to text leaves.

/// An inline annotation on a [`Text`](crate::model::Text) node.
///
/// Unrecognized mark names are kept as [`Mark::Other`] so that a document
/// survives a decode/encode cycle without losing styling the model does
/// not know about.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Mark {
    Bold,
    Italic,
    Underline,
    Code,
    Superscript,
    Subscript,
    /// Any other mark type, stored by its wire name.
    Other(String),
}

impl Mark {
    /// Maps a wire type string to a mark.
    pub fn from_wire(name: &str) -> Mark {
        match name {
            "bold" => Mark::Bold,
            "italic" => Mark::Italic,
            "underline" => Mark::Underline,
            "code" => Mark::Code,
            "superscript" => Mark::Superscript,
            "subscript" => Mark::Subscript,
            other => Mark::Other(other.to_string()),
        }
    }

    /// Creates a mark from an arbitrary name.
    ///
    /// Known names map to their dedicated variant, so `Mark::other("bold")`
    /// is `Mark::Bold`.
    pub fn other(name: impl AsRef<str>) -> Mark {
        Mark::from_wire(name.as_ref())
    }

    /// Returns the wire type string.
    pub fn as_wire(&self) -> &str {
        match self {
            Mark::Bold => "bold",
            Mark::Italic => "italic",
            Mark::Underline => "underline",
            Mark::Code => "code",
            Mark::Superscript => "superscript",
            Mark::Subscript => "subscript",
            Mark::Other(name) => name,
        }
    }

    /// Returns true for the six marks the model names explicitly.
    pub fn is_known(&self) -> bool {
        !matches!(self, Mark::Other(_))
    }
}
