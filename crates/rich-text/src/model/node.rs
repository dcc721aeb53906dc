//! Node variants of the rich-text tree.

use serde_json::Value;

use crate::model::{HeadingLevel, Mark};

/// Entity type referenced by an [`EntityLink`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkType {
    Entry,
    Asset,
}

impl LinkType {
    /// Parses the wire `linkType` value.
    pub fn from_wire(s: &str) -> Option<LinkType> {
        match s {
            "Entry" => Some(LinkType::Entry),
            "Asset" => Some(LinkType::Asset),
            _ => None,
        }
    }

    /// Returns the wire `linkType` value.
    pub fn as_wire(self) -> &'static str {
        match self {
            LinkType::Entry => "Entry",
            LinkType::Asset => "Asset",
        }
    }
}

impl std::fmt::Display for LinkType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_wire())
    }
}

/// Reference to an Entry or Asset by id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntityLink {
    pub id: String,
    pub link_type: LinkType,
}

impl EntityLink {
    /// Creates a link to an entry.
    pub fn entry(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            link_type: LinkType::Entry,
        }
    }

    /// Creates a link to an asset.
    pub fn asset(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            link_type: LinkType::Asset,
        }
    }
}

/// Target of a hyperlink: a literal URI or an entity reference, never both.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LinkTarget {
    Uri(String),
    Entity(EntityLink),
}

impl LinkTarget {
    /// Returns the entity link, if this target is one.
    pub fn as_entity(&self) -> Option<&EntityLink> {
        match self {
            LinkTarget::Uri(_) => None,
            LinkTarget::Entity(link) => Some(link),
        }
    }

    /// Returns the URI, if this target is one.
    pub fn as_uri(&self) -> Option<&str> {
        match self {
            LinkTarget::Uri(uri) => Some(uri),
            LinkTarget::Entity(_) => None,
        }
    }
}

/// A run of text with its marks, in wire order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Text {
    pub value: String,
    /// Duplicates are kept; order is significant.
    pub marks: Vec<Mark>,
}

impl Text {
    /// Creates an unmarked text run.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            marks: Vec::new(),
        }
    }

    /// Appends a mark.
    pub fn with_mark(mut self, mark: Mark) -> Self {
        self.marks.push(mark);
        self
    }

    /// Returns true if the mark is applied at least once.
    pub fn has_mark(&self, mark: &Mark) -> bool {
        self.marks.contains(mark)
    }
}

/// A hyperlink around inline content.
#[derive(Debug, Clone, PartialEq)]
pub struct HyperLink {
    pub target: LinkTarget,
    pub content: Vec<Node>,
}

/// Whether an embed stands as its own block or sits inside a paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placement {
    Block,
    Inline,
}

/// An embedded entry or asset.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddedLink {
    pub placement: Placement,
    pub target: EntityLink,
    /// Always empty for block embeds.
    pub content: Vec<Node>,
}

impl EmbeddedLink {
    /// Creates a block embed.
    pub fn block(target: EntityLink) -> Self {
        Self {
            placement: Placement::Block,
            target,
            content: Vec::new(),
        }
    }

    /// Creates an inline embed of an entry.
    pub fn inline_entry(id: impl Into<String>) -> Self {
        Self {
            placement: Placement::Inline,
            target: EntityLink::entry(id),
            content: Vec::new(),
        }
    }
}

/// One element of the rich-text tree.
///
/// Every node is owned by exactly one parent `content` vector.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Text(Text),
    Paragraph {
        content: Vec<Node>,
    },
    Heading {
        /// Selects the `heading-N` discriminator.
        level: HeadingLevel,
        content: Vec<Node>,
    },
    Blockquote {
        content: Vec<Node>,
    },
    HorizontalRule,
    UnorderedList {
        content: Vec<Node>,
    },
    OrderedList {
        content: Vec<Node>,
    },
    ListItem {
        content: Vec<Node>,
    },
    HyperLink(HyperLink),
    EmbeddedLink(EmbeddedLink),
    /// Subtree with an unrecognized `nodeType`, kept verbatim.
    ///
    /// Must be an object whose string `nodeType` is not one of
    /// [`NodeKind`](crate::model::NodeKind)'s; the encoder rejects anything
    /// else, since it would not decode back to the same node.
    Opaque(Value),
}

impl Node {
    /// Returns the child nodes. Leaves and opaque nodes have none.
    pub fn content(&self) -> &[Node] {
        match self {
            Node::Paragraph { content }
            | Node::Heading { content, .. }
            | Node::Blockquote { content }
            | Node::UnorderedList { content }
            | Node::OrderedList { content }
            | Node::ListItem { content } => content,
            Node::HyperLink(link) => &link.content,
            Node::EmbeddedLink(embed) => &embed.content,
            Node::Text(_) | Node::HorizontalRule | Node::Opaque(_) => &[],
        }
    }

    /// Short human-readable name of the variant.
    pub fn name(&self) -> &'static str {
        match self {
            Node::Text(_) => "text",
            Node::Paragraph { .. } => "paragraph",
            Node::Heading { .. } => "heading",
            Node::Blockquote { .. } => "blockquote",
            Node::HorizontalRule => "hr",
            Node::UnorderedList { .. } => "unordered-list",
            Node::OrderedList { .. } => "ordered-list",
            Node::ListItem { .. } => "list-item",
            Node::HyperLink(_) => "hyperlink",
            Node::EmbeddedLink(embed) => match embed.placement {
                Placement::Block => "block embed",
                Placement::Inline => "inline embed",
            },
            Node::Opaque(_) => "opaque",
        }
    }

    /// Returns true for nodes that live inside paragraphs and headings.
    pub fn is_inline(&self) -> bool {
        match self {
            Node::Text(_) | Node::HyperLink(_) => true,
            Node::EmbeddedLink(embed) => embed.placement == Placement::Inline,
            _ => false,
        }
    }

    /// Returns the text run, if this is a text leaf.
    pub fn as_text(&self) -> Option<&Text> {
        match self {
            Node::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Returns the `nodeType` of an opaque node.
    pub fn opaque_type(&self) -> Option<&str> {
        match self {
            Node::Opaque(raw) => raw.get("nodeType").and_then(Value::as_str),
            _ => None,
        }
    }
}

impl From<Text> for Node {
    fn from(text: Text) -> Self {
        Node::Text(text)
    }
}

impl From<HyperLink> for Node {
    fn from(link: HyperLink) -> Self {
        Node::HyperLink(link)
    }
}

impl From<EmbeddedLink> for Node {
    fn from(embed: EmbeddedLink) -> Self {
        Node::EmbeddedLink(embed)
    }
}
