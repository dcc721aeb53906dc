//! Builder API for ergonomic Document construction.
//!
//! Provides a fluent interface for building rich-text trees. Nested
//! containers are filled through closures, so a half-built subtree is
//! never visible to other code.
//!
//! # Example
//!
//! ```rust
//! use rich_text::{DocumentBuilder, HeadingLevel, Mark};
//!
//! let doc = DocumentBuilder::new()
//!     .heading(HeadingLevel::H1, |h| h.text("Release notes"))
//!     .paragraph(|p| p
//!         .text("Read the ")
//!         .hyperlink("https://www.example.com/", |l| l.styled("docs", &[Mark::Bold]))
//!         .text(" first.")
//!     )
//!     .unordered_list(|l| l
//!         .item(|i| i.paragraph(|p| p.text("one")))
//!         .item(|i| i.paragraph(|p| p.text("two")))
//!     )
//!     .hr()
//!     .embedded_entry("BvBm2SNTEs40wUwyoI0Qo")
//!     .build();
//!
//! assert_eq!(doc.len(), 5);
//! ```

use crate::model::{
    Document, EmbeddedLink, EntityLink, HeadingLevel, HyperLink, LinkTarget, Mark, Node, Placement,
    Text,
};

/// Builder for block-level content: the document root, blockquotes and
/// list items.
#[derive(Debug, Clone, Default)]
pub struct DocumentBuilder {
    content: Vec<Node>,
}

impl DocumentBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an already-built node.
    pub fn add_content(mut self, node: impl Into<Node>) -> Self {
        self.content.push(node.into());
        self
    }

    /// Appends several already-built nodes in order.
    pub fn extend(mut self, nodes: impl IntoIterator<Item = Node>) -> Self {
        self.content.extend(nodes);
        self
    }

    // =========================================================================
    // Text Blocks
    // =========================================================================

    /// Adds a paragraph using a builder function.
    pub fn paragraph<F>(mut self, f: F) -> Self
    where
        F: FnOnce(InlineBuilder) -> InlineBuilder,
    {
        let builder = f(InlineBuilder::new());
        self.content.push(Node::Paragraph {
            content: builder.content,
        });
        self
    }

    /// Adds a heading. Use [`HeadingLevel::new`] or `try_from` to check a
    /// numeric level first.
    pub fn heading<F>(mut self, level: HeadingLevel, f: F) -> Self
    where
        F: FnOnce(InlineBuilder) -> InlineBuilder,
    {
        let builder = f(InlineBuilder::new());
        self.content.push(Node::Heading {
            level,
            content: builder.content,
        });
        self
    }

    /// Adds a blockquote using a nested block builder.
    pub fn blockquote<F>(mut self, f: F) -> Self
    where
        F: FnOnce(DocumentBuilder) -> DocumentBuilder,
    {
        let builder = f(DocumentBuilder::new());
        self.content.push(Node::Blockquote {
            content: builder.content,
        });
        self
    }

    /// Adds a horizontal rule.
    pub fn hr(mut self) -> Self {
        self.content.push(Node::HorizontalRule);
        self
    }

    // =========================================================================
    // Lists
    // =========================================================================

    /// Adds a bulleted list using a builder function.
    pub fn unordered_list<F>(mut self, f: F) -> Self
    where
        F: FnOnce(ListBuilder) -> ListBuilder,
    {
        let builder = f(ListBuilder::new());
        self.content.push(Node::UnorderedList {
            content: builder.items,
        });
        self
    }

    /// Adds a numbered list using a builder function.
    pub fn ordered_list<F>(mut self, f: F) -> Self
    where
        F: FnOnce(ListBuilder) -> ListBuilder,
    {
        let builder = f(ListBuilder::new());
        self.content.push(Node::OrderedList {
            content: builder.items,
        });
        self
    }

    // =========================================================================
    // Embeds
    // =========================================================================

    /// Adds a block embed of an entry.
    pub fn embedded_entry(mut self, id: impl Into<String>) -> Self {
        self.content
            .push(EmbeddedLink::block(EntityLink::entry(id)).into());
        self
    }

    /// Adds a block embed of an asset.
    pub fn embedded_asset(mut self, id: impl Into<String>) -> Self {
        self.content
            .push(EmbeddedLink::block(EntityLink::asset(id)).into());
        self
    }

    /// Finishes the document.
    pub fn build(self) -> Document {
        Document::from_content(self.content)
    }
}

/// Builder for inline content: paragraphs, headings and hyperlinks.
#[derive(Debug, Clone, Default)]
pub struct InlineBuilder {
    content: Vec<Node>,
}

impl InlineBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an already-built node.
    pub fn add_content(mut self, node: impl Into<Node>) -> Self {
        self.content.push(node.into());
        self
    }

    /// Adds an unmarked text run.
    pub fn text(mut self, value: impl Into<String>) -> Self {
        self.content.push(Text::new(value).into());
        self
    }

    /// Adds a text run with marks, kept in the given order.
    ///
    /// A [`Mark::Other`] spelling a known name becomes that mark.
    pub fn styled(mut self, value: impl Into<String>, marks: &[Mark]) -> Self {
        self.content.push(
            Text {
                value: value.into(),
                marks: marks.iter().map(|mark| Mark::other(mark.as_wire())).collect(),
            }
            .into(),
        );
        self
    }

    /// Adds a hyperlink to a URI.
    pub fn hyperlink<F>(self, uri: impl Into<String>, f: F) -> Self
    where
        F: FnOnce(InlineBuilder) -> InlineBuilder,
    {
        self.link(LinkTarget::Uri(uri.into()), f)
    }

    /// Adds a hyperlink to an entry.
    pub fn entry_hyperlink<F>(self, id: impl Into<String>, f: F) -> Self
    where
        F: FnOnce(InlineBuilder) -> InlineBuilder,
    {
        self.link(LinkTarget::Entity(EntityLink::entry(id)), f)
    }

    /// Adds a hyperlink to an asset.
    pub fn asset_hyperlink<F>(self, id: impl Into<String>, f: F) -> Self
    where
        F: FnOnce(InlineBuilder) -> InlineBuilder,
    {
        self.link(LinkTarget::Entity(EntityLink::asset(id)), f)
    }

    fn link<F>(mut self, target: LinkTarget, f: F) -> Self
    where
        F: FnOnce(InlineBuilder) -> InlineBuilder,
    {
        let builder = f(InlineBuilder::new());
        self.content.push(
            HyperLink {
                target,
                content: builder.content,
            }
            .into(),
        );
        self
    }

    /// Adds an inline embed of an entry.
    pub fn embedded_entry_inline(mut self, id: impl Into<String>) -> Self {
        self.content.push(
            EmbeddedLink {
                placement: Placement::Inline,
                target: EntityLink::entry(id),
                content: Vec::new(),
            }
            .into(),
        );
        self
    }
}

/// Builder for list content. Each item holds block content.
#[derive(Debug, Clone, Default)]
pub struct ListBuilder {
    items: Vec<Node>,
}

impl ListBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a list item using a nested block builder.
    pub fn item<F>(mut self, f: F) -> Self
    where
        F: FnOnce(DocumentBuilder) -> DocumentBuilder,
    {
        let builder = f(DocumentBuilder::new());
        self.items.push(Node::ListItem {
            content: builder.content,
        });
        self
    }

    /// Appends an already-built node, normally a [`Node::ListItem`].
    pub fn add_content(mut self, node: impl Into<Node>) -> Self {
        self.items.push(node.into());
        self
    }
}
