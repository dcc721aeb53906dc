//! Recognized node kinds and their wire discriminators.

use std::fmt;

use crate::error::InvalidHeadingLevel;
use crate::limits::{MAX_HEADING_LEVEL, MIN_HEADING_LEVEL};
use crate::model::LinkType;

/// Level of a heading node, always within 1..=6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HeadingLevel(u8);

impl HeadingLevel {
    pub const H1: HeadingLevel = HeadingLevel(1);
    pub const H2: HeadingLevel = HeadingLevel(2);
    pub const H3: HeadingLevel = HeadingLevel(3);
    pub const H4: HeadingLevel = HeadingLevel(4);
    pub const H5: HeadingLevel = HeadingLevel(5);
    pub const H6: HeadingLevel = HeadingLevel(6);

    /// All levels, outermost first.
    pub const ALL: [HeadingLevel; 6] = [
        HeadingLevel::H1,
        HeadingLevel::H2,
        HeadingLevel::H3,
        HeadingLevel::H4,
        HeadingLevel::H5,
        HeadingLevel::H6,
    ];

    /// Returns the level, or None outside 1..=6.
    pub fn new(level: u8) -> Option<HeadingLevel> {
        (MIN_HEADING_LEVEL..=MAX_HEADING_LEVEL)
            .contains(&level)
            .then_some(HeadingLevel(level))
    }

    /// Returns the numeric level.
    pub fn get(self) -> u8 {
        self.0
    }

    /// Returns the `heading-N` kind for this level.
    pub fn kind(self) -> NodeKind {
        match self.0 {
            1 => NodeKind::Heading1,
            2 => NodeKind::Heading2,
            3 => NodeKind::Heading3,
            4 => NodeKind::Heading4,
            5 => NodeKind::Heading5,
            _ => NodeKind::Heading6,
        }
    }
}

impl TryFrom<u8> for HeadingLevel {
    type Error = InvalidHeadingLevel;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        HeadingLevel::new(level).ok_or(InvalidHeadingLevel(level))
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Every `nodeType` the model understands.
///
/// Anything else decodes to [`Node::Opaque`](crate::model::Node::Opaque).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Document,
    Paragraph,
    Heading1,
    Heading2,
    Heading3,
    Heading4,
    Heading5,
    Heading6,
    Blockquote,
    Hr,
    UnorderedList,
    OrderedList,
    ListItem,
    Hyperlink,
    EntryHyperlink,
    AssetHyperlink,
    EmbeddedEntryBlock,
    EmbeddedAssetBlock,
    EmbeddedEntryInline,
    Text,
}

impl NodeKind {
    /// All recognized kinds.
    pub const ALL: [NodeKind; 20] = [
        NodeKind::Document,
        NodeKind::Paragraph,
        NodeKind::Heading1,
        NodeKind::Heading2,
        NodeKind::Heading3,
        NodeKind::Heading4,
        NodeKind::Heading5,
        NodeKind::Heading6,
        NodeKind::Blockquote,
        NodeKind::Hr,
        NodeKind::UnorderedList,
        NodeKind::OrderedList,
        NodeKind::ListItem,
        NodeKind::Hyperlink,
        NodeKind::EntryHyperlink,
        NodeKind::AssetHyperlink,
        NodeKind::EmbeddedEntryBlock,
        NodeKind::EmbeddedAssetBlock,
        NodeKind::EmbeddedEntryInline,
        NodeKind::Text,
    ];

    /// Returns the wire discriminator.
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Document => "document",
            NodeKind::Paragraph => "paragraph",
            NodeKind::Heading1 => "heading-1",
            NodeKind::Heading2 => "heading-2",
            NodeKind::Heading3 => "heading-3",
            NodeKind::Heading4 => "heading-4",
            NodeKind::Heading5 => "heading-5",
            NodeKind::Heading6 => "heading-6",
            NodeKind::Blockquote => "blockquote",
            NodeKind::Hr => "hr",
            NodeKind::UnorderedList => "unordered-list",
            NodeKind::OrderedList => "ordered-list",
            NodeKind::ListItem => "list-item",
            NodeKind::Hyperlink => "hyperlink",
            NodeKind::EntryHyperlink => "entry-hyperlink",
            NodeKind::AssetHyperlink => "asset-hyperlink",
            NodeKind::EmbeddedEntryBlock => "embedded-entry-block",
            NodeKind::EmbeddedAssetBlock => "embedded-asset-block",
            NodeKind::EmbeddedEntryInline => "embedded-entry-inline",
            NodeKind::Text => "text",
        }
    }

    /// Returns the heading level for heading kinds.
    pub fn heading_level(self) -> Option<HeadingLevel> {
        HeadingLevel::ALL.into_iter().find(|level| level.kind() == self)
    }

    /// Returns the entity type a link kind is bound to.
    ///
    /// `hyperlink` is not bound to any entity type.
    pub fn bound_link_type(self) -> Option<LinkType> {
        match self {
            NodeKind::EntryHyperlink
            | NodeKind::EmbeddedEntryBlock
            | NodeKind::EmbeddedEntryInline => Some(LinkType::Entry),
            NodeKind::AssetHyperlink | NodeKind::EmbeddedAssetBlock => Some(LinkType::Asset),
            _ => None,
        }
    }
}
