//! Structural validation for rich-text documents.
//!
//! The decoder accepts any tree it can represent, so that content coming
//! back from the API is never dropped. This module checks the nesting
//! rules a well-formed document follows:
//! - top-level, blockquote and list-item content is block-level
//! - lists contain only list items
//! - paragraph, heading, hyperlink and inline-embed content is inline-level
//! - inline embeds target entries, block embeds have no children
//! - opaque nodes and unknown marks would decode back to themselves
//!
//! Opaque nodes are accepted anywhere; only their `nodeType` is inspected.

use serde_json::Value;

use crate::codec::Path;
use crate::codec::wire::{self, CONTENT, MARKS, NODE_TYPE};
use crate::error::ValidationError;
use crate::model::{Document, LinkType, Mark, Node, Placement};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Context {
    Block,
    Inline,
    List,
}

/// Validates a document, reporting the first problem in document order.
pub fn validate_document(doc: &Document) -> Result<(), ValidationError> {
    let mut path = Path::root();
    validate_content(doc.content(), Context::Block, &mut path)
}

/// Validates a node as if it were top-level block content.
pub fn validate_node(node: &Node) -> Result<(), ValidationError> {
    let mut path = Path::root();
    check_placement(node, Context::Block, &path)?;
    validate_children(node, &mut path)
}

fn validate_content(nodes: &[Node], context: Context, path: &mut Path) -> Result<(), ValidationError> {
    path.push_key(CONTENT);
    for (index, node) in nodes.iter().enumerate() {
        path.push_index(index);
        check_placement(node, context, path)?;
        validate_children(node, path)?;
        path.pop();
    }
    path.pop();
    Ok(())
}

/// Checks that `node` may appear in `context`.
fn check_placement(node: &Node, context: Context, path: &Path) -> Result<(), ValidationError> {
    if matches!(node, Node::Opaque(_)) {
        return Ok(());
    }
    match context {
        Context::List => {
            if !matches!(node, Node::ListItem { .. }) {
                return Err(ValidationError::NotAListItem {
                    path: path.clone(),
                    found: node.name(),
                });
            }
        }
        Context::Block => {
            if matches!(node, Node::ListItem { .. }) {
                return Err(ValidationError::OrphanListItem { path: path.clone() });
            }
            if node.is_inline() {
                return Err(ValidationError::InlineInBlockContent {
                    path: path.clone(),
                    found: node.name(),
                });
            }
        }
        Context::Inline => {
            if !node.is_inline() {
                return Err(ValidationError::BlockInInlineContent {
                    path: path.clone(),
                    found: node.name(),
                });
            }
        }
    }
    Ok(())
}

/// Checks node-local invariants, then recurses into the children.
fn validate_children(node: &Node, path: &mut Path) -> Result<(), ValidationError> {
    match node {
        Node::Text(text) => check_marks(&text.marks, path),
        Node::HorizontalRule => Ok(()),
        Node::Opaque(raw) => check_opaque(raw, path),
        Node::Paragraph { content } | Node::Heading { content, .. } => {
            validate_content(content, Context::Inline, path)
        }
        Node::Blockquote { content } | Node::ListItem { content } => {
            validate_content(content, Context::Block, path)
        }
        Node::UnorderedList { content } | Node::OrderedList { content } => {
            validate_content(content, Context::List, path)
        }
        Node::HyperLink(link) => validate_content(&link.content, Context::Inline, path),
        Node::EmbeddedLink(embed) => match embed.placement {
            Placement::Block if !embed.content.is_empty() => {
                Err(ValidationError::BlockEmbedHasContent {
                    path: path.clone(),
                    len: embed.content.len(),
                })
            }
            Placement::Block => Ok(()),
            Placement::Inline if embed.target.link_type == LinkType::Asset => {
                Err(ValidationError::InlineAssetEmbed { path: path.clone() })
            }
            Placement::Inline => validate_content(&embed.content, Context::Inline, path),
        },
    }
}

/// An opaque payload must be an object tagged with an unrecognized
/// `nodeType`; anything else decodes to a different node, or not at all.
pub(crate) fn check_opaque(raw: &Value, path: &Path) -> Result<(), ValidationError> {
    let Some(node_type) = raw.get(NODE_TYPE).and_then(Value::as_str) else {
        return Err(ValidationError::OpaqueNotANode { path: path.clone() });
    };
    if wire::lookup(node_type).is_some() {
        return Err(ValidationError::OpaqueShadowsKnownKind {
            path: path.clone(),
            node_type: node_type.to_string(),
        });
    }
    Ok(())
}

/// `Mark::Other` must not carry one of the six known names.
pub(crate) fn check_marks(marks: &[Mark], path: &Path) -> Result<(), ValidationError> {
    let Some(index) = marks
        .iter()
        .position(|mark| !mark.is_known() && Mark::from_wire(mark.as_wire()).is_known())
    else {
        return Ok(());
    };
    let mut path = path.with_key(MARKS);
    path.push_index(index);
    Err(ValidationError::OtherMarkShadowsKnown {
        path,
        name: marks[index].as_wire().to_string(),
    })
}
