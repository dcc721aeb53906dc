//! Root container of a rich-text field value.

use std::slice;

use crate::model::builder::DocumentBuilder;
use crate::model::{EntityLink, LinkTarget, Node};

/// A rich-text document.
///
/// Built by the decoder or by [`DocumentBuilder`]; once built its content
/// is only reachable through shared references.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    content: Vec<Node>,
}

impl Document {
    pub(crate) fn from_content(content: Vec<Node>) -> Self {
        Self { content }
    }

    /// Starts building a document.
    pub fn builder() -> DocumentBuilder {
        DocumentBuilder::new()
    }

    /// Returns the top-level block nodes.
    pub fn content(&self) -> &[Node] {
        &self.content
    }

    /// Consumes the document, returning its top-level nodes.
    pub fn into_content(self) -> Vec<Node> {
        self.content
    }

    /// Returns the number of top-level nodes.
    pub fn len(&self) -> usize {
        self.content.len()
    }

    /// Returns true if the document has no content.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Iterates over every node in depth-first pre-order.
    pub fn nodes(&self) -> Nodes<'_> {
        Nodes {
            stack: vec![self.content.iter()],
        }
    }

    /// Returns every referenced entry and asset, in document order.
    ///
    /// Hyperlinks to URIs are skipped. Opaque subtrees are not inspected.
    pub fn entity_links(&self) -> Vec<&EntityLink> {
        self.nodes()
            .filter_map(|node| match node {
                Node::HyperLink(link) => match &link.target {
                    LinkTarget::Entity(entity) => Some(entity),
                    LinkTarget::Uri(_) => None,
                },
                Node::EmbeddedLink(embed) => Some(&embed.target),
                _ => None,
            })
            .collect()
    }
}

/// Depth-first iterator over a document's nodes.
#[derive(Debug, Clone)]
pub struct Nodes<'a> {
    stack: Vec<slice::Iter<'a, Node>>,
}

impl<'a> Iterator for Nodes<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<&'a Node> {
        loop {
            let top = self.stack.last_mut()?;
            match top.next() {
                Some(node) => {
                    let children = node.content();
                    if !children.is_empty() {
                        self.stack.push(children.iter());
                    }
                    return Some(node);
                }
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}
