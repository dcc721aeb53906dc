//! Data model types for rich text.
//!
//! This module contains the typed document tree:
//! - Marks (inline styles)
//! - Node variants and link targets
//! - The root document
//! - Builders (ergonomic construction)

pub mod builder;
pub mod document;
pub mod kind;
pub mod mark;
pub mod node;

pub use builder::{DocumentBuilder, InlineBuilder, ListBuilder};
pub use document::{Document, Nodes};
pub use kind::{HeadingLevel, NodeKind};
pub use mark::Mark;
pub use node::{EmbeddedLink, EntityLink, HyperLink, LinkTarget, LinkType, Node, Placement, Text};
