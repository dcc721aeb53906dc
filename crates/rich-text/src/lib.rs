//! Rich text: typed document model and JSON codec for structured-text fields.
//!
//! A rich-text field holds a tree of nodes (paragraphs, headings, lists,
//! quotes, hyperlinks, embedded entries and assets) with inline style marks
//! on text leaves. This crate turns the API's JSON representation of such a
//! field into a typed [`Document`] and back.
//!
//! # Quick Start
//!
//! ```rust
//! use rich_text::{decode, encode, DocumentBuilder, LinkTarget, Mark, Node};
//! use serde_json::json;
//!
//! let json = json!({
//!     "nodeType": "document",
//!     "content": [{
//!         "nodeType": "paragraph",
//!         "content": [
//!             {"nodeType": "text", "value": "Hello ", "marks": []},
//!             {
//!                 "nodeType": "hyperlink",
//!                 "data": {"uri": "https://www.example.com/"},
//!                 "content": [
//!                     {"nodeType": "text", "value": "world", "marks": [{"type": "bold"}]}
//!                 ]
//!             }
//!         ]
//!     }]
//! });
//!
//! // Decode the fetched field value
//! let doc = decode(&json).unwrap();
//! match &doc.content()[0].content()[1] {
//!     Node::HyperLink(link) => {
//!         assert_eq!(link.target, LinkTarget::Uri("https://www.example.com/".into()));
//!     }
//!     other => panic!("unexpected node {other:?}"),
//! }
//!
//! // Encode it back for an update request
//! assert_eq!(encode(&doc).unwrap(), json);
//!
//! // Or build one from scratch
//! let doc = DocumentBuilder::new()
//!     .paragraph(|p| p.text("Hello ").styled("world", &[Mark::Bold]))
//!     .build();
//! assert_eq!(doc.len(), 1);
//! ```
//!
//! # Modules
//!
//! - [`model`]: Document tree types (Node, Mark, LinkTarget) and builders
//! - [`codec`]: JSON decoding/encoding and the serde bridge
//! - [`validate`]: Structural well-formedness checks
//! - [`error`]: Error types
//! - [`limits`]: Decoder limits
//!
//! # Forward Compatibility
//!
//! Node kinds the model does not know decode to [`Node::Opaque`], which
//! re-encodes byte for byte. Unknown mark names decode to [`Mark::Other`].
//! A field that is fetched, edited elsewhere and saved again keeps content
//! this crate cannot interpret.
//!
//! # Thread Safety
//!
//! Decoding and encoding are pure functions over owned trees. A built
//! [`Document`] is `Send + Sync` and read-only; builders consume themselves
//! on every call, so a half-built tree has a single owner.

pub mod codec;
pub mod error;
pub mod limits;
pub mod model;
pub mod validate;

// Re-export commonly used types at crate root
pub use codec::{
    DecodeOptions, EncodeOptions, Path, UnknownNodePolicy, decode, decode_node, decode_str,
    decode_with_options, encode, encode_node, encode_to_string, encode_with_options,
};
pub use error::{
    DecodeError, EncodeError, ErrorCode, InvalidHeadingLevel, MalformedReason, ValidationError,
};
pub use model::{
    Document, DocumentBuilder, EmbeddedLink, EntityLink, HeadingLevel, HyperLink, InlineBuilder,
    LinkTarget, LinkType, ListBuilder, Mark, Node, NodeKind, Placement, Text,
};
pub use validate::{validate_document, validate_node};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
