//! Error types for rich-text decoding, encoding and validation.

use thiserror::Error;

use crate::codec::Path;
use crate::model::LinkType;

/// Stable error codes, grouping error variants into families.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// E001: Input is not valid JSON text
    InvalidJson,
    /// E002: Structurally malformed document
    MalformedDocument,
    /// E003: Unrecognized node kind rejected by strict decoding
    UnsupportedNode,
    /// E004: Decoder limit exceeded
    LimitExceeded,
    /// E005: Tree violates an invariant needed for encoding
    InvariantViolation,
}

impl ErrorCode {
    /// Returns the error code string (e.g., "E001").
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::InvalidJson => "E001",
            ErrorCode::MalformedDocument => "E002",
            ErrorCode::UnsupportedNode => "E003",
            ErrorCode::LimitExceeded => "E004",
            ErrorCode::InvariantViolation => "E005",
        }
    }
}

/// Why a subtree could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedReason {
    #[error("missing required field `{field}`")]
    MissingField { field: &'static str },

    #[error("expected {expected}, found {found}")]
    WrongType {
        expected: &'static str,
        found: &'static str,
    },

    #[error("link data has neither a `uri` string nor a `target` link object")]
    InvalidLinkData,

    #[error("unknown link type {link_type:?} (expected Entry or Asset)")]
    UnknownLinkType { link_type: String },

    #[error("{node_type} node cannot link to {found}")]
    LinkKindMismatch {
        node_type: &'static str,
        found: &'static str,
    },

    #[error("{node_type} node cannot have children")]
    UnexpectedContent { node_type: &'static str },

    #[error("root node must be a document, found {node_type:?}")]
    NotADocument { node_type: String },

    #[error("document node is only valid at the root")]
    NestedDocument,

    #[error("unknown node type {node_type:?}")]
    UnknownNodeType { node_type: String },

    #[error("nesting exceeds maximum depth {max}")]
    TooDeep { max: usize },
}

/// Error during rich-text decoding.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    #[error("[E001] invalid JSON: {0}")]
    Json(String),

    #[error("[{}] malformed document at `{path}`: {reason}", code_of(.reason).code())]
    MalformedDocument { path: Path, reason: MalformedReason },
}

fn code_of(reason: &MalformedReason) -> ErrorCode {
    match reason {
        MalformedReason::UnknownNodeType { .. } => ErrorCode::UnsupportedNode,
        MalformedReason::TooDeep { .. } => ErrorCode::LimitExceeded,
        _ => ErrorCode::MalformedDocument,
    }
}

impl DecodeError {
    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            DecodeError::Json(_) => ErrorCode::InvalidJson,
            DecodeError::MalformedDocument { reason, .. } => code_of(reason),
        }
    }

    /// Returns the location of the offending subtree, if known.
    pub fn path(&self) -> Option<&Path> {
        match self {
            DecodeError::Json(_) => None,
            DecodeError::MalformedDocument { path, .. } => Some(path),
        }
    }
}

/// A heading level outside 1..=6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("heading level {0} is outside 1..=6")]
pub struct InvalidHeadingLevel(pub u8);

/// Structural problem found in an in-memory tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("inline embed at `{path}` targets an asset; only entries can be embedded inline")]
    InlineAssetEmbed { path: Path },

    #[error("block embed at `{path}` has {len} child node(s)")]
    BlockEmbedHasContent { path: Path, len: usize },

    #[error("list at `{path}` contains a {found} node instead of a list-item")]
    NotAListItem { path: Path, found: &'static str },

    #[error("{found} node at `{path}` is not allowed in block content")]
    InlineInBlockContent { path: Path, found: &'static str },

    #[error("{found} node at `{path}` is not allowed in inline content")]
    BlockInInlineContent { path: Path, found: &'static str },

    #[error("list-item at `{path}` is outside a list")]
    OrphanListItem { path: Path },

    #[error("opaque node at `{path}` is not an object with a string `nodeType`")]
    OpaqueNotANode { path: Path },

    #[error("opaque node at `{path}` uses the recognized node type {node_type:?}")]
    OpaqueShadowsKnownKind { path: Path, node_type: String },

    #[error("mark at `{path}` stores the recognized name {name:?} as an unknown mark")]
    OtherMarkShadowsKnown { path: Path, name: String },
}

impl ValidationError {
    /// Returns the location of the offending node.
    pub fn path(&self) -> &Path {
        match self {
            ValidationError::InlineAssetEmbed { path }
            | ValidationError::BlockEmbedHasContent { path, .. }
            | ValidationError::NotAListItem { path, .. }
            | ValidationError::InlineInBlockContent { path, .. }
            | ValidationError::BlockInInlineContent { path, .. }
            | ValidationError::OrphanListItem { path }
            | ValidationError::OpaqueNotANode { path }
            | ValidationError::OpaqueShadowsKnownKind { path, .. }
            | ValidationError::OtherMarkShadowsKnown { path, .. } => path,
        }
    }
}

/// Error during rich-text encoding.
///
/// Trees produced by the decoder or by [`crate::DocumentBuilder`] never
/// trigger this; seeing it means a tree was assembled by hand with a node
/// that has no wire form or would decode to a different node.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EncodeError {
    #[error("[E005] encoding invariant violated: {0}")]
    InvariantViolation(#[from] ValidationError),
}

impl EncodeError {
    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        ErrorCode::InvariantViolation
    }
}

/// Renders a link kind for [`MalformedReason::LinkKindMismatch`].
pub(crate) fn link_kind_name(link_type: Option<LinkType>) -> &'static str {
    match link_type {
        None => "a uri",
        Some(LinkType::Entry) => "an Entry",
        Some(LinkType::Asset) => "an Asset",
    }
}
