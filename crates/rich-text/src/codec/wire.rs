//! Wire field names and the `nodeType` dispatch table.

use lazy_static::lazy_static;
use rustc_hash::FxHashMap;

use crate::model::NodeKind;

pub const NODE_TYPE: &str = "nodeType";
pub const CONTENT: &str = "content";
pub const DATA: &str = "data";
pub const VALUE: &str = "value";
pub const MARKS: &str = "marks";
pub const MARK_TYPE: &str = "type";
pub const URI: &str = "uri";
pub const TARGET: &str = "target";
pub const SYS: &str = "sys";
pub const ID: &str = "id";
pub const LINK_TYPE: &str = "linkType";
pub const SYS_TYPE: &str = "type";
pub const LINK: &str = "Link";

lazy_static! {
    static ref NODE_KINDS: FxHashMap<&'static str, NodeKind> =
        NodeKind::ALL.iter().map(|kind| (kind.as_str(), *kind)).collect();
}

/// Resolves a `nodeType` discriminator.
pub fn lookup(node_type: &str) -> Option<NodeKind> {
    NODE_KINDS.get(node_type).copied()
}
