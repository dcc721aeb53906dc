//! Rich-text decoding from the generic JSON wire shape.
//!
//! Decoding is bottom-up: every element of a node's `content` is decoded,
//! in order, before the node itself is constructed. A malformed subtree
//! aborts the whole decode, so a caller never sees a truncated tree.

use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::codec::Path;
use crate::codec::wire::{
    self, CONTENT, DATA, ID, LINK_TYPE, MARK_TYPE, MARKS, NODE_TYPE, SYS, TARGET, URI, VALUE,
};
use crate::error::{DecodeError, MalformedReason, link_kind_name};
use crate::limits::MAX_DEPTH;
use crate::model::{
    Document, EmbeddedLink, EntityLink, HeadingLevel, HyperLink, LinkTarget, LinkType, Mark, Node,
    NodeKind, Placement, Text,
};

type Object = Map<String, Value>;

/// What to do with a node whose `nodeType` is not recognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownNodePolicy {
    /// Keep the subtree verbatim as [`Node::Opaque`].
    #[default]
    Preserve,
    /// Fail with [`MalformedReason::UnknownNodeType`].
    Reject,
}

/// Options for decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Maximum number of nested `content` arrays below the root.
    pub max_depth: usize,
    pub unknown_nodes: UnknownNodePolicy,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_depth: MAX_DEPTH,
            unknown_nodes: UnknownNodePolicy::Preserve,
        }
    }
}

impl DecodeOptions {
    /// Options that reject unrecognized node kinds.
    pub fn strict() -> Self {
        Self {
            unknown_nodes: UnknownNodePolicy::Reject,
            ..Self::default()
        }
    }
}

// =============================================================================
// ENTRY POINTS
// =============================================================================

/// Decodes a rich-text field value. The root must be a `document` node.
pub fn decode(json: &Value) -> Result<Document, DecodeError> {
    decode_with_options(json, &DecodeOptions::default())
}

/// Decodes a rich-text field value with custom options.
pub fn decode_with_options(json: &Value, options: &DecodeOptions) -> Result<Document, DecodeError> {
    let mut decoder = Decoder::new(options);
    let document = decoder.document(json)?;
    trace!(blocks = document.len(), "decoded rich-text document");
    Ok(document)
}

/// Decodes a single node (any kind except `document`).
pub fn decode_node(json: &Value) -> Result<Node, DecodeError> {
    decode_node_with_options(json, &DecodeOptions::default())
}

/// Decodes a single node with custom options.
pub fn decode_node_with_options(json: &Value, options: &DecodeOptions) -> Result<Node, DecodeError> {
    Decoder::new(options).node(json)
}

/// Parses JSON text and decodes it as a rich-text field value.
pub fn decode_str(text: &str) -> Result<Document, DecodeError> {
    let json: Value = serde_json::from_str(text).map_err(|e| DecodeError::Json(e.to_string()))?;
    decode(&json)
}

// =============================================================================
// DECODER
// =============================================================================

struct Decoder<'o> {
    options: &'o DecodeOptions,
    path: Path,
    depth: usize,
}

impl<'o> Decoder<'o> {
    fn new(options: &'o DecodeOptions) -> Self {
        Self {
            options,
            path: Path::root(),
            depth: 0,
        }
    }

    fn malformed(&self, reason: MalformedReason) -> DecodeError {
        DecodeError::MalformedDocument {
            path: self.path.clone(),
            reason,
        }
    }

    fn malformed_at(&self, key: &'static str, reason: MalformedReason) -> DecodeError {
        DecodeError::MalformedDocument {
            path: self.path.with_key(key),
            reason,
        }
    }

    /// Runs `f` with `key` appended to the current path.
    fn at<T>(
        &mut self,
        key: &'static str,
        f: impl FnOnce(&mut Self) -> Result<T, DecodeError>,
    ) -> Result<T, DecodeError> {
        self.path.push_key(key);
        let result = f(self);
        self.path.pop();
        result
    }

    fn object<'v>(&self, json: &'v Value) -> Result<&'v Object, DecodeError> {
        json.as_object().ok_or_else(|| {
            self.malformed(MalformedReason::WrongType {
                expected: "object",
                found: json_type(json),
            })
        })
    }

    fn array<'v>(&self, json: &'v Value) -> Result<&'v [Value], DecodeError> {
        json.as_array().map(Vec::as_slice).ok_or_else(|| {
            self.malformed(MalformedReason::WrongType {
                expected: "array",
                found: json_type(json),
            })
        })
    }

    fn str_field<'v>(&self, obj: &'v Object, key: &'static str) -> Result<&'v str, DecodeError> {
        match obj.get(key) {
            None => Err(self.malformed(MalformedReason::MissingField { field: key })),
            Some(Value::String(s)) => Ok(s),
            Some(other) => Err(self.malformed_at(
                key,
                MalformedReason::WrongType {
                    expected: "string",
                    found: json_type(other),
                },
            )),
        }
    }

    fn document(&mut self, json: &Value) -> Result<Document, DecodeError> {
        let obj = self.object(json)?;
        let node_type = self.str_field(obj, NODE_TYPE)?;
        if node_type != NodeKind::Document.as_str() {
            return Err(self.malformed(MalformedReason::NotADocument {
                node_type: node_type.to_string(),
            }));
        }
        let content = self.children(obj)?;
        Ok(Document::from_content(content))
    }

    fn node(&mut self, json: &Value) -> Result<Node, DecodeError> {
        let obj = self.object(json)?;
        let node_type = self.str_field(obj, NODE_TYPE)?;
        let Some(kind) = wire::lookup(node_type) else {
            return self.unknown(node_type, json);
        };

        let node = match kind {
            NodeKind::Document => return Err(self.malformed(MalformedReason::NestedDocument)),
            NodeKind::Text => Node::Text(self.text(obj)?),
            NodeKind::Paragraph => Node::Paragraph {
                content: self.children(obj)?,
            },
            NodeKind::Heading1 => self.heading(obj, HeadingLevel::H1)?,
            NodeKind::Heading2 => self.heading(obj, HeadingLevel::H2)?,
            NodeKind::Heading3 => self.heading(obj, HeadingLevel::H3)?,
            NodeKind::Heading4 => self.heading(obj, HeadingLevel::H4)?,
            NodeKind::Heading5 => self.heading(obj, HeadingLevel::H5)?,
            NodeKind::Heading6 => self.heading(obj, HeadingLevel::H6)?,
            NodeKind::Blockquote => Node::Blockquote {
                content: self.children(obj)?,
            },
            NodeKind::Hr => {
                self.leaf(obj, kind)?;
                Node::HorizontalRule
            }
            NodeKind::UnorderedList => Node::UnorderedList {
                content: self.children(obj)?,
            },
            NodeKind::OrderedList => Node::OrderedList {
                content: self.children(obj)?,
            },
            NodeKind::ListItem => Node::ListItem {
                content: self.children(obj)?,
            },
            NodeKind::Hyperlink | NodeKind::EntryHyperlink | NodeKind::AssetHyperlink => {
                Node::HyperLink(self.hyperlink(obj, kind)?)
            }
            NodeKind::EmbeddedEntryBlock | NodeKind::EmbeddedAssetBlock => {
                Node::EmbeddedLink(self.embedded(obj, kind, Placement::Block)?)
            }
            NodeKind::EmbeddedEntryInline => {
                Node::EmbeddedLink(self.embedded(obj, kind, Placement::Inline)?)
            }
        };
        Ok(node)
    }

    fn unknown(&self, node_type: &str, json: &Value) -> Result<Node, DecodeError> {
        match self.options.unknown_nodes {
            UnknownNodePolicy::Preserve => {
                debug!(node_type, path = %self.path, "preserving unrecognized node as opaque");
                Ok(Node::Opaque(json.clone()))
            }
            UnknownNodePolicy::Reject => Err(self.malformed(MalformedReason::UnknownNodeType {
                node_type: node_type.to_string(),
            })),
        }
    }

    // =========================================================================
    // Content
    // =========================================================================

    fn children(&mut self, obj: &Object) -> Result<Vec<Node>, DecodeError> {
        match obj.get(CONTENT) {
            None => Err(self.malformed(MalformedReason::MissingField { field: CONTENT })),
            Some(content) => self.at(CONTENT, |d| d.node_list(content)),
        }
    }

    fn optional_children(&mut self, obj: &Object) -> Result<Vec<Node>, DecodeError> {
        match obj.get(CONTENT) {
            None => Ok(Vec::new()),
            Some(content) => self.at(CONTENT, |d| d.node_list(content)),
        }
    }

    fn node_list(&mut self, json: &Value) -> Result<Vec<Node>, DecodeError> {
        let items = self.array(json)?;
        if self.depth >= self.options.max_depth {
            return Err(self.malformed(MalformedReason::TooDeep {
                max: self.options.max_depth,
            }));
        }

        self.depth += 1;
        let mut nodes = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            self.path.push_index(index);
            nodes.push(self.node(item)?);
            self.path.pop();
        }
        self.depth -= 1;
        Ok(nodes)
    }

    /// Accepts a missing or empty `content`; anything else is an error.
    fn leaf(&self, obj: &Object, kind: NodeKind) -> Result<(), DecodeError> {
        match obj.get(CONTENT) {
            None => Ok(()),
            Some(Value::Array(items)) if items.is_empty() => Ok(()),
            Some(Value::Array(_)) => Err(self.malformed_at(
                CONTENT,
                MalformedReason::UnexpectedContent {
                    node_type: kind.as_str(),
                },
            )),
            Some(other) => Err(self.malformed_at(
                CONTENT,
                MalformedReason::WrongType {
                    expected: "array",
                    found: json_type(other),
                },
            )),
        }
    }

    fn heading(&mut self, obj: &Object, level: HeadingLevel) -> Result<Node, DecodeError> {
        Ok(Node::Heading {
            level,
            content: self.children(obj)?,
        })
    }

    // =========================================================================
    // Text
    // =========================================================================

    fn text(&mut self, obj: &Object) -> Result<Text, DecodeError> {
        self.leaf(obj, NodeKind::Text)?;
        let value = self.str_field(obj, VALUE)?.to_string();
        let marks = match obj.get(MARKS) {
            None => Vec::new(),
            Some(marks) => self.at(MARKS, |d| d.marks(marks))?,
        };
        Ok(Text { value, marks })
    }

    fn marks(&mut self, json: &Value) -> Result<Vec<Mark>, DecodeError> {
        let items = self.array(json)?;
        let mut marks = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            self.path.push_index(index);
            let obj = self.object(item)?;
            let name = self.str_field(obj, MARK_TYPE)?;
            let mark = Mark::from_wire(name);
            if !mark.is_known() {
                debug!(mark = name, path = %self.path, "preserving unrecognized mark");
            }
            marks.push(mark);
            self.path.pop();
        }
        Ok(marks)
    }

    // =========================================================================
    // Links
    // =========================================================================

    fn hyperlink(&mut self, obj: &Object, kind: NodeKind) -> Result<HyperLink, DecodeError> {
        let content = self.children(obj)?;
        let target = self.link_target(obj)?;
        self.check_link_kind(kind, target.as_entity().map(|link| link.link_type))?;
        Ok(HyperLink { target, content })
    }

    fn embedded(
        &mut self,
        obj: &Object,
        kind: NodeKind,
        placement: Placement,
    ) -> Result<EmbeddedLink, DecodeError> {
        let content = match placement {
            Placement::Block => {
                self.leaf(obj, kind)?;
                Vec::new()
            }
            Placement::Inline => self.optional_children(obj)?,
        };
        let target = match self.link_target(obj)? {
            LinkTarget::Entity(link) => link,
            LinkTarget::Uri(_) => return Err(self.link_mismatch(kind, None)),
        };
        self.check_link_kind(kind, Some(target.link_type))?;
        Ok(EmbeddedLink {
            placement,
            target,
            content,
        })
    }

    fn link_target(&mut self, obj: &Object) -> Result<LinkTarget, DecodeError> {
        match obj.get(DATA) {
            None => Err(self.malformed(MalformedReason::MissingField { field: DATA })),
            Some(data) => self.at(DATA, |d| d.link_data(data)),
        }
    }

    /// A `uri` string wins; otherwise `target` must be a link object.
    fn link_data(&mut self, json: &Value) -> Result<LinkTarget, DecodeError> {
        let data = self.object(json)?;
        if let Some(Value::String(uri)) = data.get(URI) {
            return Ok(LinkTarget::Uri(uri.clone()));
        }
        match data.get(TARGET) {
            Some(target) => self
                .at(TARGET, |d| d.entity_link(target))
                .map(LinkTarget::Entity),
            None => Err(self.malformed(MalformedReason::InvalidLinkData)),
        }
    }

    fn entity_link(&mut self, json: &Value) -> Result<EntityLink, DecodeError> {
        let Some(sys) = json.get(SYS).and_then(Value::as_object) else {
            return Err(self.malformed(MalformedReason::InvalidLinkData));
        };
        self.at(SYS, |d| {
            let id = d.str_field(sys, ID)?.to_string();
            let link_type = d.str_field(sys, LINK_TYPE)?;
            let link_type = LinkType::from_wire(link_type).ok_or_else(|| {
                d.malformed_at(
                    LINK_TYPE,
                    MalformedReason::UnknownLinkType {
                        link_type: link_type.to_string(),
                    },
                )
            })?;
            Ok(EntityLink { id, link_type })
        })
    }

    fn check_link_kind(&self, kind: NodeKind, found: Option<LinkType>) -> Result<(), DecodeError> {
        match kind.bound_link_type() {
            Some(expected) if found != Some(expected) => Err(self.link_mismatch(kind, found)),
            _ => Ok(()),
        }
    }

    fn link_mismatch(&self, kind: NodeKind, found: Option<LinkType>) -> DecodeError {
        self.malformed_at(
            DATA,
            MalformedReason::LinkKindMismatch {
                node_type: kind.as_str(),
                found: link_kind_name(found),
            },
        )
    }
}

fn json_type(json: &Value) -> &'static str {
    match json {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn malformed(result: Result<impl std::fmt::Debug, DecodeError>) -> (String, MalformedReason) {
        match result {
            Err(DecodeError::MalformedDocument { path, reason }) => (path.to_string(), reason),
            other => panic!("Expected MalformedDocument, got {other:?}"),
        }
    }

    fn text(value: &str) -> Value {
        json!({"nodeType": "text", "value": value, "marks": []})
    }

    #[test]
    fn test_empty_document() {
        let doc = decode(&json!({"nodeType": "document", "content": []})).unwrap();
        assert!(doc.is_empty());
    }

    #[test]
    fn test_root_must_be_document() {
        let (path, reason) = malformed(decode(&json!({"nodeType": "paragraph", "content": []})));
        assert_eq!(path, "");
        assert_eq!(
            reason,
            MalformedReason::NotADocument {
                node_type: "paragraph".into()
            }
        );
    }

    #[test]
    fn test_nested_document_rejected() {
        let json = json!({
            "nodeType": "document",
            "content": [{"nodeType": "document", "content": []}]
        });
        let (path, reason) = malformed(decode(&json));
        assert_eq!(path, "/content/0");
        assert_eq!(reason, MalformedReason::NestedDocument);
    }

    #[test]
    fn test_missing_discriminator() {
        let (path, reason) = malformed(decode_node(&json!({"content": []})));
        assert_eq!(path, "");
        assert_eq!(reason, MalformedReason::MissingField { field: "nodeType" });

        let (path, reason) = malformed(decode_node(&json!({"nodeType": 7})));
        assert_eq!(path, "/nodeType");
        assert_eq!(
            reason,
            MalformedReason::WrongType {
                expected: "string",
                found: "number"
            }
        );
    }

    #[test]
    fn test_node_must_be_object() {
        let (_, reason) = malformed(decode_node(&json!("paragraph")));
        assert_eq!(
            reason,
            MalformedReason::WrongType {
                expected: "object",
                found: "string"
            }
        );
    }

    #[test]
    fn test_text_value_required() {
        let json = json!({
            "nodeType": "document",
            "content": [{
                "nodeType": "paragraph",
                "content": [text("ok"), {"nodeType": "text", "marks": []}]
            }]
        });
        let (path, reason) = malformed(decode(&json));
        assert_eq!(path, "/content/0/content/1");
        assert_eq!(reason, MalformedReason::MissingField { field: "value" });
    }

    #[test]
    fn test_text_without_marks_key() {
        let node = decode_node(&json!({"nodeType": "text", "value": "plain"})).unwrap();
        assert_eq!(node, Node::Text(Text::new("plain")));
    }

    #[test]
    fn test_mark_shape() {
        let (path, reason) = malformed(decode_node(&json!({
            "nodeType": "text",
            "value": "x",
            "marks": [{"type": "bold"}, "italic"]
        })));
        assert_eq!(path, "/marks/1");
        assert!(matches!(reason, MalformedReason::WrongType { expected: "object", .. }));

        let (path, reason) = malformed(decode_node(&json!({
            "nodeType": "text",
            "value": "x",
            "marks": [{}]
        })));
        assert_eq!(path, "/marks/0");
        assert_eq!(reason, MalformedReason::MissingField { field: "type" });
    }

    #[test]
    fn test_unknown_mark_preserved() {
        let node = decode_node(&json!({
            "nodeType": "text",
            "value": "x",
            "marks": [{"type": "strikethrough"}, {"type": "bold"}, {"type": "bold"}]
        }))
        .unwrap();
        let text = node.as_text().unwrap();
        assert_eq!(
            text.marks,
            vec![Mark::Other("strikethrough".into()), Mark::Bold, Mark::Bold]
        );
    }

    #[test]
    fn test_container_requires_content() {
        let (path, reason) = malformed(decode_node(&json!({"nodeType": "blockquote"})));
        assert_eq!(path, "");
        assert_eq!(reason, MalformedReason::MissingField { field: "content" });

        let (path, reason) = malformed(decode_node(&json!({"nodeType": "list-item", "content": {}})));
        assert_eq!(path, "/content");
        assert!(matches!(reason, MalformedReason::WrongType { expected: "array", .. }));
    }

    #[test]
    fn test_hr_with_children_rejected() {
        let (path, reason) = malformed(decode_node(&json!({
            "nodeType": "hr",
            "content": [text("no")]
        })));
        assert_eq!(path, "/content");
        assert_eq!(reason, MalformedReason::UnexpectedContent { node_type: "hr" });

        assert_eq!(
            decode_node(&json!({"nodeType": "hr", "content": []})).unwrap(),
            Node::HorizontalRule
        );
    }

    #[test]
    fn test_hyperlink_without_link_data() {
        let (path, reason) = malformed(decode_node(&json!({
            "nodeType": "hyperlink",
            "data": {"href": "https://www.example.com/"},
            "content": [text("link")]
        })));
        assert_eq!(path, "/data");
        assert_eq!(reason, MalformedReason::InvalidLinkData);

        let (path, reason) = malformed(decode_node(&json!({
            "nodeType": "hyperlink",
            "content": [text("link")]
        })));
        assert_eq!(path, "");
        assert_eq!(reason, MalformedReason::MissingField { field: "data" });
    }

    #[test]
    fn test_target_without_sys() {
        let (path, reason) = malformed(decode_node(&json!({
            "nodeType": "entry-hyperlink",
            "data": {"target": {"id": "abc"}},
            "content": []
        })));
        assert_eq!(path, "/data/target");
        assert_eq!(reason, MalformedReason::InvalidLinkData);
    }

    #[test]
    fn test_unknown_link_type() {
        let (path, reason) = malformed(decode_node(&json!({
            "nodeType": "entry-hyperlink",
            "data": {"target": {"sys": {"id": "abc", "linkType": "Space", "type": "Link"}}},
            "content": []
        })));
        assert_eq!(path, "/data/target/sys/linkType");
        assert_eq!(
            reason,
            MalformedReason::UnknownLinkType {
                link_type: "Space".into()
            }
        );
    }

    #[test]
    fn test_link_type_must_match_discriminator() {
        let (path, reason) = malformed(decode_node(&json!({
            "nodeType": "asset-hyperlink",
            "data": {"target": {"sys": {"id": "abc", "linkType": "Entry", "type": "Link"}}},
            "content": []
        })));
        assert_eq!(path, "/data");
        assert_eq!(
            reason,
            MalformedReason::LinkKindMismatch {
                node_type: "asset-hyperlink",
                found: "an Entry"
            }
        );

        let (_, reason) = malformed(decode_node(&json!({
            "nodeType": "embedded-entry-block",
            "data": {"uri": "https://www.example.com/"},
            "content": []
        })));
        assert_eq!(
            reason,
            MalformedReason::LinkKindMismatch {
                node_type: "embedded-entry-block",
                found: "a uri"
            }
        );
    }

    #[test]
    fn test_block_embed_with_children_rejected() {
        let (_, reason) = malformed(decode_node(&json!({
            "nodeType": "embedded-asset-block",
            "data": {"target": {"sys": {"id": "a1", "linkType": "Asset", "type": "Link"}}},
            "content": [text("caption")]
        })));
        assert_eq!(
            reason,
            MalformedReason::UnexpectedContent {
                node_type: "embedded-asset-block"
            }
        );
    }

    #[test]
    fn test_inline_embed() {
        let node = decode_node(&json!({
            "nodeType": "embedded-entry-inline",
            "data": {"target": {"sys": {"id": "e1", "linkType": "Entry", "type": "Link"}}},
            "content": []
        }))
        .unwrap();
        assert_eq!(node, Node::EmbeddedLink(EmbeddedLink::inline_entry("e1")));
    }

    #[test]
    fn test_unknown_kind_rejected_when_strict() {
        let json = json!({
            "nodeType": "document",
            "content": [{"nodeType": "table", "content": []}]
        });
        assert!(decode(&json).is_ok());

        let (path, reason) = malformed(decode_with_options(&json, &DecodeOptions::strict()));
        assert_eq!(path, "/content/0");
        assert_eq!(
            reason,
            MalformedReason::UnknownNodeType {
                node_type: "table".into()
            }
        );
    }

    #[test]
    fn test_depth_limit() {
        let json = json!({
            "nodeType": "document",
            "content": [{
                "nodeType": "blockquote",
                "content": [{"nodeType": "paragraph", "content": [text("deep")]}]
            }]
        });
        let options = DecodeOptions {
            max_depth: 3,
            ..DecodeOptions::default()
        };
        assert!(decode_with_options(&json, &options).is_ok());

        let options = DecodeOptions {
            max_depth: 2,
            ..DecodeOptions::default()
        };
        let (path, reason) = malformed(decode_with_options(&json, &options));
        assert_eq!(path, "/content/0/content/0/content");
        assert_eq!(reason, MalformedReason::TooDeep { max: 2 });
    }

    #[test]
    fn test_invalid_json_text() {
        let err = decode_str("{\"nodeType\": ").unwrap_err();
        assert!(matches!(err, DecodeError::Json(_)));
        assert!(err.path().is_none());
    }
}
