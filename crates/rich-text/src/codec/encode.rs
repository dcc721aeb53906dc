//! Rich-text encoding to the generic JSON wire shape.
//!
//! Objects are emitted in a fixed key order (`nodeType`, then `data` or
//! `value`/`marks`, then `content`), so equal trees always produce equal
//! JSON text.
//!
//! Output is normalized: a recognized node carries only the keys its kind
//! defines. The empty `"data": {}` the API attaches to most nodes is not
//! emitted, and link `data` holds only `uri` or `target`. Opaque nodes are
//! the exception and come out exactly as they went in.

use serde_json::{Map, Value};
use tracing::{trace, warn};

use crate::codec::Path;
use crate::codec::wire::{
    CONTENT, DATA, ID, LINK, LINK_TYPE, MARK_TYPE, MARKS, NODE_TYPE, SYS, SYS_TYPE, TARGET, URI,
    VALUE,
};
use crate::error::{EncodeError, ValidationError};
use crate::model::{Document, EntityLink, LinkTarget, LinkType, Mark, Node, NodeKind, Placement};
use crate::validate::{check_marks, check_opaque, validate_document};

/// Options for encoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Run [`validate_document`] first and refuse structurally invalid trees.
    pub validate: bool,
}

// =============================================================================
// ENTRY POINTS
// =============================================================================

/// Encodes a document to its JSON wire form.
///
/// Members the model does not keep, such as an empty `data` object on a
/// paragraph or extra keys next to a link's `uri`, are dropped on decode and
/// so never reappear here. Unknown node kinds are kept whole.
///
/// Fails only for hand-assembled trees holding a node that has no wire form
/// or would decode to something else: an inline asset embed, a block embed
/// with children, an opaque payload that is not a node of an unrecognized
/// kind, or a [`Mark::Other`] spelling a known mark.
pub fn encode(doc: &Document) -> Result<Value, EncodeError> {
    encode_with_options(doc, &EncodeOptions::default())
}

/// Encodes a document with custom options.
pub fn encode_with_options(doc: &Document, options: &EncodeOptions) -> Result<Value, EncodeError> {
    let result = encode_document(doc, options);
    if let Err(err) = &result {
        warn!(error = %err, "refusing to encode rich-text document");
    }
    result
}

/// Encodes a single node.
pub fn encode_node(node: &Node) -> Result<Value, EncodeError> {
    Encoder::default().node(node)
}

/// Encodes a document to compact JSON text.
pub fn encode_to_string(doc: &Document) -> Result<String, EncodeError> {
    Ok(encode(doc)?.to_string())
}

fn encode_document(doc: &Document, options: &EncodeOptions) -> Result<Value, EncodeError> {
    if options.validate {
        validate_document(doc)?;
    }

    let mut encoder = Encoder::default();
    let mut obj = tagged(NodeKind::Document);
    obj.insert(CONTENT.into(), encoder.children(doc.content())?);
    trace!(blocks = doc.len(), "encoded rich-text document");
    Ok(Value::Object(obj))
}

// =============================================================================
// ENCODER
// =============================================================================

#[derive(Default)]
struct Encoder {
    path: Path,
}

impl Encoder {
    fn children(&mut self, nodes: &[Node]) -> Result<Value, EncodeError> {
        self.path.push_key(CONTENT);
        let mut items = Vec::with_capacity(nodes.len());
        for (index, node) in nodes.iter().enumerate() {
            self.path.push_index(index);
            items.push(self.node(node)?);
            self.path.pop();
        }
        self.path.pop();
        Ok(Value::Array(items))
    }

    fn node(&mut self, node: &Node) -> Result<Value, EncodeError> {
        let json = match node {
            Node::Text(text) => {
                check_marks(&text.marks, &self.path)?;
                let mut obj = tagged(NodeKind::Text);
                obj.insert(VALUE.into(), Value::String(text.value.clone()));
                obj.insert(MARKS.into(), encode_marks(&text.marks));
                Value::Object(obj)
            }
            Node::Paragraph { content } => self.container(NodeKind::Paragraph, None, content)?,
            Node::Heading { level, content } => self.container(level.kind(), None, content)?,
            Node::Blockquote { content } => self.container(NodeKind::Blockquote, None, content)?,
            Node::HorizontalRule => Value::Object(tagged(NodeKind::Hr)),
            Node::UnorderedList { content } => {
                self.container(NodeKind::UnorderedList, None, content)?
            }
            Node::OrderedList { content } => self.container(NodeKind::OrderedList, None, content)?,
            Node::ListItem { content } => self.container(NodeKind::ListItem, None, content)?,
            Node::HyperLink(link) => {
                let (kind, data) = match &link.target {
                    LinkTarget::Uri(uri) => {
                        let mut data = Map::new();
                        data.insert(URI.into(), Value::String(uri.clone()));
                        (NodeKind::Hyperlink, data)
                    }
                    LinkTarget::Entity(entity) => {
                        let kind = match entity.link_type {
                            LinkType::Entry => NodeKind::EntryHyperlink,
                            LinkType::Asset => NodeKind::AssetHyperlink,
                        };
                        (kind, target_data(entity))
                    }
                };
                self.container(kind, Some(data), &link.content)?
            }
            Node::EmbeddedLink(embed) => {
                let kind = match (embed.placement, embed.target.link_type) {
                    (Placement::Block, LinkType::Entry) => NodeKind::EmbeddedEntryBlock,
                    (Placement::Block, LinkType::Asset) => NodeKind::EmbeddedAssetBlock,
                    (Placement::Inline, LinkType::Entry) => NodeKind::EmbeddedEntryInline,
                    (Placement::Inline, LinkType::Asset) => {
                        return Err(ValidationError::InlineAssetEmbed {
                            path: self.path.clone(),
                        }
                        .into());
                    }
                };
                if embed.placement == Placement::Block && !embed.content.is_empty() {
                    return Err(ValidationError::BlockEmbedHasContent {
                        path: self.path.clone(),
                        len: embed.content.len(),
                    }
                    .into());
                }
                self.container(kind, Some(target_data(&embed.target)), &embed.content)?
            }
            Node::Opaque(raw) => {
                check_opaque(raw, &self.path)?;
                raw.clone()
            }
        };
        Ok(json)
    }

    fn container(
        &mut self,
        kind: NodeKind,
        data: Option<Map<String, Value>>,
        content: &[Node],
    ) -> Result<Value, EncodeError> {
        let mut obj = tagged(kind);
        if let Some(data) = data {
            obj.insert(DATA.into(), Value::Object(data));
        }
        obj.insert(CONTENT.into(), self.children(content)?);
        Ok(Value::Object(obj))
    }
}

fn tagged(kind: NodeKind) -> Map<String, Value> {
    let mut obj = Map::new();
    obj.insert(NODE_TYPE.into(), Value::String(kind.as_str().into()));
    obj
}

fn encode_marks(marks: &[Mark]) -> Value {
    marks
        .iter()
        .map(|mark| {
            let mut obj = Map::new();
            obj.insert(MARK_TYPE.into(), Value::String(mark.as_wire().into()));
            Value::Object(obj)
        })
        .collect()
}

fn target_data(entity: &EntityLink) -> Map<String, Value> {
    let mut sys = Map::new();
    sys.insert(ID.into(), Value::String(entity.id.clone()));
    sys.insert(LINK_TYPE.into(), Value::String(entity.link_type.as_wire().into()));
    sys.insert(SYS_TYPE.into(), Value::String(LINK.into()));

    let mut target = Map::new();
    target.insert(SYS.into(), Value::Object(sys));

    let mut data = Map::new();
    data.insert(TARGET.into(), Value::Object(target));
    data
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::codec::decode;
    use crate::model::{DocumentBuilder, EmbeddedLink, HeadingLevel, Text};

    #[test]
    fn test_canonical_text() {
        let doc = DocumentBuilder::new()
            .paragraph(|p| p.styled("Hi", &[Mark::Italic, Mark::Bold]))
            .hr()
            .build();

        assert_eq!(
            encode_to_string(&doc).unwrap(),
            concat!(
                r#"{"nodeType":"document","content":["#,
                r#"{"nodeType":"paragraph","content":["#,
                r#"{"nodeType":"text","value":"Hi","marks":[{"type":"italic"},{"type":"bold"}]}"#,
                r#"]},"#,
                r#"{"nodeType":"hr"}"#,
                r#"]}"#
            )
        );
    }

    #[test]
    fn test_canonical_links() {
        let doc = DocumentBuilder::new()
            .paragraph(|p| {
                p.hyperlink("https://www.example.com/", |l| l)
                    .entry_hyperlink("e1", |l| l)
            })
            .embedded_asset("a1")
            .build();

        assert_eq!(
            encode_to_string(&doc).unwrap(),
            concat!(
                r#"{"nodeType":"document","content":["#,
                r#"{"nodeType":"paragraph","content":["#,
                r#"{"nodeType":"hyperlink","data":{"uri":"https://www.example.com/"},"content":[]},"#,
                r#"{"nodeType":"entry-hyperlink","data":{"target":{"sys":{"id":"e1","linkType":"Entry","type":"Link"}}},"content":[]}"#,
                r#"]},"#,
                r#"{"nodeType":"embedded-asset-block","data":{"target":{"sys":{"id":"a1","linkType":"Asset","type":"Link"}}},"content":[]}"#,
                r#"]}"#
            )
        );
    }

    #[test]
    fn test_heading_levels() {
        let doc = HeadingLevel::ALL
            .into_iter()
            .fold(DocumentBuilder::new(), |doc, level| doc.heading(level, |h| h))
            .build();
        let json = encode(&doc).unwrap();
        let kinds: Vec<&str> = json["content"]
            .as_array()
            .unwrap()
            .iter()
            .map(|node| node["nodeType"].as_str().unwrap())
            .collect();
        assert_eq!(
            kinds,
            ["heading-1", "heading-2", "heading-3", "heading-4", "heading-5", "heading-6"]
        );
        assert_eq!(HeadingLevel::new(7), None);
    }

    #[test]
    fn test_opaque_must_be_unknown_node() {
        let doc = DocumentBuilder::new()
            .paragraph(|p| p.text("intro"))
            .add_content(Node::Opaque(json!(null)))
            .build();
        match encode(&doc) {
            Err(EncodeError::InvariantViolation(ValidationError::OpaqueNotANode { path })) => {
                assert_eq!(path.to_string(), "/content/1");
            }
            other => panic!("Expected OpaqueNotANode, got {other:?}"),
        }

        for raw in [json!({"content": []}), json!({"nodeType": 3})] {
            assert!(matches!(
                encode_node(&Node::Opaque(raw)),
                Err(EncodeError::InvariantViolation(ValidationError::OpaqueNotANode { .. }))
            ));
        }

        let shadow = Node::Opaque(json!({"nodeType": "hr"}));
        assert!(matches!(
            encode_node(&shadow),
            Err(EncodeError::InvariantViolation(
                ValidationError::OpaqueShadowsKnownKind { .. }
            ))
        ));
    }

    #[test]
    fn test_other_mark_with_known_name_rejected() {
        let doc = DocumentBuilder::new()
            .paragraph(|p| {
                p.add_content(Text::new("x").with_mark(Mark::Other("bold".into())))
            })
            .build();
        match encode(&doc) {
            Err(EncodeError::InvariantViolation(ValidationError::OtherMarkShadowsKnown {
                path,
                name,
            })) => {
                assert_eq!(path.to_string(), "/content/0/content/0/marks/0");
                assert_eq!(name, "bold");
            }
            other => panic!("Expected OtherMarkShadowsKnown, got {other:?}"),
        }

        // Genuinely unknown names survive the round trip
        let doc = DocumentBuilder::new()
            .paragraph(|p| {
                p.add_content(Text::new("x").with_mark(Mark::Other("highlight".into())))
            })
            .build();
        assert_eq!(decode(&encode(&doc).unwrap()).unwrap(), doc);
    }

    #[test]
    fn test_inline_asset_embed_rejected() {
        let node = Node::Paragraph {
            content: vec![Node::EmbeddedLink(EmbeddedLink {
                placement: Placement::Inline,
                target: EntityLink::asset("a1"),
                content: vec![],
            })],
        };
        let err = encode_node(&node).unwrap_err();
        assert!(matches!(
            err,
            EncodeError::InvariantViolation(ValidationError::InlineAssetEmbed { .. })
        ));
        assert_eq!(err.code().code(), "E005");
    }

    #[test]
    fn test_block_embed_with_content_rejected() {
        let node = Node::EmbeddedLink(EmbeddedLink {
            placement: Placement::Block,
            target: EntityLink::entry("e1"),
            content: vec![Text::new("caption").into()],
        });
        assert!(matches!(
            encode_node(&node),
            Err(EncodeError::InvariantViolation(
                ValidationError::BlockEmbedHasContent { len: 1, .. }
            ))
        ));
    }

    #[test]
    fn test_opaque_verbatim() {
        let raw = json!({
            "nodeType": "table",
            "data": {"zeta": 1, "alpha": [true, null]},
            "content": [{"nodeType": "table-row", "content": []}]
        });
        let encoded = encode_node(&Node::Opaque(raw.clone())).unwrap();
        assert_eq!(encoded.to_string(), raw.to_string());
    }

    #[test]
    fn test_validate_option() {
        let doc = DocumentBuilder::new()
            .unordered_list(|l| l.add_content(Node::Paragraph { content: vec![] }))
            .build();

        assert!(encode(&doc).is_ok());

        let options = EncodeOptions { validate: true };
        assert!(matches!(
            encode_with_options(&doc, &options),
            Err(EncodeError::InvariantViolation(ValidationError::NotAListItem { .. }))
        ));
    }
}
