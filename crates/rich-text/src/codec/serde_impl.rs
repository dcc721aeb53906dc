//! `serde` support for [`Document`], delegating to the rich-text codec.
//!
//! Lets entry structs hold a rich-text field directly:
//!
//! ```rust
//! use rich_text::Document;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Fields {
//!     title: String,
//!     body: Document,
//! }
//!
//! let fields: Fields = serde_json::from_str(r#"{
//!     "title": "Hello",
//!     "body": {"nodeType": "document", "content": []}
//! }"#).unwrap();
//! assert!(fields.body.is_empty());
//! ```

use serde::de::Error as _;
use serde::ser::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::codec::{decode, encode};
use crate::model::Document;

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        encode(self).map_err(S::Error::custom)?.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let json = Value::deserialize(deserializer)?;
        decode(&json).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::model::{DocumentBuilder, Node};

    use super::*;

    #[test]
    fn test_document_as_field() {
        let entry = json!({
            "title": "Post",
            "body": {
                "nodeType": "document",
                "content": [{
                    "nodeType": "paragraph",
                    "content": [{"nodeType": "text", "value": "Hi", "marks": []}]
                }]
            }
        });
        let body: Document = serde_json::from_value(entry["body"].clone()).unwrap();
        assert_eq!(body.len(), 1);
        assert!(matches!(body.content()[0], Node::Paragraph { .. }));

        assert_eq!(serde_json::to_value(&body).unwrap(), entry["body"]);
    }

    #[test]
    fn test_decode_error_surfaces() {
        let err = serde_json::from_value::<Document>(json!({"nodeType": "paragraph"})).unwrap_err();
        assert!(err.to_string().contains("root node must be a document"));
    }

    #[test]
    fn test_encode_error_surfaces() {
        let doc = DocumentBuilder::new()
            .add_content(Node::Opaque(json!(["not", "a", "node"])))
            .build();
        let err = serde_json::to_string(&doc).unwrap_err();
        assert!(err.to_string().contains("opaque node at `/content/0`"));
    }
}
