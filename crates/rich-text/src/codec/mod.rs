//! JSON encoding/decoding for rich text.
//!
//! This module implements the wire contract between a [`Document`](crate::Document)
//! and the generic JSON value carried in an entry field.

pub mod decode;
pub mod encode;
pub mod path;
mod serde_impl;
pub(crate) mod wire;

pub use decode::{
    DecodeOptions, UnknownNodePolicy, decode, decode_node, decode_node_with_options, decode_str,
    decode_with_options,
};
pub use encode::{EncodeOptions, encode, encode_node, encode_to_string, encode_with_options};
pub use path::{Path, Segment};
