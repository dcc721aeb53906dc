//! Limits applied while decoding untrusted rich-text payloads.

/// Default maximum nesting depth of `content` arrays below the document root.
///
/// Real documents rarely exceed a handful of levels (document, list, list-item,
/// paragraph, hyperlink). The limit bounds recursion on hostile input.
pub const MAX_DEPTH: usize = 128;

/// Inclusive range of heading levels (`heading-1` .. `heading-6`).
pub const MIN_HEADING_LEVEL: u8 = 1;
pub const MAX_HEADING_LEVEL: u8 = 6;
