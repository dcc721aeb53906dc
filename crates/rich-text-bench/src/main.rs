//! Benchmark for rich-text decoding and encoding.
//!
//! Builds a long synthetic article with the builder API (or loads a
//! document from disk) and times each codec stage.

use std::fs;
use std::time::Instant;

use rich_text::{
    Document, DocumentBuilder, HeadingLevel, Mark, Node, decode, decode_str, encode,
    encode_to_string,
};

const LOREM: [&str; 8] = [
    "Rich text fields ",
    "hold structured content ",
    "with inline styles, ",
    "links to entries and assets, ",
    "and nested lists ",
    "that editors rearrange freely. ",
    "The codec keeps every node ",
    "in its original order.",
];

/// Builds one section: heading, styled paragraphs, a list, a quote and embeds.
fn build_section(builder: DocumentBuilder, index: usize) -> DocumentBuilder {
    let level = HeadingLevel::ALL[index % HeadingLevel::ALL.len()];
    builder
        .heading(level, |h| h.text(format!("Section {index}")))
        .paragraph(|p| {
            let mut p = p;
            for (i, words) in LOREM.iter().enumerate() {
                p = match i % 4 {
                    0 => p.text(*words),
                    1 => p.styled(*words, &[Mark::Bold]),
                    2 => p.styled(*words, &[Mark::Italic, Mark::Underline]),
                    _ => p.entry_hyperlink(format!("entry{index}x{i}"), |l| l.text(*words)),
                };
            }
            p
        })
        .paragraph(|p| {
            p.text("See ")
                .hyperlink(format!("https://www.example.com/{index}"), |l| l.text("the docs"))
                .text(" or ")
                .embedded_entry_inline(format!("inline{index}"))
        })
        .unordered_list(|l| {
            (0..5).fold(l, |l, i| {
                l.item(|item| item.paragraph(|p| p.styled(LOREM[i], &[Mark::Code])))
            })
        })
        .blockquote(|q| q.paragraph(|p| p.text(LOREM[index % LOREM.len()])))
        .embedded_asset(format!("asset{index}"))
        .hr()
}

fn build_article(sections: usize) -> Document {
    (0..sections)
        .fold(DocumentBuilder::new(), build_section)
        .build()
}

fn mb_per_sec(bytes: usize, secs: f64) -> f64 {
    (bytes as f64 / 1_000_000.0) / secs
}

fn main() {
    let arg = std::env::args().nth(1);

    let doc = match &arg {
        Some(path) if path.ends_with(".json") => {
            println!("Loading document from: {}", path);
            let text = fs::read_to_string(path).expect("Failed to read document");
            decode_str(&text).expect("Failed to decode document")
        }
        other => {
            let sections = other
                .as_deref()
                .and_then(|s| s.parse().ok())
                .unwrap_or(2_000usize);
            println!("Building synthetic article with {} sections", sections);
            let build_start = Instant::now();
            let doc = build_article(sections);
            println!("Built in {:?}", build_start.elapsed());
            doc
        }
    };

    let node_count = doc.nodes().count();
    let text_count = doc.nodes().filter(|n| matches!(n, Node::Text(_))).count();
    println!(
        "  - {} top-level blocks, {} nodes, {} text leaves, {} entity links",
        doc.len(),
        node_count,
        text_count,
        doc.entity_links().len()
    );

    // Tree -> JSON value
    let encode_start = Instant::now();
    let json = encode(&doc).expect("Failed to encode");
    let encode_time = encode_start.elapsed();

    // JSON value -> text
    let text = json.to_string();
    println!("\nEncode (tree -> value): {:?}", encode_time);
    println!("  Canonical size: {} bytes", text.len());
    println!(
        "  Throughput: {:.2} MB/s",
        mb_per_sec(text.len(), encode_time.as_secs_f64())
    );

    // JSON value -> tree
    let decode_start = Instant::now();
    let decoded = decode(&json).expect("Failed to decode");
    let decode_time = decode_start.elapsed();

    println!("\nDecode (value -> tree): {:?}", decode_time);
    println!(
        "  Throughput: {:.2} MB/s",
        mb_per_sec(text.len(), decode_time.as_secs_f64())
    );

    // Text -> tree, including JSON parsing
    let parse_start = Instant::now();
    let parsed = decode_str(&text).expect("Failed to decode text");
    let parse_time = parse_start.elapsed();

    println!("\nDecode (text -> tree): {:?}", parse_time);
    println!(
        "  Throughput: {:.2} MB/s",
        mb_per_sec(text.len(), parse_time.as_secs_f64())
    );

    // Verify round trip and deterministic output
    assert_eq!(decoded, doc, "Round trip should preserve the tree");
    assert_eq!(parsed, doc, "Text round trip should preserve the tree");
    let again = encode_to_string(&decoded).expect("Failed to re-encode");
    assert_eq!(again, text, "Re-encoding should be byte-identical");

    let pretty = serde_json::to_string_pretty(&json).expect("Failed to pretty-print");

    println!("\n=== Summary ===");
    println!("Nodes: {}", node_count);
    println!("Compact JSON: {} bytes", text.len());
    println!("Pretty JSON:  {} bytes", pretty.len());
    println!(
        "Encode + decode: {:?} ({:.0} nodes/ms)",
        encode_time + decode_time,
        node_count as f64 / (encode_time + decode_time).as_secs_f64() / 1000.0
    );
}
