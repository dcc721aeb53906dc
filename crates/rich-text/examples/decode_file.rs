//! Simple decoder to inspect rich-text field values stored as JSON.

use std::fs;

use rich_text::{Document, LinkTarget, Node, Placement, decode_str, encode_to_string};

fn describe(node: &Node) -> String {
    match node {
        Node::Text(text) => {
            let preview: String = text.value.chars().take(60).collect();
            let ellipsis = if text.value.chars().count() > 60 { "..." } else { "" };
            if text.marks.is_empty() {
                format!("text \"{preview}{ellipsis}\"")
            } else {
                let marks: Vec<&str> = text.marks.iter().map(|m| m.as_wire()).collect();
                format!("text \"{preview}{ellipsis}\" [{}]", marks.join(", "))
            }
        }
        Node::Heading { level, .. } => format!("heading-{level}"),
        Node::HyperLink(link) => match &link.target {
            LinkTarget::Uri(uri) => format!("hyperlink -> {uri}"),
            LinkTarget::Entity(entity) => format!("hyperlink -> {} {}", entity.link_type, entity.id),
        },
        Node::EmbeddedLink(embed) => {
            let placement = match embed.placement {
                Placement::Block => "block",
                Placement::Inline => "inline",
            };
            format!("embedded {placement} {} {}", embed.target.link_type, embed.target.id)
        }
        Node::Opaque(_) => format!("opaque ({})", node.opaque_type().unwrap_or("?")),
        other => other.name().to_string(),
    }
}

fn print_tree(nodes: &[Node], depth: usize) {
    for node in nodes {
        println!("{}{}", "  ".repeat(depth), describe(node));
        print_tree(node.content(), depth + 1);
    }
}

fn summarize(doc: &Document) {
    let total = doc.nodes().count();
    let opaque = doc.nodes().filter(|n| matches!(n, Node::Opaque(_))).count();
    let links = doc.entity_links();

    println!("\n=== Summary ===");
    println!("  Top-level blocks: {}", doc.len());
    println!("  Nodes: {total}");
    println!("  Opaque nodes: {opaque}");
    println!("  Entity links: {}", links.len());
    for link in links.iter().take(10) {
        println!("    - {} {}", link.link_type, link.id);
    }
    if links.len() > 10 {
        println!("    ... and {} more", links.len() - 10);
    }
}

fn main() {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "data/body.json".to_string());

    println!("Reading: {path}");

    let text = fs::read_to_string(&path).expect("Failed to read file");
    println!("File size: {} bytes", text.len());

    let doc = decode_str(&text).expect("Failed to decode");

    println!("\n=== Tree ===");
    print_tree(doc.content(), 0);
    summarize(&doc);

    let encoded = encode_to_string(&doc).expect("Failed to encode");
    println!("\nCanonical size: {} bytes", encoded.len());
}
