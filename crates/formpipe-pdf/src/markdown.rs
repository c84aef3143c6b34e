//! Templating-markup parsing
//!
//! Parses Markdown (GFM, so tables survive) to an mdast tree and
//! flattens it into the small block/span model the layout engine
//! consumes. Inline structure keeps only what the fixed theme can
//! express: bold, italic and code styling.

use markdown::mdast::Node;
use markdown::ParseOptions;

use crate::error::RenderError;

/// Inline text style
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanStyle {
    Regular,
    Bold,
    Italic,
    Code,
}

/// A run of equally styled text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub style: SpanStyle,
}

impl Span {
    pub fn new(text: impl Into<String>, style: SpanStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

/// One laid-out block of the document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading { depth: u8, spans: Vec<Span> },
    Paragraph { spans: Vec<Span> },
    ListItem {
        marker: String,
        indent: usize,
        spans: Vec<Span>,
    },
    CodeBlock { lines: Vec<String> },
    Table { rows: Vec<Vec<String>> },
    Rule,
}

/// Parse templating markup into blocks
///
/// # Errors
///
/// Returns error if the markup cannot be parsed
pub fn parse_blocks(source: &str) -> Result<Vec<Block>, RenderError> {
    let tree = markdown::to_mdast(source, &ParseOptions::gfm())
        .map_err(|e| RenderError::Parse(e.to_string()))?;

    let mut blocks = Vec::new();
    if let Some(children) = tree.children() {
        for child in children {
            flatten_block(child, 0, source, &mut blocks);
        }
    }
    Ok(blocks)
}

/// A run of five or more underscores and nothing else is a signature
/// line wherever it appears
pub fn is_signature_run(text: &str) -> bool {
    let trimmed = text.trim();
    trimmed.len() >= 5 && trimmed.chars().all(|c| c == '_')
}

fn flatten_block(node: &Node, indent: usize, source: &str, blocks: &mut Vec<Block>) {
    match node {
        Node::Heading(heading) => {
            let mut spans = Vec::new();
            collect_spans(&heading.children, SpanStyle::Bold, &mut spans);
            blocks.push(Block::Heading {
                depth: heading.depth,
                spans,
            });
        }
        Node::Paragraph(paragraph) => {
            let mut spans = Vec::new();
            collect_spans(&paragraph.children, SpanStyle::Regular, &mut spans);
            if !spans.is_empty() {
                blocks.push(Block::Paragraph { spans });
            }
        }
        Node::List(list) => {
            let mut number = list.start.unwrap_or(1);
            for item in &list.children {
                let marker = if list.ordered {
                    let m = format!("{}.", number);
                    number += 1;
                    m
                } else {
                    "\u{2022}".to_string()
                };
                flatten_list_item(item, marker, indent, source, blocks);
            }
        }
        Node::Code(code) => {
            blocks.push(Block::CodeBlock {
                lines: code.value.lines().map(str::to_string).collect(),
            });
        }
        Node::Table(table) => {
            let rows = table
                .children
                .iter()
                .filter_map(|row| match row {
                    Node::TableRow(row) => Some(
                        row.children
                            .iter()
                            .map(|cell| plain_text(cell))
                            .collect::<Vec<_>>(),
                    ),
                    _ => None,
                })
                .collect();
            blocks.push(Block::Table { rows });
        }
        Node::ThematicBreak(brk) => {
            // A bare underscore run parses as a thematic break, but in
            // a consent form it is a signature line. Recover the raw
            // text to tell the two apart.
            let raw = brk
                .position
                .as_ref()
                .and_then(|p| source.get(p.start.offset..p.end.offset))
                .map(str::trim)
                .unwrap_or("");
            if is_signature_run(raw) {
                blocks.push(Block::Paragraph {
                    spans: vec![Span::new(raw, SpanStyle::Regular)],
                });
            } else {
                blocks.push(Block::Rule);
            }
        }
        Node::Blockquote(quote) => {
            for child in &quote.children {
                flatten_block(child, indent, source, blocks);
            }
        }
        // Raw HTML and anything else without block meaning is dropped
        _ => {}
    }
}

fn flatten_list_item(
    item: &Node,
    marker: String,
    indent: usize,
    source: &str,
    blocks: &mut Vec<Block>,
) {
    let Node::ListItem(item) = item else {
        return;
    };

    let mut spans = Vec::new();
    let mut nested = Vec::new();

    for child in &item.children {
        match child {
            Node::Paragraph(paragraph) => {
                if !spans.is_empty() {
                    spans.push(Span::new(" ", SpanStyle::Regular));
                }
                collect_spans(&paragraph.children, SpanStyle::Regular, &mut spans);
            }
            Node::List(_) => nested.push(child),
            other => flatten_block(other, indent + 1, source, blocks),
        }
    }

    blocks.push(Block::ListItem {
        marker,
        indent,
        spans,
    });

    for list in nested {
        flatten_block(list, indent + 1, source, blocks);
    }
}

/// Collect inline nodes into styled spans
fn collect_spans(nodes: &[Node], style: SpanStyle, out: &mut Vec<Span>) {
    for node in nodes {
        match node {
            Node::Text(text) => {
                // Soft line breaks inside a paragraph become spaces
                out.push(Span::new(text.value.replace('\n', " "), style));
            }
            Node::Strong(strong) => collect_spans(&strong.children, SpanStyle::Bold, out),
            Node::Emphasis(emphasis) => {
                let nested = if style == SpanStyle::Bold {
                    SpanStyle::Bold
                } else {
                    SpanStyle::Italic
                };
                collect_spans(&emphasis.children, nested, out);
            }
            Node::InlineCode(code) => out.push(Span::new(code.value.clone(), SpanStyle::Code)),
            Node::Break(_) => out.push(Span::new(" ", style)),
            Node::Link(link) => collect_spans(&link.children, style, out),
            other => {
                if let Some(children) = other.children() {
                    collect_spans(children, style, out);
                }
            }
        }
    }
}

/// Flatten a node to unstyled text (table cells)
pub fn plain_text(node: &Node) -> String {
    let mut spans = Vec::new();
    match node {
        Node::TableCell(cell) => collect_spans(&cell.children, SpanStyle::Regular, &mut spans),
        other => {
            if let Some(children) = other.children() {
                collect_spans(children, SpanStyle::Regular, &mut spans);
            }
        }
    }
    spans.into_iter().map(|s| s.text).collect()
}

/// Concatenated text of a span list
pub fn spans_text(spans: &[Span]) -> String {
    spans.iter().map(|s| s.text.as_str()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_and_paragraph() {
        let blocks = parse_blocks("# Consent Form\n\nPlain body text.\n").unwrap();

        assert_eq!(blocks.len(), 2);
        assert!(matches!(&blocks[0], Block::Heading { depth: 1, .. }));
        match &blocks[1] {
            Block::Paragraph { spans } => assert_eq!(spans_text(spans), "Plain body text."),
            other => panic!("expected paragraph, got {:?}", other),
        }
    }

    #[test]
    fn test_emphasis_styles() {
        let blocks = parse_blocks("normal **bold** *italic* `code`").unwrap();

        let Block::Paragraph { spans } = &blocks[0] else {
            panic!("expected paragraph");
        };
        let styles: Vec<SpanStyle> = spans.iter().map(|s| s.style).collect();
        assert!(styles.contains(&SpanStyle::Bold));
        assert!(styles.contains(&SpanStyle::Italic));
        assert!(styles.contains(&SpanStyle::Code));
    }

    #[test]
    fn test_unordered_and_ordered_lists() {
        let blocks = parse_blocks("- first\n- second\n\n1. one\n2. two\n").unwrap();

        let markers: Vec<&str> = blocks
            .iter()
            .filter_map(|b| match b {
                Block::ListItem { marker, .. } => Some(marker.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(markers, vec!["\u{2022}", "\u{2022}", "1.", "2."]);
    }

    #[test]
    fn test_nested_list_increases_indent() {
        let blocks = parse_blocks("- outer\n  - inner\n").unwrap();

        let indents: Vec<usize> = blocks
            .iter()
            .filter_map(|b| match b {
                Block::ListItem { indent, .. } => Some(*indent),
                _ => None,
            })
            .collect();
        assert_eq!(indents, vec![0, 1]);
    }

    #[test]
    fn test_fenced_code_block() {
        let blocks = parse_blocks("```\nline one\nline two\n```\n").unwrap();

        match &blocks[0] {
            Block::CodeBlock { lines } => assert_eq!(lines, &["line one", "line two"]),
            other => panic!("expected code block, got {:?}", other),
        }
    }

    #[test]
    fn test_gfm_table_rows_and_cells() {
        let source = "| Name | Roll |\n| --- | --- |\n| Asha | 12345 |\n";
        let blocks = parse_blocks(source).unwrap();

        match &blocks[0] {
            Block::Table { rows } => {
                assert_eq!(rows.len(), 2);
                assert_eq!(rows[0], vec!["Name", "Roll"]);
                assert_eq!(rows[1], vec!["Asha", "12345"]);
            }
            other => panic!("expected table, got {:?}", other),
        }
    }

    #[test]
    fn test_thematic_break_becomes_rule() {
        let blocks = parse_blocks("above\n\n---\n\nbelow\n").unwrap();
        assert!(blocks.iter().any(|b| matches!(b, Block::Rule)));
    }

    #[test]
    fn test_underscore_run_becomes_signature_paragraph() {
        let blocks = parse_blocks("Parent signature:\n\n__________\n").unwrap();

        match &blocks[1] {
            Block::Paragraph { spans } => assert_eq!(spans_text(spans), "__________"),
            other => panic!("expected signature paragraph, got {:?}", other),
        }
        assert!(!blocks.iter().any(|b| matches!(b, Block::Rule)));
    }

    #[test]
    fn test_short_underscore_run_stays_a_rule() {
        let blocks = parse_blocks("above\n\n___\n\nbelow\n").unwrap();
        assert!(blocks.iter().any(|b| matches!(b, Block::Rule)));
    }

    #[test]
    fn test_is_signature_run() {
        assert!(is_signature_run("__________"));
        assert!(is_signature_run("  _____  "));
        assert!(!is_signature_run("___"));
        assert!(!is_signature_run("Signature: ____"));
        assert!(!is_signature_run("_ _ _ _ _"));
    }

    #[test]
    fn test_placeholder_tokens_survive_parsing() {
        let blocks = parse_blocks("Child: {{CHILD_NAME}}\n").unwrap();

        let Block::Paragraph { spans } = &blocks[0] else {
            panic!("expected paragraph");
        };
        assert!(spans_text(spans).contains("{{CHILD_NAME}}"));
    }
}
