//! Markup → PDF conversion and the batch rendering stage

use pdf_writer::Content;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use crate::error::RenderError;
use crate::markdown::{parse_blocks, spans_text, Block, Span, SpanStyle};
use crate::metrics::text_width;
use crate::theme::DocumentTheme;
use crate::writer::{show_run, write_pdf};

/// Indent step per list nesting level, points
const LIST_INDENT: f32 = 18.0;

/// Gap between a list marker and the item text
const MARKER_GAP: f32 = 14.0;

/// Cell padding inside tables
const CELL_PADDING: f32 = 3.0;

/// One unbreakable word, possibly spanning style boundaries
struct Atom {
    pieces: Vec<Span>,
    width: f32,
}

/// Split spans into word atoms for greedy wrapping
fn atomize(spans: &[Span], size: f32) -> Vec<Atom> {
    let mut atoms: Vec<Atom> = Vec::new();
    let mut glue_previous = false;

    for span in spans {
        let mut first = true;
        for word in span.text.split_whitespace() {
            let width = text_width(word, size, span.style);
            let piece = Span::new(word, span.style);

            let continues_word =
                first && glue_previous && !span.text.starts_with(char::is_whitespace);
            if continues_word {
                if let Some(last) = atoms.last_mut() {
                    last.pieces.push(piece);
                    last.width += width;
                    first = false;
                    continue;
                }
            }

            atoms.push(Atom {
                pieces: vec![piece],
                width,
            });
            first = false;
        }
        glue_previous = !span.text.is_empty() && !span.text.ends_with(char::is_whitespace);
    }

    atoms
}

/// Greedy line wrapping; a single over-long atom gets its own line
fn wrap_spans(spans: &[Span], size: f32, max_width: f32) -> Vec<Vec<Span>> {
    let space = text_width(" ", size, SpanStyle::Regular);
    let mut lines: Vec<Vec<Span>> = Vec::new();
    let mut line: Vec<Span> = Vec::new();
    let mut line_width = 0.0_f32;

    for atom in atomize(spans, size) {
        let needed = if line.is_empty() {
            atom.width
        } else {
            space + atom.width
        };

        if !line.is_empty() && line_width + needed > max_width {
            lines.push(std::mem::take(&mut line));
            line_width = 0.0;
        }

        if !line.is_empty() {
            push_merged(&mut line, Span::new(" ", SpanStyle::Regular));
            line_width += space;
        }
        for piece in atom.pieces {
            line_width += text_width(&piece.text, size, piece.style);
            push_merged(&mut line, piece);
        }
    }

    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

fn push_merged(line: &mut Vec<Span>, span: Span) {
    if let Some(last) = line.last_mut() {
        if last.style == span.style {
            last.text.push_str(&span.text);
            return;
        }
    }
    line.push(span);
}

fn line_width(line: &[Span], size: f32) -> f32 {
    line.iter()
        .map(|s| text_width(&s.text, size, s.style))
        .sum()
}

/// Cursor-driven painter producing one content stream per page
struct Painter<'t> {
    theme: &'t DocumentTheme,
    content: Content,
    pages: Vec<Vec<u8>>,
    y: f32,
}

impl<'t> Painter<'t> {
    fn new(theme: &'t DocumentTheme) -> Self {
        Self {
            theme,
            content: Content::new(),
            pages: Vec::new(),
            y: theme.page_height - theme.margin,
        }
    }

    fn break_page(&mut self) {
        let finished = std::mem::replace(&mut self.content, Content::new());
        self.pages.push(finished.finish().to_vec());
        self.y = self.theme.page_height - self.theme.margin;
    }

    /// Start a new page if the next element would cross the bottom margin
    fn ensure_room(&mut self, needed: f32) {
        if self.y - needed < self.theme.margin {
            self.break_page();
        }
    }

    /// Draw one line of styled runs with its baseline at the cursor
    fn draw_line(&mut self, x: f32, size: f32, line: &[Span]) {
        self.ensure_room(self.theme.leading(size));
        self.y -= self.theme.leading(size);

        self.content.begin_text();
        self.content.next_line(x, self.y);
        for span in line {
            show_run(&mut self.content, span.style, size, &span.text);
        }
        self.content.end_text();
    }

    fn draw_rule(&mut self, x1: f32, x2: f32, stroke_width: f32) {
        self.content.set_line_width(stroke_width);
        self.content.move_to(x1, self.y);
        self.content.line_to(x2, self.y);
        self.content.stroke();
    }

    fn space(&mut self, gap: f32) {
        self.y -= gap;
    }

    fn finish(mut self) -> Vec<Vec<u8>> {
        self.pages.push(self.content.finish().to_vec());
        self.pages
    }
}

fn heading_size(theme: &DocumentTheme, depth: u8) -> f32 {
    match depth {
        1 => theme.heading1_size,
        2 => theme.heading2_size,
        _ => theme.heading3_size,
    }
}

/// A paragraph that is nothing but underscores is a signature line
fn is_signature_rule(spans: &[Span]) -> bool {
    crate::markdown::is_signature_run(&spans_text(spans))
}

fn paint_blocks(blocks: &[Block], theme: &DocumentTheme) -> Vec<Vec<u8>> {
    let mut painter = Painter::new(theme);
    let margin = theme.margin;
    let content_width = theme.content_width();

    for block in blocks {
        match block {
            Block::Heading { depth, spans } => {
                let size = heading_size(theme, *depth);
                painter.space(theme.heading_spacing);
                painter.ensure_room(theme.leading(size) + theme.block_spacing);

                if *depth == 1 {
                    // Title treatment: centered, ruled underneath
                    for line in wrap_spans(spans, size, content_width) {
                        let x = margin + (content_width - line_width(&line, size)).max(0.0) / 2.0;
                        painter.draw_line(x, size, &line);
                    }
                    painter.space(6.0);
                    painter.draw_rule(margin, margin + content_width, 1.0);
                } else {
                    for line in wrap_spans(spans, size, content_width) {
                        painter.draw_line(margin, size, &line);
                    }
                }
                painter.space(theme.block_spacing);
            }
            Block::Paragraph { spans } => {
                if is_signature_rule(spans) {
                    let text_len = text_width(
                        spans_text(spans).trim(),
                        theme.body_size,
                        SpanStyle::Regular,
                    );
                    let rule_len = text_len.max(theme.signature_rule_width);
                    painter.ensure_room(theme.leading(theme.body_size));
                    painter.space(theme.leading(theme.body_size));
                    painter.draw_rule(margin, margin + rule_len.min(content_width), 0.75);
                } else {
                    for line in wrap_spans(spans, theme.body_size, content_width) {
                        painter.draw_line(margin, theme.body_size, &line);
                    }
                }
                painter.space(theme.block_spacing);
            }
            Block::ListItem {
                marker,
                indent,
                spans,
            } => {
                let marker_x = margin + *indent as f32 * LIST_INDENT;
                let text_x = marker_x + MARKER_GAP;
                let wrap_width = (content_width - (text_x - margin)).max(72.0);

                let lines = wrap_spans(spans, theme.body_size, wrap_width);
                for (i, line) in lines.iter().enumerate() {
                    if i == 0 {
                        painter.ensure_room(theme.leading(theme.body_size));
                        // Marker and first text line share a baseline
                        let marker_span = [Span::new(marker.clone(), SpanStyle::Regular)];
                        painter.draw_line(marker_x, theme.body_size, &marker_span);
                        painter.y += theme.leading(theme.body_size);
                        painter.draw_line(text_x, theme.body_size, line);
                    } else {
                        painter.draw_line(text_x, theme.body_size, line);
                    }
                }
                painter.space(2.0);
            }
            Block::CodeBlock { lines } => {
                painter.space(4.0);
                for line in lines {
                    let run = [Span::new(line.clone(), SpanStyle::Code)];
                    painter.draw_line(margin, theme.code_size, &run);
                }
                painter.space(theme.block_spacing);
            }
            Block::Table { rows } => {
                paint_table(&mut painter, rows, theme);
                painter.space(theme.block_spacing);
            }
            Block::Rule => {
                painter.space(theme.block_spacing);
                painter.ensure_room(theme.block_spacing);
                painter.draw_rule(margin, margin + content_width, 0.75);
                painter.space(theme.block_spacing);
            }
        }
    }

    painter.finish()
}

fn paint_table(painter: &mut Painter, rows: &[Vec<String>], theme: &DocumentTheme) {
    let Some(first) = rows.first() else {
        return;
    };
    let columns = first.len().max(1);
    let col_width = theme.content_width() / columns as f32;
    let cell_width = (col_width - 2.0 * CELL_PADDING).max(18.0);
    let leading = theme.leading(theme.body_size);

    painter.ensure_room(leading);
    painter.draw_rule(theme.margin, theme.margin + theme.content_width(), 0.75);

    for (row_index, row) in rows.iter().enumerate() {
        // First row is the header row
        let style = if row_index == 0 {
            SpanStyle::Bold
        } else {
            SpanStyle::Regular
        };

        let cells: Vec<Vec<Vec<Span>>> = row
            .iter()
            .map(|cell| {
                wrap_spans(
                    &[Span::new(cell.clone(), style)],
                    theme.body_size,
                    cell_width,
                )
            })
            .collect();
        let row_lines = cells.iter().map(Vec::len).max().unwrap_or(1).max(1);
        let row_height = row_lines as f32 * leading + CELL_PADDING;

        painter.ensure_room(row_height);
        let row_top = painter.y;

        for (col, lines) in cells.iter().enumerate() {
            let x = theme.margin + col as f32 * col_width + CELL_PADDING;
            painter.y = row_top;
            for line in lines {
                painter.draw_line(x, theme.body_size, line);
            }
        }

        painter.y = row_top - row_height;
        painter.draw_rule(theme.margin, theme.margin + theme.content_width(), 0.75);
    }
}

/// Convert one templating-markup document to PDF bytes
///
/// # Errors
///
/// Returns error if the markup cannot be parsed
pub fn render_markdown(source: &str, theme: &DocumentTheme) -> Result<Vec<u8>, RenderError> {
    let blocks = parse_blocks(source)?;
    let pages = paint_blocks(&blocks, theme);
    Ok(write_pdf(pages, theme))
}

/// Run-end tallies for the render stage
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RenderSummary {
    pub generated: usize,
    pub skipped: usize,
    pub errored: usize,
    pub total: usize,
}

/// Render every `.md` file in `input_dir` to a PDF in `output_dir`
///
/// The existence of the expected output file is the sole idempotence
/// signal: present outputs are skipped without comparing content, even
/// if the input changed since they were written. Discovery is sorted
/// by file name so logs and summaries are deterministic.
///
/// # Errors
///
/// Returns error if the input directory is missing or the output
/// directory cannot be created
pub fn render_directory(
    input_dir: &Path,
    output_dir: &Path,
    verbose: bool,
) -> Result<RenderSummary, RenderError> {
    if !input_dir.is_dir() {
        return Err(RenderError::InputDir(format!(
            "'{}' is not a directory",
            input_dir.display()
        )));
    }
    fs::create_dir_all(output_dir)?;

    let mut inputs: Vec<_> = WalkDir::new(input_dir)
        .max_depth(1)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.into_path())
        .filter(|path| {
            path.is_file() && path.extension().is_some_and(|e| e.to_str() == Some("md"))
        })
        .collect();
    inputs.sort();

    let theme = DocumentTheme::default();
    let mut summary = RenderSummary::default();

    for input in &inputs {
        summary.total += 1;

        let Some(stem) = input.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        let output = output_dir.join(format!("{}.pdf", stem));

        if output.exists() {
            eprintln!("already exists, skipping: {}.pdf", stem);
            summary.skipped += 1;
            continue;
        }

        if verbose {
            eprintln!("rendering {}.pdf", stem);
        }

        let result = fs::read_to_string(input)
            .map_err(RenderError::from)
            .and_then(|source| render_markdown(&source, &theme))
            .and_then(|bytes| fs::write(&output, bytes).map_err(RenderError::from));

        match result {
            Ok(()) => {
                eprintln!("created {}", output.display());
                summary.generated += 1;
            }
            Err(e) => {
                eprintln!("error converting {}: {}", input.display(), e);
                summary.errored += 1;
            }
        }
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_spans_respects_max_width() {
        let spans = [Span::new(
            "one two three four five six seven eight nine ten",
            SpanStyle::Regular,
        )];
        let lines = wrap_spans(&spans, 12.0, 100.0);

        assert!(lines.len() > 1);
        for line in &lines {
            assert!(line_width(line, 12.0) <= 100.0 + f32::EPSILON);
        }
    }

    #[test]
    fn test_wrap_spans_keeps_style_boundaries() {
        let spans = [
            Span::new("plain ", SpanStyle::Regular),
            Span::new("bold", SpanStyle::Bold),
        ];
        let lines = wrap_spans(&spans, 12.0, 500.0);

        assert_eq!(lines.len(), 1);
        let styles: Vec<SpanStyle> = lines[0].iter().map(|s| s.style).collect();
        assert!(styles.contains(&SpanStyle::Bold));
    }

    #[test]
    fn test_wrap_glues_word_split_across_spans() {
        let spans = [
            Span::new("pre", SpanStyle::Regular),
            Span::new("filled", SpanStyle::Bold),
        ];
        let lines = wrap_spans(&spans, 12.0, 500.0);

        let text = spans_text(&lines[0]);
        assert_eq!(text, "prefilled");
    }

    #[test]
    fn test_signature_rule_detection() {
        assert!(is_signature_rule(&[Span::new(
            "__________",
            SpanStyle::Regular
        )]));
        assert!(!is_signature_rule(&[Span::new(
            "Signature: ____",
            SpanStyle::Regular
        )]));
        assert!(!is_signature_rule(&[Span::new("___", SpanStyle::Regular)]));
    }

    #[test]
    fn test_parsed_underscore_line_takes_signature_branch() {
        // The underscore line must arrive from the parser as a
        // signature paragraph, not as a thematic-break rule
        let blocks = parse_blocks("# Consent Form\n\nParent signature:\n\n__________\n").unwrap();

        assert!(!blocks.iter().any(|b| matches!(b, Block::Rule)));
        let signature = blocks
            .iter()
            .any(|b| matches!(b, Block::Paragraph { spans } if is_signature_rule(spans)));
        assert!(signature);
    }

    #[test]
    fn test_render_markdown_produces_pdf_bytes() {
        let source = "# Consent Form\n\nI, parent of **Asha Rao**, agree.\n\n| A | B |\n| - | - |\n| 1 | 2 |\n";
        let bytes = render_markdown(source, &DocumentTheme::default()).unwrap();

        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[test]
    fn test_long_document_paginates() {
        let mut source = String::from("# Title\n\n");
        for i in 0..200 {
            source.push_str(&format!("Paragraph number {} with some body text.\n\n", i));
        }
        let bytes = render_markdown(&source, &DocumentTheme::default()).unwrap();

        let text = String::from_utf8_lossy(&bytes);
        let marker = "/Count ";
        let start = text.find(marker).expect("page tree count") + marker.len();
        let count: usize = text[start..]
            .chars()
            .take_while(char::is_ascii_digit)
            .collect::<String>()
            .parse()
            .unwrap();
        assert!(count > 1, "expected more than one page, got {}", count);
    }
}
