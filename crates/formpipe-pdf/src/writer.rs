//! Low-level PDF assembly
//!
//! Builds the object graph once all page content streams are known:
//! catalog → page tree → Type1 base fonts → one page + stream pair per
//! content buffer. Text outside Latin-1 cannot be encoded by the base
//! fonts and is downgraded to '?'.

use pdf_writer::{Content, Finish, Name, Pdf, Rect, Ref, Str};

use crate::markdown::SpanStyle;
use crate::theme::DocumentTheme;

/// Resource names of the four fixed fonts
pub const FONT_REGULAR: Name<'static> = Name(b"F1");
pub const FONT_BOLD: Name<'static> = Name(b"F2");
pub const FONT_ITALIC: Name<'static> = Name(b"F3");
pub const FONT_CODE: Name<'static> = Name(b"F4");

/// Font resource for an inline style
pub fn font_for(style: SpanStyle) -> Name<'static> {
    match style {
        SpanStyle::Regular => FONT_REGULAR,
        SpanStyle::Bold => FONT_BOLD,
        SpanStyle::Italic => FONT_ITALIC,
        SpanStyle::Code => FONT_CODE,
    }
}

/// Encode text for the base fonts: Latin-1 bytes, '?' beyond
pub fn encode_text(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| {
            let code = c as u32;
            if code <= 0xFF { code as u8 } else { b'?' }
        })
        .collect()
}

/// Show a styled run at the current text position
pub fn show_run(content: &mut Content, style: SpanStyle, size: f32, text: &str) {
    content.set_font(font_for(style), size);
    content.show(Str(&encode_text(text)));
}

/// Assemble the final PDF from per-page content streams
pub fn write_pdf(page_streams: Vec<Vec<u8>>, theme: &DocumentTheme) -> Vec<u8> {
    let mut pdf = Pdf::new();

    let catalog_id = Ref::new(1);
    let page_tree_id = Ref::new(2);
    let font_ids = [Ref::new(3), Ref::new(4), Ref::new(5), Ref::new(6)];
    let mut next_id = 7;

    pdf.catalog(catalog_id).pages(page_tree_id);

    let base_fonts: [&[u8]; 4] = [
        b"Helvetica",
        b"Helvetica-Bold",
        b"Helvetica-Oblique",
        b"Courier",
    ];
    for (font_id, base_font) in font_ids.iter().zip(base_fonts) {
        pdf.type1_font(*font_id).base_font(Name(base_font));
    }

    let mut page_ids = Vec::with_capacity(page_streams.len());
    let mut content_ids = Vec::with_capacity(page_streams.len());
    for _ in &page_streams {
        page_ids.push(Ref::new(next_id));
        content_ids.push(Ref::new(next_id + 1));
        next_id += 2;
    }

    let mut page_tree = pdf.pages(page_tree_id);
    page_tree.kids(page_ids.iter().copied());
    page_tree.count(page_ids.len() as i32);
    page_tree.finish();

    let font_names = [FONT_REGULAR, FONT_BOLD, FONT_ITALIC, FONT_CODE];
    for ((page_id, content_id), stream) in page_ids.iter().zip(&content_ids).zip(&page_streams) {
        let mut page = pdf.page(*page_id);
        page.media_box(Rect::new(0.0, 0.0, theme.page_width, theme.page_height));
        page.parent(page_tree_id);
        page.contents(*content_id);
        {
            let mut resources = page.resources();
            let mut fonts = resources.fonts();
            for (name, id) in font_names.iter().zip(font_ids) {
                fonts.pair(*name, id);
            }
        }
        page.finish();

        pdf.stream(*content_id, stream);
    }

    pdf.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_text_latin1_passthrough() {
        assert_eq!(encode_text("Asha Rao"), b"Asha Rao");
    }

    #[test]
    fn test_encode_text_replaces_wide_chars() {
        assert_eq!(encode_text("a\u{0915}b"), b"a?b");
    }

    #[test]
    fn test_write_pdf_emits_header_and_pages() {
        let theme = DocumentTheme::default();
        let content = Content::new();
        let bytes = write_pdf(vec![content.finish().to_vec()], &theme);

        assert!(bytes.starts_with(b"%PDF-"));
        // Exactly one page object in the tree
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("/Count 1"));
    }
}
