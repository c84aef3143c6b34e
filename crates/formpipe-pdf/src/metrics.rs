//! Text width metrics for the Type1 base fonts
//!
//! Widths come from the Adobe core-font AFM files, in thousandths of
//! the text size, covering printable ASCII. Everything outside the
//! table falls back to an average glyph width; Courier is fixed-pitch.

use crate::markdown::SpanStyle;

/// Helvetica glyph widths for 0x20..=0x7E
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // '0'..'9'
    278, 278, 584, 584, 584, 556, 1015, // ':'..'@'
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, 667, // 'A'..'P'
    778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // 'Q'..'Z'
    278, 278, 278, 469, 556, 333, // '['..'`'
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, 556, // 'a'..'p'
    556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // 'q'..'z'
    334, 260, 334, 584, // '{'..'~'
];

/// Helvetica-Bold glyph widths for 0x20..=0x7E
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    333, 333, 584, 584, 584, 611, 975,
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778, 667,
    778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    333, 278, 333, 584, 556, 333,
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611, 611,
    611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
    389, 280, 389, 584,
];

/// Fixed Courier advance
const COURIER_WIDTH: u16 = 600;

/// Fallback for glyphs outside the table
const DEFAULT_WIDTH: u16 = 556;

/// Width of one character in thousandths of the text size
pub fn char_width_millis(c: char, style: SpanStyle) -> u16 {
    if style == SpanStyle::Code {
        return COURIER_WIDTH;
    }

    let table = match style {
        SpanStyle::Bold => &HELVETICA_BOLD_WIDTHS,
        _ => &HELVETICA_WIDTHS,
    };

    let code = c as u32;
    if (0x20..=0x7E).contains(&code) {
        table[(code - 0x20) as usize]
    } else {
        DEFAULT_WIDTH
    }
}

/// Width of a string at a given text size, in points
pub fn text_width(text: &str, size: f32, style: SpanStyle) -> f32 {
    let millis: u32 = text
        .chars()
        .map(|c| char_width_millis(c, style) as u32)
        .sum();
    millis as f32 * size / 1000.0
}
