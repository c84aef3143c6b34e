//! Fixed visual template applied to every rendered document

/// Document theme: page geometry, type sizes and spacing, all in
/// PostScript points. Depth-1 headings are centered and underlined
/// (the title treatment); a paragraph consisting only of underscores
/// is drawn as a signature rule instead of text.
#[derive(Debug, Clone)]
pub struct DocumentTheme {
    /// Page width (A4)
    pub page_width: f32,
    /// Page height (A4)
    pub page_height: f32,
    /// Uniform page margin (2 cm)
    pub margin: f32,

    /// Body text size
    pub body_size: f32,
    /// Heading sizes by depth (1, 2, 3+)
    pub heading1_size: f32,
    pub heading2_size: f32,
    pub heading3_size: f32,
    /// Fenced code block text size
    pub code_size: f32,

    /// Line height as a multiple of the text size
    pub line_height: f32,
    /// Vertical gap after a paragraph or list
    pub block_spacing: f32,
    /// Extra vertical gap before a heading
    pub heading_spacing: f32,

    /// Minimum drawn length of a signature rule
    pub signature_rule_width: f32,
}

impl Default for DocumentTheme {
    fn default() -> Self {
        Self {
            page_width: 595.276,
            page_height: 841.89,
            margin: 56.693,
            body_size: 11.0,
            heading1_size: 18.0,
            heading2_size: 14.0,
            heading3_size: 12.0,
            code_size: 9.5,
            line_height: 1.45,
            block_spacing: 9.0,
            heading_spacing: 14.0,
            signature_rule_width: 150.0,
        }
    }
}

impl DocumentTheme {
    /// Usable width between the margins
    pub fn content_width(&self) -> f32 {
        self.page_width - 2.0 * self.margin
    }

    /// Baseline-to-baseline distance for a text size
    pub fn leading(&self, size: f32) -> f32 {
        size * self.line_height
    }
}
