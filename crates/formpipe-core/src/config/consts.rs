//! Domain constants shared across the pipeline

/// Fixed directory and file names at the working directory root
pub mod layout {
    /// Fetcher output: downloaded templates keyed by language code
    pub const TEMPLATES_DIR: &str = "markdown";

    /// Merger template input (curated copies of fetched templates)
    pub const FORMS_DIR: &str = "consent_forms";

    /// Merger output / renderer input
    pub const PREFILLED_DIR: &str = "prefilled_consent_forms";

    /// Renderer output
    pub const PDF_DIR: &str = "consent_form_pdfs";

    /// Language catalog file
    pub const CATALOG_FILE: &str = "languages.json";

    /// Service account credentials file
    pub const CREDENTIALS_FILE: &str = "google_secret.json";

    /// Optional pipeline configuration file
    pub const CONFIG_FILE: &str = "formpipe.toml";
}

/// Placeholder tokens embedded in template text (literal markers)
pub mod tokens {
    pub const CHILD_NAME: &str = "{{CHILD_NAME}}";
    pub const ROLL_NUMBER: &str = "{{CHILD_10_ROLL_NUMBER}}";
}

/// Spreadsheet collaborator contract
pub mod sheet {
    /// Worksheet holding one row per student
    pub const WORKSHEET: &str = "School Data";

    /// Required column headers (other columns are ignored)
    pub const COL_STUDENT_NAME: &str = "Student Name";
    pub const COL_ROLL_NUMBER: &str = "10th CBSE Roll Number";
    pub const COL_LANGUAGE: &str = "Additional Language";

    /// Sheet the batch was built for; override via formpipe.toml
    pub const DEFAULT_SHEET_ID: &str = "1LyKfZoq5v9Evx0uHKQpFkjoIGjNVL_UbNkdNKegEbXc";
}

/// File extensions (without the dot)
pub mod ext {
    pub const MARKDOWN: &str = "md";
    pub const PDF: &str = "pdf";
}
