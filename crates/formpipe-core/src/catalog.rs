//! Language catalog - one entry per supported consent-form language

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{FormpipeError, Result};

/// One entry of languages.json
///
/// `source_link` points at the editable source document and may be
/// null or empty for languages without a translation yet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageEntry {
    pub lang: String,
    pub lang_name: String,
    #[serde(default)]
    pub source_link: Option<String>,
}

impl LanguageEntry {
    /// Returns the source link if it is present and non-empty
    pub fn source_link(&self) -> Option<&str> {
        self.source_link.as_deref().filter(|s| !s.is_empty())
    }
}

/// Load the language catalog from a JSON file
///
/// # Errors
///
/// Returns an error if the file is missing or not a valid catalog
pub fn load_catalog(path: &Path) -> Result<Vec<LanguageEntry>> {
    if !path.exists() {
        return Err(FormpipeError::CatalogNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|e| FormpipeError::CatalogInvalid(e.to_string()))
}
