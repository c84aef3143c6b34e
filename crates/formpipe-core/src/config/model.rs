use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::consts::{layout, sheet};
use crate::error::{FormpipeError, Result};

/// formpipe.toml schema - pipeline directory layout and sheet identity
///
/// Every field has a fixed default matching the conventional working
/// directory layout, so the file is optional. The struct is passed
/// explicitly into each stage entry point; nothing reads these paths
/// from module globals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Fetcher output directory
    #[serde(default = "default_templates_dir")]
    pub templates_dir: PathBuf,

    /// Merger template input directory
    #[serde(default = "default_forms_dir")]
    pub forms_dir: PathBuf,

    /// Merger output / renderer input directory
    #[serde(default = "default_prefilled_dir")]
    pub prefilled_dir: PathBuf,

    /// Renderer output directory
    #[serde(default = "default_pdf_dir")]
    pub pdf_dir: PathBuf,

    /// Language catalog file
    #[serde(default = "default_catalog_path")]
    pub catalog_path: PathBuf,

    /// Service account credentials file
    #[serde(default = "default_credentials_path")]
    pub credentials_path: PathBuf,

    /// Spreadsheet identifier for the merge stage
    #[serde(default = "default_sheet_id")]
    pub sheet_id: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            templates_dir: default_templates_dir(),
            forms_dir: default_forms_dir(),
            prefilled_dir: default_prefilled_dir(),
            pdf_dir: default_pdf_dir(),
            catalog_path: default_catalog_path(),
            credentials_path: default_credentials_path(),
            sheet_id: default_sheet_id(),
        }
    }
}

impl PipelineConfig {
    /// Load configuration from a formpipe.toml file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| FormpipeError::ConfigParseError(e.to_string()))
    }

    /// Load `formpipe.toml` from `root` if present, defaults otherwise
    ///
    /// Relative paths in the config are resolved against `root`.
    ///
    /// # Errors
    ///
    /// Returns an error only if a config file exists but is invalid
    pub fn load_or_default(root: &Path) -> Result<Self> {
        let config_path = root.join(layout::CONFIG_FILE);
        let config = if config_path.exists() {
            Self::from_file(&config_path)?
        } else {
            Self::default()
        };
        Ok(config.rooted_at(root))
    }

    /// Resolve all relative paths against `root`
    pub fn rooted_at(mut self, root: &Path) -> Self {
        self.templates_dir = root.join(&self.templates_dir);
        self.forms_dir = root.join(&self.forms_dir);
        self.prefilled_dir = root.join(&self.prefilled_dir);
        self.pdf_dir = root.join(&self.pdf_dir);
        self.catalog_path = root.join(&self.catalog_path);
        self.credentials_path = root.join(&self.credentials_path);
        self
    }
}

fn default_templates_dir() -> PathBuf {
    PathBuf::from(layout::TEMPLATES_DIR)
}

fn default_forms_dir() -> PathBuf {
    PathBuf::from(layout::FORMS_DIR)
}

fn default_prefilled_dir() -> PathBuf {
    PathBuf::from(layout::PREFILLED_DIR)
}

fn default_pdf_dir() -> PathBuf {
    PathBuf::from(layout::PDF_DIR)
}

fn default_catalog_path() -> PathBuf {
    PathBuf::from(layout::CATALOG_FILE)
}

fn default_credentials_path() -> PathBuf {
    PathBuf::from(layout::CREDENTIALS_FILE)
}

fn default_sheet_id() -> String {
    sheet::DEFAULT_SHEET_ID.to_string()
}
