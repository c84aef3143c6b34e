use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FormpipeError {
    // Catalog errors
    #[error("CATALOG_NOT_FOUND: language catalog '{path}' not found")]
    CatalogNotFound { path: PathBuf },

    #[error("CATALOG_INVALID: failed to parse language catalog: {0}")]
    CatalogInvalid(String),

    // Config errors
    #[error("CONFIG_PARSE_ERROR: failed to parse formpipe.toml: {0}")]
    ConfigParseError(String),

    // Template errors
    #[error("TEMPLATE_DIR_NOT_FOUND: template directory '{path}' not found")]
    TemplateDirNotFound { path: PathBuf },

    // Record source errors
    #[error("RECORDS_EMPTY: no records found in the sheet")]
    RecordsEmpty,

    // IO errors
    #[error("IO_ERROR: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FormpipeError>;
