use thiserror::Error;

/// Rendering stage errors
#[derive(Debug, Error)]
pub enum RenderError {
    /// Templating markup could not be parsed
    #[error("markup parse error: {0}")]
    Parse(String),

    /// Input directory missing or unreadable
    #[error("input directory error: {0}")]
    InputDir(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
