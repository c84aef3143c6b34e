// Core modules
pub mod catalog;
pub mod config;
pub mod error;
pub mod language;
pub mod merge;
pub mod record;

// Re-export commonly used types
pub use error::{FormpipeError, Result};
