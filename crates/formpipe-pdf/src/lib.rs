//! formpipe-pdf
//!
//! Templating-markup (Markdown) → paginated PDF rendering stage.
//! One input file becomes one A4 document; outputs that already exist
//! are skipped, which is the pipeline's idempotence signal.

pub mod error;
pub mod markdown;
pub mod metrics;
pub mod render;
pub mod theme;
mod writer;

pub use error::RenderError;
pub use render::{render_directory, render_markdown, RenderSummary};
pub use theme::DocumentTheme;
