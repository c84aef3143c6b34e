//! formpipe-remote
//!
//! Blocking HTTP collaborators for the consent-form pipeline: the
//! document-export endpoint (template fetcher) and the spreadsheet
//! rows endpoint (merge-stage input).

pub mod client;
pub mod gdocs;
pub mod sheets;

pub use client::{build_client, build_default_client, DEFAULT_TIMEOUT, USER_AGENT};
pub use gdocs::{export_url, fetch_templates, FetchError, FetchSummary};
pub use sheets::{fetch_rows, SheetsError};
