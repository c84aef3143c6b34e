//! Template fetcher - download per-language consent-form templates
//!
//! Each catalog entry carries an editable-document link. The fetcher
//! derives the markdown export form of that link, downloads it, and
//! persists the body as `<lang>.md`. Entries are processed one at a
//! time; a failed entry is logged and never aborts the rest.

use reqwest::blocking::Client;
use std::fs;
use std::path::Path;
use thiserror::Error;

use formpipe_core::catalog::LanguageEntry;
use formpipe_core::config::consts::ext;

/// Marker segment of an editable document link
pub const EDIT_SEGMENT: &str = "/edit";

/// Export-format marker appended or substituted for EDIT_SEGMENT
pub const EXPORT_SEGMENT: &str = "/export?format=md";

/// Derive the markdown-export form of a source link
///
/// If the link contains the editable marker the marker is replaced in
/// place; otherwise the export marker is appended. Pure string
/// transform, no request is made.
pub fn export_url(source_link: &str) -> String {
    if source_link.contains(EDIT_SEGMENT) {
        source_link.replace(EDIT_SEGMENT, EXPORT_SEGMENT)
    } else {
        format!("{}{}", source_link, EXPORT_SEGMENT)
    }
}

/// Download one exported document body as text
///
/// # Errors
///
/// Returns error if the request fails or the status is not 2xx
pub fn download_markdown(client: &Client, url: &str) -> Result<String, FetchError> {
    let response = client.get(url).send().map_err(|e| FetchError::Http {
        url: url.to_string(),
        source: e,
    })?;

    let response = response
        .error_for_status()
        .map_err(|e| FetchError::Http {
            url: url.to_string(),
            source: e,
        })?;

    response.text().map_err(|e| FetchError::Http {
        url: url.to_string(),
        source: e,
    })
}

/// Run-end tallies for the fetch stage
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FetchSummary {
    pub fetched: usize,
    pub skipped: usize,
    pub errored: usize,
    pub total: usize,
}

/// Fetch every catalog entry into `templates_dir`
///
/// Entries without a source link are skipped with a notice; per-entry
/// download failures are logged with the entry identity and counted,
/// then the loop continues. Existing files are overwritten.
///
/// # Errors
///
/// Returns error only if the HTTP client cannot be built or the
/// output directory cannot be created
pub fn fetch_templates(
    entries: &[LanguageEntry],
    templates_dir: &Path,
    verbose: bool,
) -> Result<FetchSummary, FetchError> {
    let client = crate::client::build_default_client()?;
    fs::create_dir_all(templates_dir)?;

    let mut summary = FetchSummary::default();

    for entry in entries {
        summary.total += 1;
        eprintln!("Processing {} ({})...", entry.lang_name, entry.lang);

        let Some(source_link) = entry.source_link() else {
            eprintln!("  no source link for {}, skipping", entry.lang_name);
            summary.skipped += 1;
            continue;
        };

        let url = export_url(source_link);
        if verbose {
            eprintln!("  GET {}", url);
        }

        match download_markdown(&client, &url) {
            Ok(body) => {
                let output = templates_dir.join(format!("{}.{}", entry.lang, ext::MARKDOWN));
                match fs::write(&output, body) {
                    Ok(()) => {
                        eprintln!("  saved {}", output.display());
                        summary.fetched += 1;
                    }
                    Err(e) => {
                        eprintln!("  error writing {}: {}", output.display(), e);
                        summary.errored += 1;
                    }
                }
            }
            Err(e) => {
                eprintln!("  error downloading {}: {}", entry.lang_name, e);
                summary.errored += 1;
            }
        }
    }

    Ok(summary)
}

/// Fetch stage errors
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP error for one entry
    #[error("HTTP error fetching {url}: {source}")]
    Http {
        /// URL that failed
        url: String,
        /// Underlying reqwest error
        #[source]
        source: reqwest::Error,
    },

    /// HTTP client construction error
    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
