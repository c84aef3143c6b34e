//! Spreadsheet collaborator - rows from the `School Data` worksheet
//!
//! Thin wrapper over the Sheets `values.get` endpoint. The first row
//! is treated as headers; every following row becomes a header-keyed
//! map. Column selection and validation happen downstream in
//! formpipe-core.

pub mod auth;

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;
use url::Url;

use formpipe_core::config::consts::sheet;

/// Environment override for the Sheets endpoint (used by tests)
pub const SHEETS_BASE_URL_ENV: &str = "FORMPIPE_SHEETS_BASE_URL";

/// Production Sheets endpoint
pub const SHEETS_BASE_URL: &str = "https://sheets.googleapis.com";

/// Resolve the Sheets base URL, honoring the test override
pub fn sheets_base_url() -> Result<Url, url::ParseError> {
    match std::env::var(SHEETS_BASE_URL_ENV) {
        Ok(base) => Url::parse(&base),
        Err(_) => Url::parse(SHEETS_BASE_URL),
    }
}

/// Build the values.get URL for the `School Data` worksheet
///
/// # Errors
///
/// Returns error if the base URL is invalid or cannot be a base
pub fn values_url(sheet_id: &str) -> Result<Url, SheetsError> {
    let mut url = sheets_base_url().map_err(|e| SheetsError::Url(e.to_string()))?;

    url.path_segments_mut()
        .map_err(|_| SheetsError::Url("base URL cannot be a base".to_string()))?
        .clear()
        .extend(["v4", "spreadsheets", sheet_id, "values", sheet::WORKSHEET]);

    Ok(url)
}

/// values.get response body
#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<serde_json::Value>>,
}

/// Render one cell as text; numbers lose no digits, nulls are empty
fn cell_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Turn the raw value grid into header-keyed row maps
///
/// The first row supplies the keys. Short rows simply omit trailing
/// columns; downstream validation treats absent columns as empty.
pub fn rows_from_values(values: &[Vec<serde_json::Value>]) -> Vec<BTreeMap<String, String>> {
    let Some((header, data)) = values.split_first() else {
        return Vec::new();
    };

    let headers: Vec<String> = header.iter().map(cell_text).collect();

    data.iter()
        .map(|row| {
            headers
                .iter()
                .zip(row.iter())
                .map(|(key, value)| (key.clone(), cell_text(value)))
                .collect()
        })
        .collect()
}

/// Fetch all records from the sheet's `School Data` worksheet
///
/// Authentication and the request are single-attempt; any failure here
/// aborts the merge stage, since no records can be read without them.
///
/// # Errors
///
/// Returns error if credentials are unreadable, authentication fails,
/// or the values request fails
pub fn fetch_rows(
    credentials_path: &Path,
    sheet_id: &str,
    verbose: bool,
) -> Result<Vec<BTreeMap<String, String>>, SheetsError> {
    let key = auth::load_key(credentials_path)?;
    let client = crate::client::build_default_client()?;
    let token = auth::access_token(&client, &key)?;

    let url = values_url(sheet_id)?;
    if verbose {
        eprintln!("GET {}", url);
    }

    let response = client
        .get(url.as_str())
        .bearer_auth(&token)
        .send()
        .and_then(|r| r.error_for_status())
        .map_err(|e| SheetsError::Http {
            url: url.to_string(),
            source: e,
        })?;

    let value_range: ValueRange = response.json().map_err(|e| SheetsError::Http {
        url: url.to_string(),
        source: e,
    })?;

    let rows = rows_from_values(&value_range.values);

    eprintln!(
        "Found {} records in the '{}' sheet",
        rows.len(),
        sheet::WORKSHEET
    );
    if verbose {
        if let Some(first) = rows.first() {
            let columns: Vec<&str> = first.keys().map(String::as_str).collect();
            eprintln!("Available columns: {}", columns.join(", "));
        }
    }

    Ok(rows)
}

/// Sheets collaborator errors
#[derive(Debug, Error)]
pub enum SheetsError {
    /// Authentication failure (stage-fatal)
    #[error("authentication failed: {0}")]
    Auth(#[from] auth::AuthError),

    /// HTTP error against the values endpoint
    #[error("HTTP error fetching {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// HTTP client construction error
    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    /// URL construction error
    #[error("URL error: {0}")]
    Url(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_values_url_encodes_worksheet_name() {
        let url = values_url("sheet-123").unwrap();
        assert_eq!(
            url.as_str(),
            "https://sheets.googleapis.com/v4/spreadsheets/sheet-123/values/School%20Data"
        );
    }

    #[test]
    fn test_rows_from_values_keys_by_header() {
        let values = vec![
            vec![json!("Student Name"), json!("10th CBSE Roll Number")],
            vec![json!("Asha Rao"), json!(12345)],
        ];

        let rows = rows_from_values(&values);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["Student Name"], "Asha Rao");
        // Numeric cells are stringified without quotes
        assert_eq!(rows[0]["10th CBSE Roll Number"], "12345");
    }

    #[test]
    fn test_rows_from_values_short_rows_omit_columns() {
        let values = vec![
            vec![json!("A"), json!("B"), json!("C")],
            vec![json!("only-a")],
        ];

        let rows = rows_from_values(&values);
        assert_eq!(rows[0].get("A").map(String::as_str), Some("only-a"));
        assert_eq!(rows[0].get("B"), None);
    }

    #[test]
    fn test_rows_from_values_empty_grid() {
        assert!(rows_from_values(&[]).is_empty());
        assert!(rows_from_values(&[vec![json!("Header")]]).is_empty());
    }
}
