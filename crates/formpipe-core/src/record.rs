//! Student records read from the spreadsheet collaborator

use std::collections::BTreeMap;

use crate::config::consts::sheet;

/// One spreadsheet row, reduced to the three columns the merger needs.
/// Other columns are ignored at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentRecord {
    pub student_name: String,
    pub roll_number: String,
    pub additional_language: String,
}

impl StudentRecord {
    /// Build a record from a header-keyed row; absent columns become
    /// empty strings and fail validation later.
    pub fn from_row(row: &BTreeMap<String, String>) -> Self {
        let field = |name: &str| row.get(name).cloned().unwrap_or_default();

        Self {
            student_name: field(sheet::COL_STUDENT_NAME),
            roll_number: field(sheet::COL_ROLL_NUMBER),
            additional_language: field(sheet::COL_LANGUAGE),
        }
    }

    /// A record is valid only if all three fields are non-empty.
    /// Returns the names of the missing fields, empty when valid.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.student_name.is_empty() {
            missing.push(sheet::COL_STUDENT_NAME);
        }
        if self.roll_number.is_empty() {
            missing.push(sheet::COL_ROLL_NUMBER);
        }
        if self.additional_language.is_empty() {
            missing.push(sheet::COL_LANGUAGE);
        }
        missing
    }
}
