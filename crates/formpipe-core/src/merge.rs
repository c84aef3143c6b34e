//! Record merger - substitute student data into language templates
//!
//! The batch loop collects one outcome per record and never aborts on
//! a single bad record. A record counts as merged only when its output
//! file was actually written; defective input and write failures land
//! in separate tallies.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::consts::{ext, tokens};
use crate::config::PipelineConfig;
use crate::error::{FormpipeError, Result};
use crate::language::language_code;
use crate::record::StudentRecord;

/// Why a record was skipped (input defect, not a failure)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Required columns empty or absent
    MissingFields(Vec<&'static str>),
    /// Language name not in the fixed map
    UnknownLanguage(String),
    /// No template file with the resolved code as its stem
    TemplateMissing(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingFields(fields) => {
                write!(f, "missing {}", fields.join(", "))
            }
            SkipReason::UnknownLanguage(name) => write!(f, "unknown language '{}'", name),
            SkipReason::TemplateMissing(code) => {
                write!(f, "no template for language code '{}'", code)
            }
        }
    }
}

/// Outcome of processing one record
#[derive(Debug)]
pub enum MergeOutcome {
    /// Output file written
    Merged(PathBuf),
    /// Record skipped for a logged reason
    Skipped(SkipReason),
    /// Read or write failed mid-record
    Failed(String),
}

/// Run-end tallies for the merge stage
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MergeSummary {
    pub merged: usize,
    pub skipped: usize,
    pub failed: usize,
    pub total: usize,
}

impl MergeSummary {
    fn record(&mut self, outcome: &MergeOutcome) {
        self.total += 1;
        match outcome {
            MergeOutcome::Merged(_) => self.merged += 1,
            MergeOutcome::Skipped(_) => self.skipped += 1,
            MergeOutcome::Failed(_) => self.failed += 1,
        }
    }
}

/// Replace both placeholder tokens with the record's values
///
/// Replacement is literal, case-sensitive substring substitution.
/// Templates without a token are left byte-identical elsewhere, so
/// applying this to already-filled text is a no-op.
pub fn fill_template(template: &str, record: &StudentRecord) -> String {
    template
        .replace(tokens::CHILD_NAME, &record.student_name)
        .replace(tokens::ROLL_NUMBER, &record.roll_number)
}

/// Deterministic output file name: `<stem>_<Student_Name>_prefilled.md`
pub fn prefilled_file_name(template_stem: &str, student_name: &str) -> String {
    format!(
        "{}_{}_prefilled.{}",
        template_stem,
        student_name.replace(' ', "_"),
        ext::MARKDOWN
    )
}

/// Find the template whose file stem equals the language code.
/// First directory-order match wins if duplicates exist.
///
/// # Errors
///
/// Returns an error if the template directory cannot be read
pub fn find_template(forms_dir: &Path, code: &str) -> Result<Option<PathBuf>> {
    for entry in fs::read_dir(forms_dir)? {
        let path = entry?.path();
        let is_markdown = path
            .extension()
            .is_some_and(|e| e.to_str() == Some(ext::MARKDOWN));
        let stem_matches = path
            .file_stem()
            .is_some_and(|s| s.to_str() == Some(code));

        if is_markdown && stem_matches {
            return Ok(Some(path));
        }
    }
    Ok(None)
}

/// Process one record end to end
fn merge_record(record: &StudentRecord, config: &PipelineConfig) -> MergeOutcome {
    let missing = record.missing_fields();
    if !missing.is_empty() {
        return MergeOutcome::Skipped(SkipReason::MissingFields(missing));
    }

    let Some(code) = language_code(&record.additional_language) else {
        return MergeOutcome::Skipped(SkipReason::UnknownLanguage(
            record.additional_language.clone(),
        ));
    };

    let template_path = match find_template(&config.forms_dir, code) {
        Ok(Some(path)) => path,
        Ok(None) => return MergeOutcome::Skipped(SkipReason::TemplateMissing(code.to_string())),
        Err(e) => return MergeOutcome::Failed(e.to_string()),
    };

    let template = match fs::read_to_string(&template_path) {
        Ok(content) => content,
        Err(e) => {
            return MergeOutcome::Failed(format!(
                "failed to read {}: {}",
                template_path.display(),
                e
            ))
        }
    };

    let filled = fill_template(&template, record);
    let output_path = config
        .prefilled_dir
        .join(prefilled_file_name(code, &record.student_name));

    // Unconditional overwrite on name collision
    if let Err(e) = fs::write(&output_path, filled) {
        return MergeOutcome::Failed(format!("failed to write {}: {}", output_path.display(), e));
    }

    MergeOutcome::Merged(output_path)
}

/// Merge every row into a prefilled output file
///
/// Per-record defects and failures are logged and counted; only the
/// absence of the template directory or an unwritable output directory
/// aborts the stage.
///
/// # Errors
///
/// Returns an error if the template directory is missing, the output
/// directory cannot be created, or no rows were provided
pub fn merge_records(
    rows: &[BTreeMap<String, String>],
    config: &PipelineConfig,
    verbose: bool,
) -> Result<MergeSummary> {
    if rows.is_empty() {
        return Err(FormpipeError::RecordsEmpty);
    }
    if !config.forms_dir.is_dir() {
        return Err(FormpipeError::TemplateDirNotFound {
            path: config.forms_dir.clone(),
        });
    }

    fs::create_dir_all(&config.prefilled_dir)?;

    let mut summary = MergeSummary::default();

    for (i, row) in rows.iter().enumerate() {
        let record = StudentRecord::from_row(row);
        let outcome = merge_record(&record, config);
        summary.record(&outcome);

        // Row numbers are 1-based in operator-facing output
        match &outcome {
            MergeOutcome::Merged(path) => {
                if verbose {
                    eprintln!(
                        "record {}: {} (roll {}) -> {}",
                        i + 1,
                        record.student_name,
                        record.roll_number,
                        path.display()
                    );
                }
            }
            MergeOutcome::Skipped(reason) => {
                eprintln!("record {}: {}, skipping", i + 1, reason);
            }
            MergeOutcome::Failed(message) => {
                eprintln!("record {}: {}", i + 1, message);
            }
        }
    }

    Ok(summary)
}
