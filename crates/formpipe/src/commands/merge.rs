//! `formpipe merge` - substitute student records into templates

use anyhow::{bail, Result};
use colored::Colorize;

use formpipe_core::merge::merge_records;
use formpipe_remote::sheets;

use crate::context::Context;

/// Run the merge stage
///
/// Workflow:
/// 1. Authenticate and read rows from the `School Data` worksheet
/// 2. Merge each valid row into a prefilled output file
/// 3. Print the run-end summary
///
/// An authentication or read failure aborts the whole run: without
/// rows there is nothing to merge.
pub fn run(verbose: bool) -> Result<()> {
    let ctx = Context::new(verbose)?;

    if !ctx.config.credentials_path.exists() {
        bail!(
            "CREDENTIALS_NOT_FOUND: credentials file '{}' not found",
            ctx.config.credentials_path.display()
        );
    }

    println!("{} Reading sheet records", "→".cyan());
    let rows = sheets::fetch_rows(
        &ctx.config.credentials_path,
        &ctx.config.sheet_id,
        ctx.verbose,
    )?;

    println!("{} Merging {} record(s)", "→".cyan(), rows.len());
    let summary = merge_records(&rows, &ctx.config, ctx.verbose)?;

    println!(
        "{} Merge complete: {} merged, {} skipped, {} failed, {} total",
        "✓".green().bold(),
        summary.merged,
        summary.skipped,
        summary.failed,
        summary.total
    );

    Ok(())
}
