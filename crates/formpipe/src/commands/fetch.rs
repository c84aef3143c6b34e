//! `formpipe fetch` - download per-language consent-form templates

use anyhow::Result;
use colored::Colorize;

use formpipe_core::catalog::load_catalog;
use formpipe_remote::fetch_templates;

use crate::context::Context;

/// Run the fetch stage
///
/// # Arguments
///
/// * `verbose` - Enable verbose output
pub fn run(verbose: bool) -> Result<()> {
    let ctx = Context::new(verbose)?;

    if verbose {
        println!(
            "{} Loading catalog '{}'",
            "→".cyan(),
            ctx.config.catalog_path.display()
        );
    }

    // Total absence of the catalog is the only fatal input here
    let entries = load_catalog(&ctx.config.catalog_path)?;

    println!(
        "{} Fetching {} language template(s)",
        "→".cyan(),
        entries.len()
    );

    let summary = fetch_templates(&entries, &ctx.config.templates_dir, ctx.verbose)?;

    println!(
        "{} Fetch complete: {} fetched, {} skipped, {} errored, {} total",
        "✓".green().bold(),
        summary.fetched,
        summary.skipped,
        summary.errored,
        summary.total
    );

    Ok(())
}
