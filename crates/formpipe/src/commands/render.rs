//! `formpipe render` - convert prefilled forms to paginated PDFs

use anyhow::Result;
use colored::Colorize;

use formpipe_pdf::render_directory;

use crate::context::Context;

/// Run the render stage
pub fn run(verbose: bool) -> Result<()> {
    let ctx = Context::new(verbose)?;

    println!(
        "{} Rendering '{}' -> '{}'",
        "→".cyan(),
        ctx.config.prefilled_dir.display(),
        ctx.config.pdf_dir.display()
    );

    let summary = render_directory(&ctx.config.prefilled_dir, &ctx.config.pdf_dir, ctx.verbose)?;

    println!(
        "{} Render complete: {} generated, {} skipped, {} errored, {} total",
        "✓".green().bold(),
        summary.generated,
        summary.skipped,
        summary.errored,
        summary.total
    );

    Ok(())
}
