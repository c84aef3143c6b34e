//! CLI command structure using clap

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "formpipe")]
#[command(version, about = "Consent-form document pipeline", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Download per-language templates from the document source
    Fetch,

    /// Merge student records from the sheet into prefilled forms
    Merge,

    /// Render prefilled forms to PDF (skips existing outputs)
    Render,
}
