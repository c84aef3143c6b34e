mod cli;
mod commands;
mod context;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Fetch => commands::fetch::run(cli.verbose),
        Commands::Merge => commands::merge::run(cli.verbose),
        Commands::Render => commands::render::run(cli.verbose),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
