//! sdkdiff CLI
//!
//! Compare record collections between two SDK release payloads.

use clap::{Parser, Subcommand};

mod commands;
mod config;

#[derive(Debug, Parser)]
#[command(name = "sdkdiff")]
#[command(about = "sdkdiff - Structural diff of SDK release records", long_about = None)]
struct Cli {
    /// Logging profile (development, production, test); overrides the config file
    #[arg(long, global = true)]
    log_profile: Option<sdkdiff_core::logging_facility::Profile>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Compare one record kind between two payload files
    Compare(commands::compare::CompareArgs),
    /// Flatten a nested record tree into parent-referencing records
    Flatten(commands::flatten::FlattenArgs),
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Compare(args) => commands::compare::execute(args, cli.log_profile),
        Commands::Flatten(args) => commands::flatten::execute(args, cli.log_profile),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
