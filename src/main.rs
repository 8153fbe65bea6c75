//! Puzzlehide - Hide a secret in a jigsaw puzzle
//!
//! A CLI tool that plans how a secret is spread over the pieces of a
//! jigsaw puzzle and reads it back from the resulting manifest.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{
    CapacityCommand, CommandExecutor, InspectCommand, PlanCommand, ReconstructCommand,
};

/// Puzzlehide - Hide a secret in a jigsaw puzzle
///
/// Sorts the pieces of a puzzle into grid order from their geometry and
/// assigns each one a 2 or 3 byte chunk of the secret.
#[derive(Parser)]
#[command(name = "puzzlehide")]
#[command(version)]
#[command(about = "Spread a secret over the pieces of a jigsaw puzzle")]
#[command(long_about = None)]
struct Cli {
    /// Verbose output (sets the log level to debug; RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sort the pieces and assign each one a chunk of the secret
    Plan(PlanCommand),

    /// Recover the secret from a manifest
    Reconstruct(ReconstructCommand),

    /// Show the grid inferred from a geometry listing
    Inspect(InspectCommand),

    /// Show which piece counts a secret fits
    Capacity(CapacityCommand),
}

impl Commands {
    fn executor(&self) -> &dyn CommandExecutor {
        match self {
            Commands::Plan(cmd) => cmd,
            Commands::Reconstruct(cmd) => cmd,
            Commands::Inspect(cmd) => cmd,
            Commands::Capacity(cmd) => cmd,
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    cli.command.executor().execute()
}
