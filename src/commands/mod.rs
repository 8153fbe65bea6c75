//! Command module - Strategy pattern for CLI commands.
//!
//! Each command is a separate module implementing the `CommandExecutor` trait.

mod capacity;
mod inspect;
mod plan;
mod reconstruct;

pub use capacity::CapacityCommand;
pub use inspect::InspectCommand;
pub use plan::PlanCommand;
pub use reconstruct::ReconstructCommand;

use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use puzzlehide::{Origin, PuzzleConfig};

/// Trait for command execution - Strategy pattern.
///
/// Each command struct holds its parsed arguments and implements
/// this trait to define its execution logic.
pub trait CommandExecutor {
    /// Executes the command with its parsed arguments.
    fn execute(&self) -> Result<()>;
}

/// Loads the config file and applies the `--origin` override.
fn load_config(path: Option<&Path>, origin: Option<&str>) -> Result<PuzzleConfig> {
    let mut config = PuzzleConfig::resolve(path).context("Failed to load configuration")?;

    if let Some(origin) = origin {
        config.origin = match origin {
            "top-left" => Origin::TopLeft,
            "bottom-left" => Origin::BottomLeft,
            other => anyhow::bail!("Unknown origin: {}. Use: top-left or bottom-left", other),
        };
    }

    Ok(config)
}

/// Reads the geometry listing from a file, or from stdin if no path is given.
fn read_geometry(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(p) => std::fs::read_to_string(p)
            .with_context(|| format!("Failed to read geometry from {}", p.display())),
        None => {
            eprintln!("Reading geometry listing from stdin (Ctrl+D to finish):");
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read geometry from stdin")?;
            Ok(buffer)
        }
    }
}
