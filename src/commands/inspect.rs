//! Inspect command - show the grid inferred from a geometry listing.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use puzzlehide::puzzle::{MAX_CHUNK, MIN_CHUNK};
use puzzlehide::{arrange, parse_query_output};

use super::{load_config, read_geometry, CommandExecutor};

/// Show the grid inferred from a geometry listing, without planning.
#[derive(Args, Debug)]
pub struct InspectCommand {
    /// Geometry listing (reads stdin if not provided)
    #[arg(short, long)]
    pub geometry: Option<PathBuf>,

    /// Coordinate origin of the geometry: top-left or bottom-left
    #[arg(long, value_parser = ["top-left", "bottom-left"])]
    pub origin: Option<String>,

    /// Config file (defaults to ~/.puzzlehide/config.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl CommandExecutor for InspectCommand {
    fn execute(&self) -> Result<()> {
        let config = load_config(self.config.as_deref(), self.origin.as_deref())?;
        let listing = read_geometry(self.geometry.as_ref())?;
        let pieces =
            parse_query_output(&listing, &config).context("Failed to parse geometry listing")?;

        let layout = arrange(pieces).context("Failed to infer puzzle grid")?;

        println!("Puzzle Grid");
        println!("===========");
        println!("  Size: {} x {} ({} pieces)", layout.width, layout.height, layout.len());

        let n = layout.len();
        println!(
            "  Payload capacity: {} to {} encoded bytes",
            n * MIN_CHUNK,
            n * MAX_CHUNK
        );

        println!();
        println!("  {:>4} {:>4}  {:<20} {:>10} {:>10}", "row", "col", "id", "x", "y");
        for piece in &layout.pieces {
            println!(
                "  {:>4} {:>4}  {:<20} {:>10.2} {:>10.2}",
                piece.row.unwrap_or_default(),
                piece.column.unwrap_or_default(),
                piece.id,
                piece.x,
                piece.y
            );
        }

        Ok(())
    }
}
