//! Plan command - distribute a secret over the pieces of a puzzle.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use puzzlehide::{
    parse_query_output, plan_puzzle_with_config, seeded_rng, EncoderConfig, Manifest,
};

use super::{load_config, read_geometry, CommandExecutor};

/// Plan a puzzle: sort the pieces and assign each one a chunk of the secret.
///
/// The geometry is the `id,x,y,w,h` listing of the SVG the puzzle is cut
/// from (e.g. `inkscape --query-all puzzle.svg`). The result is a JSON
/// manifest mapping every piece to its grid cell and chunk.
#[derive(Args, Debug)]
pub struct PlanCommand {
    /// Geometry listing (reads stdin if not provided)
    #[arg(short, long)]
    pub geometry: Option<PathBuf>,

    /// File containing the secret (mutually exclusive with --message)
    #[arg(short, long, conflicts_with = "message")]
    pub secret: Option<PathBuf>,

    /// Secret text (mutually exclusive with --secret)
    #[arg(short, long, conflicts_with = "secret")]
    pub message: Option<String>,

    /// Write the manifest here (prints to stdout if not specified)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Seed for a reproducible chunk layout (overrides the config file)
    #[arg(long)]
    pub seed: Option<String>,

    /// Distribute the secret verbatim instead of base64-encoding it.
    /// Its length must then already be between 2 and 3 bytes per piece.
    #[arg(long)]
    pub raw: bool,

    /// Coordinate origin of the geometry: top-left or bottom-left
    #[arg(long, value_parser = ["top-left", "bottom-left"])]
    pub origin: Option<String>,

    /// Config file (defaults to ~/.puzzlehide/config.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl CommandExecutor for PlanCommand {
    fn execute(&self) -> Result<()> {
        let config = load_config(self.config.as_deref(), self.origin.as_deref())?;

        let secret = match (&self.secret, &self.message) {
            (Some(path), _) => std::fs::read(path)
                .with_context(|| format!("Failed to read secret from {}", path.display()))?,
            (None, Some(message)) => message.as_bytes().to_vec(),
            (None, None) => anyhow::bail!("Provide either --secret or --message"),
        };

        let listing = read_geometry(self.geometry.as_ref())?;
        let pieces =
            parse_query_output(&listing, &config).context("Failed to parse geometry listing")?;
        log::info!("Loaded {} pieces", pieces.len());

        let seed = self.seed.as_deref().or(config.seed.as_deref());
        if seed.is_some() {
            log::info!("Using seeded chunk layout");
        }
        let mut rng = seeded_rng(seed);

        let encoder_config = EncoderConfig { raw: self.raw };
        let plan = plan_puzzle_with_config(pieces, &secret, &mut rng, &encoder_config)
            .context("Failed to plan puzzle")?;

        let manifest = Manifest::from_plan(&plan).context("Failed to build manifest")?;

        match &self.output {
            Some(path) => {
                manifest
                    .save(path)
                    .with_context(|| format!("Failed to write manifest to {}", path.display()))?;
                println!("Manifest written to: {}", path.display());
                println!(
                    "  Grid: {} x {} ({} pieces)",
                    plan.width,
                    plan.height,
                    plan.pieces.len()
                );
                println!(
                    "  Payload: {} bytes ({} pieces carry 3 bytes)",
                    plan.payload().len(),
                    plan.long_chunks()
                );
            }
            None => println!("{}", manifest.to_json()?),
        }

        Ok(())
    }
}
