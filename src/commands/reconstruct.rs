//! Reconstruct command - read the secret back from a manifest.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use puzzlehide::{decode_manifest_with_config, DecoderConfig, Manifest};

use super::CommandExecutor;

/// Reassemble the secret from a puzzle manifest.
///
/// Use -o/--output to write raw bytes to a file (required for binary data).
/// Without -o, output is printed as text (lossy UTF-8 conversion).
#[derive(Args, Debug)]
pub struct ReconstructCommand {
    /// Manifest produced by `plan`
    #[arg(short, long)]
    pub manifest: PathBuf,

    /// Output file for the recovered secret
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// The secret was distributed verbatim (planned with --raw)
    #[arg(long)]
    pub raw: bool,
}

impl CommandExecutor for ReconstructCommand {
    fn execute(&self) -> Result<()> {
        let manifest = Manifest::load(&self.manifest)
            .with_context(|| format!("Failed to read manifest from {}", self.manifest.display()))?;
        log::info!(
            "Manifest describes a {} x {} puzzle",
            manifest.width,
            manifest.height
        );

        let config = DecoderConfig { raw: self.raw };
        let decoded =
            decode_manifest_with_config(&manifest, &config).context("Failed to reconstruct secret")?;

        if let Some(output_path) = &self.output {
            std::fs::write(output_path, &decoded.secret)
                .with_context(|| format!("Failed to write to {}", output_path.display()))?;
            println!("Secret written to: {}", output_path.display());
            println!("  Size: {} bytes", decoded.secret.len());
        } else {
            println!("{}", String::from_utf8_lossy(&decoded.secret));
        }

        Ok(())
    }
}
