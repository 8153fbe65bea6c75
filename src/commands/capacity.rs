//! Capacity command - which piece counts a secret fits.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use puzzlehide::{check_capacity, encoded_len, feasible_piece_counts};

use super::CommandExecutor;

/// Show which piece counts a secret of a given size fits.
#[derive(Args, Debug)]
pub struct CapacityCommand {
    /// Secret size in bytes (or provide --secret to measure a file)
    #[arg(short, long, conflicts_with = "secret")]
    pub size: Option<usize>,

    /// File containing the secret
    #[arg(long)]
    pub secret: Option<PathBuf>,

    /// Check a specific piece count
    #[arg(short, long)]
    pub pieces: Option<usize>,

    /// Measure the secret as-is, without base64 encoding
    #[arg(long)]
    pub raw: bool,
}

impl CommandExecutor for CapacityCommand {
    fn execute(&self) -> Result<()> {
        let secret_size = if let Some(s) = self.size {
            s
        } else if let Some(path) = &self.secret {
            let len = std::fs::metadata(path)
                .with_context(|| format!("Failed to read {}", path.display()))?
                .len();
            usize::try_from(len)
                .with_context(|| format!("{} is too large to measure", path.display()))?
        } else {
            anyhow::bail!("Provide either --size or --secret");
        };

        let payload_len = if self.raw {
            secret_size
        } else {
            encoded_len(secret_size)
        };
        let range = feasible_piece_counts(payload_len);

        println!("Payload Capacity Analysis");
        println!("=========================");
        println!("  Secret size: {} bytes", secret_size);
        println!("  Payload size: {} bytes", payload_len);

        if range.is_empty() {
            println!("  Status: NO piece count fits this payload");
        } else {
            println!("  Piece counts: {} to {}", range.start(), range.end());
        }

        if let Some(pieces) = self.pieces {
            println!();
            match check_capacity(payload_len, pieces) {
                Ok(()) => println!("  {} pieces: FITS", pieces),
                Err(e) => println!("  {} pieces: does not fit ({})", pieces, e),
            }
        }

        Ok(())
    }
}
