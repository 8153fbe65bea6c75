//! Puzzle planning.
//!
//! This module orchestrates the encoding process:
//! 1. Recover row/column order of the pieces from their geometry
//! 2. Encode the secret into its transport form
//! 3. Check that the encoded payload fits the piece count
//! 4. Split the payload into 2 and 3 byte chunks (random layout)
//! 5. Attach chunk `i` to piece `i` in row-major order
//!
//! Rendering the pieces and embedding the chunks into them happens outside
//! this crate; the plan is what those tools consume.

use hkdf::Hkdf;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use sha2::Sha256;
use thiserror::Error;

use crate::payload::{check_capacity, encode_payload, PayloadError};
use crate::puzzle::{arrange, distribute, DistributeError, GridError, Piece};

/// HKDF salt for layout seed derivation.
const SALT_LAYOUT: &[u8] = b"PUZZLEHIDE-LAYOUT-V1";

/// Errors that can occur during planning.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EncoderError {
    #[error("Grid error: {0}")]
    Grid(#[from] GridError),

    #[error("Payload error: {0}")]
    Payload(#[from] PayloadError),

    #[error("Distribution error: {0}")]
    Distribute(#[from] DistributeError),
}

/// A fully planned puzzle: every piece placed and carrying its chunk.
#[derive(Debug, Clone, PartialEq)]
pub struct PuzzlePlan {
    /// Number of columns.
    pub width: usize,
    /// Number of rows.
    pub height: usize,
    /// Pieces in row-major order with `row`, `column` and `chunk` set.
    pub pieces: Vec<Piece>,
}

impl PuzzlePlan {
    /// Returns the encoded payload by concatenating chunks in piece order.
    pub fn payload(&self) -> Vec<u8> {
        self.pieces
            .iter()
            .filter_map(|p| p.chunk.as_deref())
            .flatten()
            .copied()
            .collect()
    }

    /// Number of pieces carrying a 3-byte chunk.
    pub fn long_chunks(&self) -> usize {
        self.pieces
            .iter()
            .filter(|p| p.chunk.as_ref().is_some_and(|c| c.len() == 3))
            .count()
    }
}

/// Configuration for the encoder.
#[derive(Debug, Clone, Default)]
pub struct EncoderConfig {
    /// Use the secret as the payload verbatim instead of base64-encoding it.
    /// The caller is then responsible for its length.
    pub raw: bool,
}

/// Plans a puzzle with the default configuration.
///
/// # Arguments
/// * `pieces` - Unordered pieces from the geometry source
/// * `secret` - The bytes to hide
/// * `rng` - Random source for the chunk layout
pub fn plan_puzzle<R: Rng + ?Sized>(
    pieces: Vec<Piece>,
    secret: &[u8],
    rng: &mut R,
) -> Result<PuzzlePlan, EncoderError> {
    plan_puzzle_with_config(pieces, secret, rng, &EncoderConfig::default())
}

/// Plans a puzzle with custom configuration.
pub fn plan_puzzle_with_config<R: Rng + ?Sized>(
    pieces: Vec<Piece>,
    secret: &[u8],
    rng: &mut R,
    config: &EncoderConfig,
) -> Result<PuzzlePlan, EncoderError> {
    let layout = arrange(pieces)?;
    log::info!(
        "Puzzle is {} x {} ({} pieces)",
        layout.width,
        layout.height,
        layout.len()
    );

    let payload = if config.raw {
        secret.to_vec()
    } else {
        encode_payload(secret)
    };
    log::debug!(
        "Secret of {} bytes encodes to {} bytes",
        secret.len(),
        payload.len()
    );

    check_capacity(payload.len(), layout.len())?;

    let chunks = distribute(&payload, layout.len(), rng)?;

    let mut pieces = layout.pieces;
    for (piece, chunk) in pieces.iter_mut().zip(chunks) {
        log::debug!(
            "Piece {} at ({}, {}) carries {} bytes",
            piece.id,
            piece.row.unwrap_or_default(),
            piece.column.unwrap_or_default(),
            chunk.len()
        );
        piece.chunk = Some(chunk);
    }

    Ok(PuzzlePlan {
        width: layout.width,
        height: layout.height,
        pieces,
    })
}

/// Builds the random source for the chunk layout.
///
/// With a seed the layout is reproducible: the 32-byte ChaCha seed is
/// derived from it with HKDF-SHA256. Without one the generator is seeded
/// from OS entropy.
pub fn seeded_rng(seed: Option<&str>) -> ChaCha20Rng {
    match seed {
        Some(s) => ChaCha20Rng::from_seed(derive_seed(s.as_bytes())),
        None => ChaCha20Rng::from_entropy(),
    }
}

/// Derives a 32-byte seed using HKDF-SHA256.
fn derive_seed(input: &[u8]) -> [u8; 32] {
    let hk = Hkdf::<Sha256>::new(Some(SALT_LAYOUT), input);
    let mut output = [0u8; 32];
    hk.expand(b"seed", &mut output)
        .expect("HKDF expand should not fail");
    output
}
