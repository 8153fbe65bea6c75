//! Payload reconstruction.
//!
//! This module reverses the planning process:
//! 1. Order the recovered fragments by `(row, column)`
//! 2. Check that every cell of the grid is present exactly once
//! 3. Concatenate the chunks
//! 4. Reverse the transport encoding
//!
//! Unlike planning, nothing here is random: a complete set of fragments
//! always decodes to the same secret.

use thiserror::Error;

use crate::manifest::Manifest;
use crate::payload::{decode_payload, PayloadError};

/// Errors that can occur during reconstruction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecoderError {
    #[error("No fragments to reassemble")]
    Empty,

    #[error("Cell ({row}, {column}) appears more than once")]
    DuplicateCell { row: usize, column: usize },

    #[error("Cell ({row}, {column}) is missing")]
    MissingCell { row: usize, column: usize },

    #[error("Cell ({row}, {column}) is outside any representable grid")]
    CellOutOfRange { row: usize, column: usize },

    #[error("Manifest says {expected_width} x {expected_height}, pieces form {width} x {height}")]
    DimensionMismatch {
        expected_width: usize,
        expected_height: usize,
        width: usize,
        height: usize,
    },

    #[error("Payload error: {0}")]
    Payload(#[from] PayloadError),
}

/// A chunk recovered from one piece, with the piece's grid position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    /// Grid row of the piece.
    pub row: usize,
    /// Grid column of the piece.
    pub column: usize,
    /// The chunk extracted from the piece.
    pub data: Vec<u8>,
}

/// Result of reconstruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedPuzzle {
    /// Number of columns.
    pub width: usize,
    /// Number of rows.
    pub height: usize,
    /// The concatenated chunks, still transport-encoded.
    pub encoded: Vec<u8>,
    /// The recovered secret.
    pub secret: Vec<u8>,
}

/// Configuration for the decoder.
#[derive(Debug, Clone, Default)]
pub struct DecoderConfig {
    /// The payload was distributed verbatim; skip the transport decoding.
    pub raw: bool,
}

/// Orders fragments row-major and concatenates their chunks.
///
/// Fails if any cell of the grid spanned by the fragments is missing or
/// present twice.
pub fn reassemble(fragments: Vec<Fragment>) -> Result<Vec<u8>, DecoderError> {
    assemble(fragments).map(|(_, _, payload)| payload)
}

/// Reassembles fragments and decodes the secret.
pub fn decode_fragments(fragments: Vec<Fragment>) -> Result<DecodedPuzzle, DecoderError> {
    decode_fragments_with_config(fragments, &DecoderConfig::default())
}

/// Reassembles fragments and decodes the secret with custom configuration.
pub fn decode_fragments_with_config(
    fragments: Vec<Fragment>,
    config: &DecoderConfig,
) -> Result<DecodedPuzzle, DecoderError> {
    let (width, height, encoded) = assemble(fragments)?;
    log::debug!(
        "Reassembled {} bytes from a {} x {} grid",
        encoded.len(),
        width,
        height
    );

    let secret = if config.raw {
        encoded.clone()
    } else {
        decode_payload(&encoded)?
    };

    Ok(DecodedPuzzle {
        width,
        height,
        encoded,
        secret,
    })
}

/// Decodes the secret recorded in a manifest.
pub fn decode_manifest(manifest: &Manifest) -> Result<DecodedPuzzle, DecoderError> {
    decode_manifest_with_config(manifest, &DecoderConfig::default())
}

/// Decodes the secret recorded in a manifest with custom configuration.
///
/// The grid formed by the entries must match the manifest's stated size.
pub fn decode_manifest_with_config(
    manifest: &Manifest,
    config: &DecoderConfig,
) -> Result<DecodedPuzzle, DecoderError> {
    let decoded = decode_fragments_with_config(manifest.fragments(), config)?;

    if decoded.width != manifest.width || decoded.height != manifest.height {
        return Err(DecoderError::DimensionMismatch {
            expected_width: manifest.width,
            expected_height: manifest.height,
            width: decoded.width,
            height: decoded.height,
        });
    }

    Ok(decoded)
}

/// Returns `(width, height, payload)`.
fn assemble(mut fragments: Vec<Fragment>) -> Result<(usize, usize, Vec<u8>), DecoderError> {
    if fragments.is_empty() {
        return Err(DecoderError::Empty);
    }

    fragments.sort_by_key(|f| (f.row, f.column));

    if let Some(pair) = fragments
        .windows(2)
        .find(|w| (w[0].row, w[0].column) == (w[1].row, w[1].column))
    {
        return Err(DecoderError::DuplicateCell {
            row: pair[0].row,
            column: pair[0].column,
        });
    }

    if let Some(f) = fragments
        .iter()
        .find(|f| f.row == usize::MAX || f.column == usize::MAX)
    {
        return Err(DecoderError::CellOutOfRange {
            row: f.row,
            column: f.column,
        });
    }

    let height = fragments.iter().map(|f| f.row).max().unwrap_or(0) + 1;
    let width = fragments.iter().map(|f| f.column).max().unwrap_or(0) + 1;

    // Sorted and free of duplicates, so the first fragment out of step with
    // the expected row-major walk marks the gap.
    for (idx, fragment) in fragments.iter().enumerate() {
        let expected = (idx / width, idx % width);
        if (fragment.row, fragment.column) != expected {
            return Err(DecoderError::MissingCell {
                row: expected.0,
                column: expected.1,
            });
        }
    }
    if fragments.len() < width * height {
        let idx = fragments.len();
        return Err(DecoderError::MissingCell {
            row: idx / width,
            column: idx % width,
        });
    }

    let payload = fragments.into_iter().flat_map(|f| f.data).collect();
    Ok((width, height, payload))
}
