//! Result manifest.
//!
//! The manifest records, per piece, where it sits in the grid and which
//! chunk it carries. It is written as JSON next to the rendered pieces and
//! is all the decoder needs to put the payload back together.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decoder::Fragment;
use crate::encoder::PuzzlePlan;

/// Current manifest format version.
pub const MANIFEST_VERSION: u8 = 1;

/// Errors that can occur when building, reading or writing a manifest.
#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("Piece '{0}' has not been placed in the grid")]
    Unplaced(String),

    #[error("Piece '{0}' carries a chunk that is not valid UTF-8")]
    NonTextChunk(String),

    #[error("Unsupported manifest version {0}")]
    UnsupportedVersion(u8),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// One piece in the manifest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// Object id of the piece in the source image.
    pub id: String,
    /// Left edge of the piece's bounding box in the source image.
    #[serde(default)]
    pub x: f64,
    /// Top edge of the bounding box.
    #[serde(default)]
    pub y: f64,
    /// Bounding box width.
    #[serde(default)]
    pub w: f64,
    /// Bounding box height.
    #[serde(default)]
    pub h: f64,
    /// Grid row.
    pub row: usize,
    /// Grid column.
    pub column: usize,
    /// The chunk embedded in this piece.
    pub data: String,
}

/// The persisted description of a generated puzzle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    /// Manifest format version.
    pub version: u8,
    /// Number of columns.
    pub width: usize,
    /// Number of rows.
    pub height: usize,
    /// One entry per piece, row-major.
    pub pieces: Vec<ManifestEntry>,
}

impl Manifest {
    /// Builds a manifest from a finished plan.
    ///
    /// Pieces without a chunk are recorded with empty data.
    pub fn from_plan(plan: &PuzzlePlan) -> Result<Self, ManifestError> {
        let pieces = plan
            .pieces
            .iter()
            .map(|piece| {
                let (row, column) = piece
                    .position()
                    .ok_or_else(|| ManifestError::Unplaced(piece.id.clone()))?;
                let data = match &piece.chunk {
                    Some(chunk) => String::from_utf8(chunk.clone())
                        .map_err(|_| ManifestError::NonTextChunk(piece.id.clone()))?,
                    None => String::new(),
                };
                Ok(ManifestEntry {
                    id: piece.id.clone(),
                    x: piece.x,
                    y: piece.y,
                    w: piece.w,
                    h: piece.h,
                    row,
                    column,
                    data,
                })
            })
            .collect::<Result<Vec<_>, ManifestError>>()?;

        Ok(Self {
            version: MANIFEST_VERSION,
            width: plan.width,
            height: plan.height,
            pieces,
        })
    }

    /// Reads a manifest from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parses a manifest from JSON text.
    pub fn from_json(content: &str) -> Result<Self, ManifestError> {
        let manifest: Manifest = serde_json::from_str(content)?;
        if manifest.version != MANIFEST_VERSION {
            return Err(ManifestError::UnsupportedVersion(manifest.version));
        }
        Ok(manifest)
    }

    /// Writes the manifest as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<(), ManifestError> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Serializes the manifest as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, ManifestError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// The chunks as decoder input.
    pub fn fragments(&self) -> Vec<Fragment> {
        self.pieces
            .iter()
            .map(|entry| Fragment {
                row: entry.row,
                column: entry.column,
                data: entry.data.as_bytes().to_vec(),
            })
            .collect()
    }
}
