//! Puzzle geometry and payload distribution.
//!
//! This module contains the two algorithms everything else is built on:
//! - [`grid`]: recovering row/column order from unordered piece geometry
//! - [`distribute`]: splitting an encoded payload into 2 and 3 byte chunks
//!
//! plus [`geometry`], which turns an SVG editor's object listing into pieces.

pub mod distribute;
pub mod geometry;
pub mod grid;

use serde::{Deserialize, Serialize};

pub use distribute::{chunk_sizes, distribute, DistributeError, MAX_CHUNK, MIN_CHUNK};
pub use geometry::{parse_query_output, GeometryError};
pub use grid::{arrange, sort_pieces, GridError, GridLayout};

/// One physical jigsaw piece.
///
/// Pieces start out with geometry only. The grid sorter fills in `row` and
/// `column`, the encoder fills in `chunk`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Piece {
    /// Object id from the source image, unique within a puzzle.
    pub id: String,
    /// Bounding box left edge.
    pub x: f64,
    /// Bounding box top edge (y grows downward).
    pub y: f64,
    /// Bounding box width.
    pub w: f64,
    /// Bounding box height.
    pub h: f64,
    /// Grid row, counted from the top.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row: Option<usize>,
    /// Grid column, counted from the left.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<usize>,
    /// Payload bytes carried by this piece.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chunk: Option<Vec<u8>>,
}

impl Piece {
    /// Creates an unsorted piece with no chunk.
    pub fn new(id: impl Into<String>, x: f64, y: f64, w: f64, h: f64) -> Self {
        Self {
            id: id.into(),
            x,
            y,
            w,
            h,
            row: None,
            column: None,
            chunk: None,
        }
    }

    /// Returns `(row, column)` once the piece has been sorted.
    pub fn position(&self) -> Option<(usize, usize)> {
        Some((self.row?, self.column?))
    }
}
