//! Grid reconstruction from piece geometry.
//!
//! Pieces arrive in no particular order; the only signal is their position.
//! The width of the puzzle is the number of pieces sharing the topmost edge,
//! rows are bands of that many pieces taken in order of increasing y, and
//! each band is then ordered left to right.
//!
//! Rows must not overlap vertically. That is a precondition of the geometry,
//! it is not validated here.

use std::cmp::Ordering;

use thiserror::Error;

use super::Piece;

/// Errors that can occur while inferring the grid.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GridError {
    #[error("No pieces to sort")]
    EmptyInput,

    #[error("Piece '{id}' has a non-finite coordinate")]
    NonFiniteCoordinate { id: String },

    #[error("{pieces} pieces cannot form a grid {width} pieces wide")]
    InconsistentGrid { pieces: usize, width: usize },
}

/// Pieces in row-major order together with the inferred dimensions.
#[derive(Debug, Clone, PartialEq)]
pub struct GridLayout {
    /// Number of columns.
    pub width: usize,
    /// Number of rows.
    pub height: usize,
    /// Every input piece, row-major, with `row` and `column` set.
    pub pieces: Vec<Piece>,
}

impl GridLayout {
    /// Total number of pieces in the grid.
    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    /// Returns true if the layout holds no pieces.
    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// Returns the piece at `(row, column)`.
    pub fn get(&self, row: usize, column: usize) -> Option<&Piece> {
        if row >= self.height || column >= self.width {
            return None;
        }
        self.pieces.get(row * self.width + column)
    }
}

/// Sorts pieces into row-major order and annotates each with its row and column.
pub fn sort_pieces(pieces: Vec<Piece>) -> Result<Vec<Piece>, GridError> {
    arrange(pieces).map(|layout| layout.pieces)
}

/// Infers the grid dimensions and sorts pieces into row-major order.
///
/// Either every piece is placed or an error is returned; there are no
/// partial results.
pub fn arrange(mut pieces: Vec<Piece>) -> Result<GridLayout, GridError> {
    if let Some(bad) = pieces
        .iter()
        .find(|p| !(p.x.is_finite() && p.y.is_finite()))
    {
        return Err(GridError::NonFiniteCoordinate { id: bad.id.clone() });
    }

    let min_y = pieces
        .iter()
        .map(|p| p.y)
        .min_by(f64::total_cmp)
        .ok_or(GridError::EmptyInput)?;

    // Exact comparison on purpose: the top row is the set of pieces whose
    // bounding boxes start on the very same edge.
    let width = pieces.iter().filter(|p| p.y == min_y).count();
    let count = pieces.len();

    if count % width != 0 {
        return Err(GridError::InconsistentGrid {
            pieces: count,
            width,
        });
    }
    let height = count / width;

    log::debug!("Puzzle pieces: {} x {}", width, height);

    pieces.sort_by(|a, b| by_key(a.y, b.y, a, b));

    let mut ordered = Vec::with_capacity(count);
    let mut remaining = pieces.into_iter();

    for row in 0..height {
        let mut band: Vec<Piece> = remaining.by_ref().take(width).collect();
        band.sort_by(|a, b| by_key(a.x, b.x, a, b));

        for (column, mut piece) in band.into_iter().enumerate() {
            piece.row = Some(row);
            piece.column = Some(column);
            ordered.push(piece);
        }
    }

    Ok(GridLayout {
        width,
        height,
        pieces: ordered,
    })
}

/// Coordinate order with the id as tie-break, so equal coordinates still
/// sort reproducibly.
fn by_key(ka: f64, kb: f64, a: &Piece, b: &Piece) -> Ordering {
    ka.total_cmp(&kb).then_with(|| a.id.cmp(&b.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::seq::SliceRandom;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn piece(id: &str, x: f64, y: f64) -> Piece {
        Piece::new(id, x, y, 10.0, 10.0)
    }

    /// Builds a `width x height` grid with 10-unit cells, shuffled.
    fn shuffled_grid(width: usize, height: usize, seed: u64) -> Vec<Piece> {
        let mut pieces: Vec<Piece> = (0..height)
            .flat_map(|r| {
                (0..width).map(move |c| {
                    piece(&format!("p{}_{}", r, c), c as f64 * 10.0, r as f64 * 10.0)
                })
            })
            .collect();
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        pieces.shuffle(&mut rng);
        pieces
    }

    #[test]
    fn test_two_by_two() {
        let pieces = vec![
            piece("d", 10.0, 10.0),
            piece("a", 0.0, 0.0),
            piece("c", 0.0, 10.0),
            piece("b", 10.0, 0.0),
        ];

        let sorted = sort_pieces(pieces).unwrap();
        let got: Vec<(f64, f64, usize, usize)> = sorted
            .iter()
            .map(|p| (p.x, p.y, p.row.unwrap(), p.column.unwrap()))
            .collect();

        assert_eq!(
            got,
            vec![
                (0.0, 0.0, 0, 0),
                (10.0, 0.0, 0, 1),
                (0.0, 10.0, 1, 0),
                (10.0, 10.0, 1, 1),
            ]
        );
    }

    #[test]
    fn test_every_cell_used_once() {
        let layout = arrange(shuffled_grid(4, 3, 7)).unwrap();
        assert_eq!(layout.width, 4);
        assert_eq!(layout.height, 3);
        assert_eq!(layout.len(), 12);

        let mut seen = vec![vec![false; 4]; 3];
        for p in &layout.pieces {
            let (r, c) = p.position().unwrap();
            assert!(!seen[r][c], "cell ({}, {}) used twice", r, c);
            seen[r][c] = true;
        }
        assert!(seen.iter().flatten().all(|&s| s));
    }

    #[test]
    fn test_row_major_ordering() {
        let layout = arrange(shuffled_grid(5, 4, 99)).unwrap();

        for row in layout.pieces.chunks(layout.width) {
            assert!(row.windows(2).all(|w| w[0].x <= w[1].x));
        }
        for pair in layout.pieces.chunks(layout.width).collect::<Vec<_>>().windows(2) {
            let max_upper = pair[0].iter().map(|p| p.y).fold(f64::MIN, f64::max);
            let min_lower = pair[1].iter().map(|p| p.y).fold(f64::MAX, f64::min);
            assert!(max_upper <= min_lower);
        }
    }

    #[test]
    fn test_jittered_rows() {
        // Jigsaw tabs make lower rows start at slightly different heights.
        let pieces = vec![
            piece("a", 0.0, 0.0),
            piece("b", 12.0, 0.0),
            piece("c", 24.0, 0.0),
            piece("d", 0.5, 11.0),
            piece("e", 11.5, 9.5),
            piece("f", 23.0, 10.2),
        ];

        let layout = arrange(pieces).unwrap();
        assert_eq!((layout.width, layout.height), (3, 2));

        let ids: Vec<&str> = layout.pieces.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c", "d", "e", "f"]);
        assert_eq!(layout.get(1, 1).unwrap().id, "e");
    }

    #[test]
    fn test_single_row() {
        let pieces = vec![piece("b", 20.0, 0.0), piece("a", 5.0, 0.0)];
        let layout = arrange(pieces).unwrap();
        assert_eq!((layout.width, layout.height), (2, 1));
        assert_eq!(layout.pieces[0].id, "a");
    }

    #[test]
    fn test_single_column() {
        let pieces = vec![piece("c", 0.0, 20.0), piece("a", 0.0, 0.0), piece("b", 0.0, 10.0)];
        let layout = arrange(pieces).unwrap();
        assert_eq!((layout.width, layout.height), (1, 3));

        let rows: Vec<usize> = layout.pieces.iter().map(|p| p.row.unwrap()).collect();
        assert_eq!(rows, vec![0, 1, 2]);
    }

    #[test]
    fn test_inconsistent_grid() {
        let pieces = vec![
            piece("a", 0.0, 0.0),
            piece("b", 10.0, 0.0),
            piece("c", 0.0, 10.0),
            piece("d", 10.0, 10.0),
            piece("e", 0.0, 20.0),
        ];

        assert_eq!(
            sort_pieces(pieces),
            Err(GridError::InconsistentGrid {
                pieces: 5,
                width: 2
            })
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(sort_pieces(vec![]), Err(GridError::EmptyInput));
    }

    #[test]
    fn test_nan_coordinate_rejected() {
        let pieces = vec![piece("a", 0.0, 0.0), piece("b", f64::NAN, 0.0)];
        assert_eq!(
            sort_pieces(pieces),
            Err(GridError::NonFiniteCoordinate { id: "b".to_string() })
        );
    }

    #[test]
    fn test_ties_broken_by_id() {
        // Two pieces at the same spot must still come out in a fixed order.
        let a = vec![piece("y", 0.0, 0.0), piece("x", 0.0, 0.0)];
        let b = vec![piece("x", 0.0, 0.0), piece("y", 0.0, 0.0)];

        let sa = sort_pieces(a).unwrap();
        let sb = sort_pieces(b).unwrap();
        assert_eq!(sa, sb);
        assert_eq!(sa[0].id, "x");
    }

    #[test]
    fn test_shuffled_input_gives_same_result() {
        let first = arrange(shuffled_grid(6, 5, 1)).unwrap();
        let second = arrange(shuffled_grid(6, 5, 2)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_get_out_of_bounds() {
        let layout = arrange(shuffled_grid(2, 2, 3)).unwrap();
        assert!(layout.get(0, 2).is_none());
        assert!(layout.get(2, 0).is_none());
        assert_eq!(layout.get(1, 0).unwrap().id, "p1_0");
    }
}
