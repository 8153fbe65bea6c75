//! Piece geometry from an SVG editor's object listing.
//!
//! The listing has one object per line as `id,x,y,w,h`, e.g. the output of
//! `inkscape --query-all drawing.svg`:
//!
//! ```text
//! svg8,0,0,400,300
//! path1021,0,0,108.5,96.2
//! path1023,91.5,0,117,101.4
//! ```
//!
//! The object for the whole document is included in the listing and must
//! be skipped; it is recognised by a marker in its id.

use std::collections::HashSet;

use thiserror::Error;

use super::Piece;
use crate::config::{Origin, PuzzleConfig};

/// Errors that can occur while reading geometry.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("Line {line}: {reason}")]
    MalformedLine { line: usize, reason: String },

    #[error("Duplicate piece id '{0}'")]
    DuplicateId(String),
}

/// Parses an object listing into unsorted pieces.
pub fn parse_query_output(text: &str, config: &PuzzleConfig) -> Result<Vec<Piece>, GeometryError> {
    let mut pieces = Vec::new();
    let mut seen = HashSet::new();

    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        let mut piece = parse_line(line, idx + 1)?;

        if !config.root_marker.is_empty() && piece.id.contains(&config.root_marker) {
            log::debug!("Skipping document object '{}'", piece.id);
            continue;
        }

        if !seen.insert(piece.id.clone()) {
            return Err(GeometryError::DuplicateId(piece.id));
        }

        if config.origin == Origin::BottomLeft {
            piece.y = -(piece.y + piece.h);
        }

        pieces.push(piece);
    }

    log::debug!("Read {} pieces from geometry listing", pieces.len());
    Ok(pieces)
}

fn parse_line(line: &str, line_no: usize) -> Result<Piece, GeometryError> {
    let malformed = |reason: String| GeometryError::MalformedLine {
        line: line_no,
        reason,
    };

    let parts: Vec<&str> = line.split(',').map(str::trim).collect();
    if parts.len() != 5 {
        return Err(malformed(format!(
            "expected 5 fields (id,x,y,w,h), found {}",
            parts.len()
        )));
    }

    let id = parts[0];
    if id.is_empty() {
        return Err(malformed("empty id".to_string()));
    }

    let mut numbers = [0f64; 4];
    for (slot, (name, field)) in numbers
        .iter_mut()
        .zip(["x", "y", "w", "h"].iter().zip(&parts[1..]))
    {
        *slot = field
            .parse()
            .map_err(|_| malformed(format!("{} is not a number: '{}'", name, field)))?;
    }

    let [x, y, w, h] = numbers;
    Ok(Piece::new(id, x, y, w, h))
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = "svg8,0,0,400,300\n\
                           path1,0,0,100,100\n\
                           \n\
                           path2,100,0,100,100\n\
                           path3,0,100,100,100\n\
                           path4,100,100,100,100\n";

    #[test]
    fn test_parse_skips_document_and_blank_lines() {
        let pieces = parse_query_output(LISTING, &PuzzleConfig::default()).unwrap();
        let ids: Vec<&str> = pieces.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["path1", "path2", "path3", "path4"]);
        assert_eq!(pieces[1].x, 100.0);
        assert_eq!(pieces[3].h, 100.0);
        assert!(pieces.iter().all(|p| p.row.is_none()));
    }

    #[test]
    fn test_parse_decimals_and_spaces() {
        let pieces =
            parse_query_output("g12, 1.5, -2.25, 3e1, 40\n", &PuzzleConfig::default()).unwrap();
        assert_eq!(pieces[0], Piece::new("g12", 1.5, -2.25, 30.0, 40.0));
    }

    #[test]
    fn test_wrong_field_count() {
        let err = parse_query_output("path1,0,0,1,1\npath2,0,0,1\n", &PuzzleConfig::default())
            .unwrap_err();
        assert!(matches!(err, GeometryError::MalformedLine { line: 2, .. }));
    }

    #[test]
    fn test_bad_number() {
        let err = parse_query_output("path1,0,zero,1,1\n", &PuzzleConfig::default()).unwrap_err();
        assert_eq!(
            err,
            GeometryError::MalformedLine {
                line: 1,
                reason: "y is not a number: 'zero'".to_string()
            }
        );
    }

    #[test]
    fn test_empty_id() {
        let err = parse_query_output(",0,0,1,1\n", &PuzzleConfig::default()).unwrap_err();
        assert!(matches!(err, GeometryError::MalformedLine { line: 1, .. }));
    }

    #[test]
    fn test_duplicate_id() {
        let err = parse_query_output("p,0,0,1,1\np,1,0,1,1\n", &PuzzleConfig::default())
            .unwrap_err();
        assert_eq!(err, GeometryError::DuplicateId("p".to_string()));
    }

    #[test]
    fn test_custom_root_marker() {
        let config = PuzzleConfig {
            root_marker: "page".to_string(),
            ..Default::default()
        };
        let pieces = parse_query_output("page1,0,0,9,9\nsvgpath,0,0,1,1\n", &config).unwrap();
        assert_eq!(pieces.len(), 1);
        assert_eq!(pieces[0].id, "svgpath");
    }

    #[test]
    fn test_bottom_left_origin_flips_rows() {
        let config = PuzzleConfig {
            origin: Origin::BottomLeft,
            ..Default::default()
        };
        // y-up: the piece with y = 100 is the upper one.
        let pieces = parse_query_output("low,0,0,100,100\nhigh,0,100,100,100\n", &config).unwrap();

        let high = pieces.iter().find(|p| p.id == "high").unwrap();
        let low = pieces.iter().find(|p| p.id == "low").unwrap();
        assert!(high.y < low.y);
        assert_eq!(high.y, -200.0);
    }
}
