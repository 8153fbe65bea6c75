//! # Puzzlehide - Hide a secret in a jigsaw puzzle
//!
//! Puzzlehide spreads a secret over the pieces of an image-based jigsaw
//! puzzle. Each piece carries a 2 or 3 byte chunk; only someone who puts
//! the puzzle together in the right order can read the secret back.
//!
//! ## Overview
//!
//! - Piece geometry comes from the SVG the puzzle is cut from
//! - Row/column order is **inferred** from the bounding boxes alone
//! - The secret is base64-encoded, then split into **2 and 3 byte chunks**
//! - Which pieces get 3 bytes is **random**, so piece order leaks nothing
//! - The result is a **manifest** mapping every piece to its grid cell and chunk
//!
//! Rendering pieces and embedding chunks into image metadata is left to
//! external tools; this crate produces the plan they work from and reads
//! the payload back from a manifest or from recovered fragments.
//!
//! ## Example Usage
//!
//! ```rust
//! use puzzlehide::{decode_manifest, plan_puzzle, seeded_rng, Manifest, Piece};
//!
//! let pieces = vec![
//!     Piece::new("path1", 0.0, 0.0, 50.0, 50.0),
//!     Piece::new("path2", 50.0, 0.0, 50.0, 50.0),
//!     Piece::new("path3", 0.0, 50.0, 50.0, 50.0),
//!     Piece::new("path4", 50.0, 50.0, 50.0, 50.0),
//! ];
//!
//! // "secret" encodes to 8 bytes: two per piece
//! let plan = plan_puzzle(pieces, b"secret", &mut seeded_rng(None)).unwrap();
//! let manifest = Manifest::from_plan(&plan).unwrap();
//!
//! let decoded = decode_manifest(&manifest).unwrap();
//! assert_eq!(decoded.secret, b"secret");
//! ```
//!
//! ## Modules
//!
//! - [`puzzle`]: Piece geometry, grid inference, chunk distribution
//! - [`payload`]: Transport encoding and capacity checks
//! - [`encoder`]: Puzzle planning
//! - [`decoder`]: Payload reconstruction
//! - [`manifest`]: The persisted result
//! - [`config`]: Settings file

pub mod config;
pub mod decoder;
pub mod encoder;
pub mod manifest;
pub mod payload;
pub mod puzzle;

// Re-export commonly used types at the crate root
pub use config::{ConfigError, Origin, PuzzleConfig};
pub use decoder::{
    decode_fragments, decode_fragments_with_config, decode_manifest, decode_manifest_with_config,
    reassemble, DecodedPuzzle, DecoderConfig, DecoderError, Fragment,
};
pub use encoder::{
    plan_puzzle, plan_puzzle_with_config, seeded_rng, EncoderConfig, EncoderError, PuzzlePlan,
};
pub use manifest::{Manifest, ManifestEntry, ManifestError, MANIFEST_VERSION};
pub use payload::{
    check_capacity, decode_payload, encode_payload, encoded_len, feasible_piece_counts,
    PayloadError,
};
pub use puzzle::{
    arrange, distribute, parse_query_output, sort_pieces, DistributeError, GeometryError,
    GridError, GridLayout, Piece,
};
