//! Transport encoding for the secret.
//!
//! The secret is base64-encoded before distribution. That is not protection,
//! it only makes the payload printable and inflates it by a third, which
//! widens the range of piece counts it fits.
//!
//! A payload of `L` bytes fits `N` pieces when `2N <= L <= 3N`.

use std::ops::RangeInclusive;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use thiserror::Error;

use crate::puzzle::{MAX_CHUNK, MIN_CHUNK};

/// Errors from the transport encoding or the capacity check.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PayloadError {
    #[error("Encoded payload is {len} bytes, {pieces} pieces need at least {min}")]
    TooShort { len: usize, pieces: usize, min: usize },

    #[error("Encoded payload is {len} bytes, {pieces} pieces hold at most {max}")]
    TooLong { len: usize, pieces: usize, max: usize },

    #[error("Invalid payload encoding: {0}")]
    InvalidEncoding(String),
}

/// Encodes the secret for distribution.
pub fn encode_payload(secret: &[u8]) -> Vec<u8> {
    BASE64.encode(secret).into_bytes()
}

/// Reverses [`encode_payload`].
pub fn decode_payload(encoded: &[u8]) -> Result<Vec<u8>, PayloadError> {
    BASE64
        .decode(encoded)
        .map_err(|e| PayloadError::InvalidEncoding(e.to_string()))
}

/// Length of the encoded form of a `secret_len`-byte secret.
pub fn encoded_len(secret_len: usize) -> usize {
    secret_len.div_ceil(3) * 4
}

/// Checks that an encoded payload fits `piece_count` pieces.
pub fn check_capacity(encoded_len: usize, piece_count: usize) -> Result<(), PayloadError> {
    let min = piece_count.checked_mul(MIN_CHUNK).unwrap_or(usize::MAX);
    let max = piece_count.checked_mul(MAX_CHUNK).unwrap_or(usize::MAX);

    if encoded_len < min {
        return Err(PayloadError::TooShort {
            len: encoded_len,
            pieces: piece_count,
            min,
        });
    }
    if encoded_len > max {
        return Err(PayloadError::TooLong {
            len: encoded_len,
            pieces: piece_count,
            max,
        });
    }
    Ok(())
}

/// Piece counts an encoded payload of `encoded_len` bytes fits.
///
/// The range is empty when no piece count works (e.g. 1 byte).
pub fn feasible_piece_counts(encoded_len: usize) -> RangeInclusive<usize> {
    encoded_len.div_ceil(MAX_CHUNK)..=encoded_len / MIN_CHUNK
}
