//! Payload distribution over puzzle pieces.
//!
//! Every piece carries a 2-byte baseline and `len - 2 * pieces` of them carry
//! one extra byte. Which pieces get the extra byte is a random permutation,
//! so piece order says nothing about where the payload's boundaries are.
//!
//! The random source is passed in. Production code hands in an
//! entropy-seeded [`rand_chacha::ChaCha20Rng`], tests a fixed seed.

use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;

/// Smallest chunk a piece carries.
pub const MIN_CHUNK: usize = 2;

/// Largest chunk a piece carries.
pub const MAX_CHUNK: usize = 3;

/// Errors that can occur during distribution.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DistributeError {
    #[error("Payload of {len} bytes cannot be split over {pieces} pieces of 2 or 3 bytes")]
    InvalidRange { len: usize, pieces: usize },
}

/// Computes the chunk size for each piece, in piece order.
///
/// The result always has `piece_count` entries summing to `len`.
pub fn chunk_sizes<R: Rng + ?Sized>(
    len: usize,
    piece_count: usize,
    rng: &mut R,
) -> Result<Vec<usize>, DistributeError> {
    // Saturate: no payload reaches a minimum that overflows.
    let min = piece_count.checked_mul(MIN_CHUNK).unwrap_or(usize::MAX);
    let max = piece_count.checked_mul(MAX_CHUNK).unwrap_or(usize::MAX);
    if len < min || len > max {
        return Err(DistributeError::InvalidRange {
            len,
            pieces: piece_count,
        });
    }

    let remaining = len - min;

    let mut sizes = vec![MAX_CHUNK; remaining];
    sizes.resize(piece_count, MIN_CHUNK);

    debug_assert_eq!(sizes.iter().sum::<usize>(), len);

    sizes.shuffle(rng);
    Ok(sizes)
}

/// Splits `payload` into one chunk per piece.
///
/// Chunks are consecutive slices of the payload: concatenating them in
/// order gives the payload back.
pub fn distribute<R: Rng + ?Sized>(
    payload: &[u8],
    piece_count: usize,
    rng: &mut R,
) -> Result<Vec<Vec<u8>>, DistributeError> {
    let sizes = chunk_sizes(payload.len(), piece_count, rng)?;

    let mut offset = 0;
    let mut chunks = Vec::with_capacity(piece_count);
    for size in sizes {
        chunks.push(payload[offset..offset + size].to_vec());
        offset += size;
    }

    Ok(chunks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;
    use std::collections::HashSet;

    fn rng(seed: u64) -> ChaCha20Rng {
        ChaCha20Rng::seed_from_u64(seed)
    }

    #[test]
    fn test_ten_bytes_four_pieces() {
        let payload = b"ABCDEFGHIJ";
        let chunks = distribute(payload, 4, &mut rng(42)).unwrap();

        assert_eq!(chunks.len(), 4);
        assert_eq!(chunks.iter().filter(|c| c.len() == 3).count(), 2);
        assert_eq!(chunks.iter().filter(|c| c.len() == 2).count(), 2);
        assert_eq!(chunks.concat(), payload.to_vec());
    }

    #[test]
    fn test_sizes_and_concatenation_for_all_lengths() {
        let mut r = rng(1);
        for n in 1..=24 {
            for len in 2 * n..=3 * n {
                let payload: Vec<u8> = (0..len).map(|i| i as u8).collect();
                let chunks = distribute(&payload, n, &mut r).unwrap();

                assert_eq!(chunks.len(), n);
                assert!(chunks.iter().all(|c| c.len() == 2 || c.len() == 3));
                assert_eq!(chunks.concat(), payload);
            }
        }
    }

    #[test]
    fn test_out_of_range() {
        for n in 1..=10 {
            let short = vec![0u8; 2 * n - 1];
            let long = vec![0u8; 3 * n + 1];

            assert_eq!(
                distribute(&short, n, &mut rng(0)),
                Err(DistributeError::InvalidRange { len: 2 * n - 1, pieces: n })
            );
            assert_eq!(
                distribute(&long, n, &mut rng(0)),
                Err(DistributeError::InvalidRange { len: 3 * n + 1, pieces: n })
            );
        }
    }

    #[test]
    fn test_extremes() {
        let all_two = distribute(&[7u8; 16], 8, &mut rng(3)).unwrap();
        assert!(all_two.iter().all(|c| c.len() == 2));

        let all_three = distribute(&[7u8; 24], 8, &mut rng(3)).unwrap();
        assert!(all_three.iter().all(|c| c.len() == 3));
    }

    #[test]
    fn test_zero_pieces() {
        assert_eq!(distribute(&[], 0, &mut rng(0)).unwrap(), Vec::<Vec<u8>>::new());
        assert_eq!(
            distribute(b"A", 0, &mut rng(0)),
            Err(DistributeError::InvalidRange { len: 1, pieces: 0 })
        );
    }

    #[test]
    fn test_huge_piece_count() {
        for pieces in [usize::MAX, usize::MAX / 2 + 1] {
            assert_eq!(
                distribute(&[], pieces, &mut rng(0)),
                Err(DistributeError::InvalidRange { len: 0, pieces })
            );
        }
    }

    #[test]
    fn test_same_seed_same_layout() {
        let payload = b"0123456789abcdefghijklmn";
        let a = distribute(payload, 10, &mut rng(5)).unwrap();
        let b = distribute(payload, 10, &mut rng(5)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_layout_varies_across_draws() {
        // C(10, 4) = 210 possible layouts; a handful of draws must not all agree.
        let mut r = rng(11);
        let layouts: HashSet<Vec<usize>> = (0..20)
            .map(|_| chunk_sizes(24, 10, &mut r).unwrap())
            .collect();
        assert!(layouts.len() > 1);
    }

    #[test]
    fn test_every_layout_reachable() {
        // N = 4, remaining = 2: six distinct layouts.
        let mut r = rng(2024);
        let layouts: HashSet<Vec<usize>> = (0..500)
            .map(|_| chunk_sizes(10, 4, &mut r).unwrap())
            .collect();
        assert_eq!(layouts.len(), 6);
    }

    #[test]
    fn test_error_message() {
        let err = distribute(b"ABC", 2, &mut rng(0)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Payload of 3 bytes cannot be split over 2 pieces of 2 or 3 bytes"
        );
    }
}
