//! Combinadic rank/unrank of fixed-weight bitsets.
//!
//! A bitset of length `n` with `k` set bits is one of `C(n, k)` possible
//! k-subsets, so it can be replaced by its index among them. That index
//! (the *rank*) needs `ceil(log2(C(n, k)))` bits instead of `n`.
//!
//! # Ordering
//!
//! Subsets are compared position by position from index 0 upwards, and
//! at each position a *set* bit sorts before an unset one. For `n = 4`,
//! `k = 2` the ranks are:
//!
//! | rank | bits   |
//! |------|--------|
//! | 0    | `1100` |
//! | 1    | `1010` |
//! | 2    | `1001` |
//! | 3    | `0110` |
//! | 4    | `0101` |
//! | 5    | `0011` |
//!
//! Choosing "unset" at a position skips every subset that sets it:
//! `C(n_rem - 1, k_rem - 1)` of them. Ranks are bit-exact for this
//! ordering and must not be mixed with other combinadic conventions.
//!
//! # Contract
//!
//! The table must cover `n` (`table.max_n() >= n`), and `decode` needs
//! `k <= n`. Violations panic. Ranks must lie in `[0, C(n, k))`; larger
//! ranks do not panic but decode to an arbitrary bitset.

use num_bigint::BigUint;
use num_traits::Zero;

use crate::binomial::BinomialTable;
use crate::error::CompressionError;

#[inline]
fn choose(table: &BinomialTable, n: usize, k: usize) -> &BigUint {
    table.get(n, k).unwrap_or_else(|| {
        panic!(
            "C({}, {}) is outside the binomial table (max_n = {})",
            n,
            k,
            table.max_n()
        )
    })
}

/// Rank `bits` among all bitsets of the same length with `k` set bits.
///
/// `k` is trusted: the scan stops as soon as `k` set bits have been seen
/// (or fewer positions remain than set bits still owed), and anything
/// after that point is treated as unset. Passing the true popcount gives
/// a rank in `[0, C(bits.len(), k))`.
///
/// # Panics
///
/// If `bits.len()` exceeds `table.max_n()`, whatever the bits are. This is
/// the same bound [`decode`] enforces, so every rank `encode` returns can
/// be decoded against the same table.
pub fn encode(table: &BinomialTable, bits: &[bool], k: usize) -> BigUint {
    assert!(
        bits.len() <= table.max_n(),
        "n = {} exceeds binomial table max_n = {}",
        bits.len(),
        table.max_n()
    );

    let mut rank = BigUint::zero();
    let mut n_rem = bits.len();
    let mut k_rem = k;

    for &bit in bits {
        if k_rem == 0 || k_rem > n_rem {
            break;
        }
        if bit {
            k_rem -= 1;
        } else {
            rank += choose(table, n_rem - 1, k_rem - 1);
        }
        n_rem -= 1;
    }

    rank
}

/// Rebuild the bitset of length `n` with `k` set bits that has `rank`.
///
/// This is the exact inverse of [`encode`] for ranks below `C(n, k)`.
///
/// # Errors
///
/// [`CompressionError::AllocationFailed`] if the output buffer cannot be
/// reserved.
///
/// # Panics
///
/// If `k > n` or the table does not cover `n`.
pub fn decode(
    table: &BinomialTable,
    rank: &BigUint,
    n: usize,
    k: usize,
) -> Result<Vec<bool>, CompressionError> {
    assert!(k <= n, "cannot place {} set bits in {} positions", k, n);
    assert!(
        n <= table.max_n(),
        "n = {} exceeds binomial table max_n = {}",
        n,
        table.max_n()
    );

    let mut bits = Vec::new();
    bits.try_reserve_exact(n).map_err(|e| {
        CompressionError::AllocationFailed(format!("bitset of length {}: {}", n, e))
    })?;

    let mut rank = rank.clone();
    let mut n_rem = n;
    let mut k_rem = k;

    for _ in 0..n {
        if k_rem == 0 {
            bits.push(false);
        } else if k_rem == n_rem {
            bits.push(true);
            k_rem -= 1;
        } else {
            let threshold = choose(table, n_rem - 1, k_rem - 1);
            if rank < *threshold {
                bits.push(true);
                k_rem -= 1;
            } else {
                rank -= threshold;
                bits.push(false);
            }
        }
        n_rem -= 1;
    }

    Ok(bits)
}

/// Bits needed to store any rank for `(n, k)`: `ceil(log2(C(n, k)))`.
///
/// Returns `None` when `(n, k)` is outside the table.
pub fn rank_bits(table: &BinomialTable, n: usize, k: usize) -> Option<u64> {
    // The largest rank is C(n, k) - 1, and C(n, k) >= 1.
    table.get(n, k).map(|count| (count - 1u32).bits())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bits_from(s: &str) -> Vec<bool> {
        s.chars().map(|c| c == '1').collect()
    }

    #[test]
    fn test_concrete_scenario() {
        let table = BinomialTable::new(4).unwrap();
        let bits = vec![false, true, true, false];

        let rank = encode(&table, &bits, 2);
        assert_eq!(rank, BigUint::from(3u32));

        let decoded = decode(&table, &rank, 4, 2).unwrap();
        assert_eq!(decoded, bits);
    }

    #[test]
    fn test_documented_order() {
        let table = BinomialTable::new(4).unwrap();
        let expected = ["1100", "1010", "1001", "0110", "0101", "0011"];
        for (rank, s) in expected.iter().enumerate() {
            let rank = BigUint::from(rank);
            assert_eq!(decode(&table, &rank, 4, 2).unwrap(), bits_from(s));
            assert_eq!(encode(&table, &bits_from(s), 2), rank);
        }
    }

    #[test]
    fn test_all_zeros() {
        let table = BinomialTable::new(16).unwrap();
        for n in 0..=16 {
            let bits = vec![false; n];
            assert!(encode(&table, &bits, 0).is_zero());
            assert_eq!(decode(&table, &BigUint::zero(), n, 0).unwrap(), bits);
        }
    }

    #[test]
    fn test_all_ones() {
        let table = BinomialTable::new(16).unwrap();
        for n in 0..=16 {
            let bits = vec![true; n];
            assert!(encode(&table, &bits, n).is_zero());
            assert_eq!(decode(&table, &BigUint::zero(), n, n).unwrap(), bits);
        }
    }

    #[test]
    fn test_last_rank_is_tail_ones() {
        let table = BinomialTable::new(10).unwrap();
        let bits = bits_from("0000000111");
        let rank = encode(&table, &bits, 3);
        assert_eq!(&rank + 1u32, *table.get(10, 3).unwrap());
        assert_eq!(decode(&table, &rank, 10, 3).unwrap(), bits);
    }

    #[test]
    fn test_encode_trusts_k() {
        let table = BinomialTable::new(8).unwrap();
        // Bits after the k-th set bit are never looked at.
        let full = bits_from("01100111");
        let truncated = bits_from("01100000");
        assert_eq!(encode(&table, &full, 2), encode(&table, &truncated, 2));
        // More set bits owed than positions: nothing is visited.
        assert!(encode(&table, &bits_from("111"), 4).is_zero());
    }

    #[test]
    fn test_large_universe() {
        let table = BinomialTable::new(512).unwrap();
        let mut bits = vec![false; 512];
        for i in [3, 64, 65, 200, 311, 510] {
            bits[i] = true;
        }
        let rank = encode(&table, &bits, 6);
        assert!(rank < *table.get(512, 6).unwrap());
        assert_eq!(decode(&table, &rank, 512, 6).unwrap(), bits);
    }

    #[test]
    fn test_rank_bits() {
        let table = BinomialTable::new(20).unwrap();
        // C(4, 2) = 6 -> ranks 0..=5 need 3 bits.
        assert_eq!(rank_bits(&table, 4, 2), Some(3));
        // C(n, 0) = 1 -> a single rank, zero bits.
        assert_eq!(rank_bits(&table, 20, 0), Some(0));
        // C(20, 10) = 184756 -> 18 bits.
        assert_eq!(rank_bits(&table, 20, 10), Some(18));
        assert_eq!(rank_bits(&table, 21, 1), None);
    }

    #[test]
    #[should_panic(expected = "exceeds binomial table")]
    fn test_decode_table_too_small() {
        let table = BinomialTable::new(4).unwrap();
        let _ = decode(&table, &BigUint::zero(), 8, 2);
    }

    #[test]
    #[should_panic(expected = "exceeds binomial table")]
    fn test_encode_table_too_small() {
        let table = BinomialTable::new(4).unwrap();
        let _ = encode(&table, &bits_from("00000011"), 2);
    }

    #[test]
    #[should_panic(expected = "exceeds binomial table")]
    fn test_encode_one_past_table_panics_without_lookups() {
        // No position needs C(4, _), but n = 5 could never be decoded.
        let table = BinomialTable::new(4).unwrap();
        let _ = encode(&table, &bits_from("11000"), 2);
    }

    #[test]
    fn test_encode_at_table_limit() {
        let table = BinomialTable::new(4).unwrap();
        let bits = bits_from("0110");
        let rank = encode(&table, &bits, 2);
        assert_eq!(decode(&table, &rank, 4, 2).unwrap(), bits);
    }

    #[test]
    #[should_panic(expected = "cannot place")]
    fn test_decode_k_exceeds_n() {
        let table = BinomialTable::new(4).unwrap();
        let _ = decode(&table, &BigUint::zero(), 3, 4);
    }
}
