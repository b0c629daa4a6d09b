//! Precomputed binomial coefficients.
//!
//! `C(n, k)` outgrows `u64` already at `n = 68`, so every entry is a
//! [`BigUint`]. The table is built once with Pascal's rule and is
//! read-only afterwards, which makes it cheap to share behind an `Arc`
//! between any number of encoders and decoders.
//!
//! # Layout
//!
//! Rows are stored back to back in a single triangular arena:
//! row `n` starts at `n(n+1)/2` and holds `n + 1` entries, so
//! `index(n, k) = n(n+1)/2 + k`. Lookups are O(1), storage is
//! O(max_n²) entries.

use num_bigint::BigUint;
use num_traits::One;

use crate::error::CompressionError;

/// Table of `C(n, k)` for all `0 <= k <= n <= max_n`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BinomialTable {
    max_n: usize,
    entries: Vec<BigUint>,
}

impl BinomialTable {
    /// Build the full table up to and including row `max_n`.
    ///
    /// The whole table is computed eagerly. If storage cannot be reserved
    /// (or the entry count overflows `usize`) nothing is returned but the
    /// error; the partially reserved buffer is dropped with it.
    pub fn new(max_n: usize) -> Result<Self, CompressionError> {
        let len = Self::entry_count(max_n).ok_or_else(|| {
            CompressionError::AllocationFailed(format!(
                "binomial table for max_n {} overflows usize",
                max_n
            ))
        })?;

        let mut entries: Vec<BigUint> = Vec::new();
        entries.try_reserve_exact(len).map_err(|e| {
            CompressionError::AllocationFailed(format!(
                "binomial table for max_n {} ({} entries): {}",
                max_n, len, e
            ))
        })?;

        entries.push(BigUint::one());
        for n in 1..=max_n {
            let prev = Self::row_start(n - 1);
            entries.push(BigUint::one());
            for k in 1..n {
                let sum = &entries[prev + k - 1] + &entries[prev + k];
                entries.push(sum);
            }
            entries.push(BigUint::one());
        }
        debug_assert_eq!(entries.len(), len);

        log::debug!(
            "built binomial table: max_n={} entries={} widest={} bits",
            max_n,
            entries.len(),
            Self::widest(&entries, max_n)
        );

        Ok(Self { max_n, entries })
    }

    /// Largest `n` this table answers for.
    #[inline]
    pub fn max_n(&self) -> usize {
        self.max_n
    }

    /// `C(n, k)`, or `None` when `k > n` or `n > max_n`.
    ///
    /// `None` is never a stand-in for zero: `C(n, k) >= 1` whenever it is
    /// defined.
    #[inline]
    pub fn get(&self, n: usize, k: usize) -> Option<&BigUint> {
        if k > n || n > self.max_n {
            return None;
        }
        self.entries.get(Self::row_start(n) + k)
    }

    #[inline]
    fn row_start(n: usize) -> usize {
        n * (n + 1) / 2
    }

    /// `(max_n + 1)(max_n + 2) / 2`, checked.
    fn entry_count(max_n: usize) -> Option<usize> {
        let a = max_n.checked_add(1)?;
        let b = max_n.checked_add(2)?;
        // One of two consecutive integers is even.
        if a % 2 == 0 {
            (a / 2).checked_mul(b)
        } else {
            a.checked_mul(b / 2)
        }
    }

    /// Bit width of the central coefficient of the last row.
    fn widest(entries: &[BigUint], max_n: usize) -> u64 {
        entries[Self::row_start(max_n) + max_n / 2].bits()
    }
}
