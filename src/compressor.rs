//! Combinadic compressor for sets of IDs.
//!
//! A sorted, unique ID set over `[0, N)` is the same thing as a bitset of
//! length `N` with one bit per ID, so it can be stored as its combinadic
//! rank. There are `C(N, n)` such sets, and the rank is exactly
//! `ceil(log2(C(N, n)))` bits: the information-theoretic minimum for an
//! unordered set, with no per-ID overhead.
//!
//! # Format
//!
//! ```text
//! varint(n) ++ rank as little-endian bytes (omitted when the rank is 0)
//! ```
//!
//! The universe size `N` is not stored. An empty set compresses to an
//! empty buffer.

use std::sync::Arc;

use num_bigint::BigUint;
use num_traits::Zero;

use crate::binomial::BinomialTable;
use crate::codec::{decode, encode, rank_bits};
use crate::error::CompressionError;
use crate::traits::IdSetCompressor;

/// Universe size used by [`CombinadicCompressor::default_universe`].
pub const DEFAULT_MAX_UNIVERSE: u32 = 256;

/// Combinadic compressor for sets.
///
/// Holds a shared [`BinomialTable`]; the largest supported universe is the
/// table's `max_n`. Cloning is cheap and clones share the table.
///
/// # Performance
///
/// - Compressed size: `ceil(log2(C(N, n)) / 8)` bytes plus a varint header
/// - Table: O(N²) big integers, built once
/// - Encode/decode: O(N) big-integer additions or comparisons
#[derive(Clone, Debug)]
pub struct CombinadicCompressor {
    table: Arc<BinomialTable>,
}

impl CombinadicCompressor {
    /// Create a compressor with a table for universes up to `max_universe`.
    pub fn with_max_universe(max_universe: u32) -> Result<Self, CompressionError> {
        let table = BinomialTable::new(max_universe as usize)?;
        Ok(Self::from_table(Arc::new(table)))
    }

    /// Create a compressor for universes up to [`DEFAULT_MAX_UNIVERSE`].
    pub fn default_universe() -> Result<Self, CompressionError> {
        Self::with_max_universe(DEFAULT_MAX_UNIVERSE)
    }

    /// Create a compressor over an existing, possibly shared, table.
    pub fn from_table(table: Arc<BinomialTable>) -> Self {
        Self { table }
    }

    /// The binomial table backing this compressor.
    pub fn table(&self) -> &Arc<BinomialTable> {
        &self.table
    }

    /// Largest universe size this compressor accepts.
    pub fn max_universe(&self) -> usize {
        self.table.max_n()
    }

    /// Validate that IDs are sorted and unique.
    fn validate_ids(ids: &[u32]) -> Result<(), CompressionError> {
        for pair in ids.windows(2) {
            if pair[1] <= pair[0] {
                return Err(CompressionError::InvalidInput(format!(
                    "IDs must be sorted and unique, found {} <= {}",
                    pair[1], pair[0]
                )));
            }
        }
        Ok(())
    }

    fn check_universe(&self, universe_size: u32) -> Result<usize, CompressionError> {
        let n = universe_size as usize;
        if n > self.table.max_n() {
            return Err(CompressionError::InvalidInput(format!(
                "universe size {} exceeds table capacity {}",
                universe_size,
                self.table.max_n()
            )));
        }
        Ok(n)
    }

    /// Approximate `log2(C(N, n))` by `N * H(n / N)`.
    ///
    /// Upper bound, used for universes the table does not cover.
    fn theoretical_bits(num_ids: usize, universe_size: u32) -> f64 {
        let n = num_ids as f64;
        let n_val = universe_size as f64;
        if num_ids == 0 || n >= n_val {
            return 0.0;
        }

        let p = n / n_val;
        let entropy = -(p * p.log2()) - (1.0 - p) * (1.0 - p).log2();
        n_val * entropy
    }

    /// Encode a u64 as varint into the buffer.
    #[inline]
    fn encode_varint(value: u64, buf: &mut Vec<u8>) {
        let mut val = value;
        while val >= 0x80 {
            buf.push((val as u8) | 0x80);
            val >>= 7;
        }
        buf.push(val as u8);
    }

    #[inline]
    fn varint_len(value: u64) -> usize {
        let bits = (u64::BITS - value.leading_zeros()).max(1) as usize;
        bits.div_ceil(7)
    }

    /// Decode a minimal varint from the buffer, returning (value, bytes_consumed).
    ///
    /// Only the encoding [`encode_varint`](Self::encode_varint) produces is
    /// accepted: no trailing zero groups, no bits past 64.
    #[inline]
    fn decode_varint(buf: &[u8]) -> Result<(u64, usize), CompressionError> {
        let mut value = 0u64;
        let mut shift = 0;

        for (offset, &byte) in buf.iter().enumerate() {
            let payload = byte & 0x7F;
            if shift > 63 || (shift == 63 && payload > 1) {
                return Err(CompressionError::DecompressionFailed(
                    "Varint encoding too large".to_string(),
                ));
            }
            value |= (payload as u64) << shift;
            if (byte & 0x80) == 0 {
                if offset > 0 && payload == 0 {
                    return Err(CompressionError::DecompressionFailed(
                        "Overlong varint encoding".to_string(),
                    ));
                }
                return Ok((value, offset + 1));
            }
            shift += 7;
        }

        Err(CompressionError::DecompressionFailed(
            "Unexpected end of compressed data".to_string(),
        ))
    }
}

impl IdSetCompressor for CombinadicCompressor {
    fn compress_set(&self, ids: &[u32], universe_size: u32) -> Result<Vec<u8>, CompressionError> {
        Self::validate_ids(ids)?;

        let Some(&max_id) = ids.last() else {
            return Ok(Vec::new());
        };
        if max_id >= universe_size {
            return Err(CompressionError::InvalidInput(format!(
                "ID {} exceeds universe size {}",
                max_id, universe_size
            )));
        }
        let n = self.check_universe(universe_size)?;

        let mut bits = vec![false; n];
        for &id in ids {
            bits[id as usize] = true;
        }
        let rank = encode(&self.table, &bits, ids.len());

        let mut encoded = Vec::new();
        Self::encode_varint(ids.len() as u64, &mut encoded);
        if !rank.is_zero() {
            encoded.extend_from_slice(&rank.to_bytes_le());
        }

        log::trace!(
            "compressed {} ids over universe {}: rank {} bits, {} bytes",
            ids.len(),
            universe_size,
            rank.bits(),
            encoded.len()
        );

        Ok(encoded)
    }

    fn decompress_set(
        &self,
        compressed: &[u8],
        universe_size: u32,
    ) -> Result<Vec<u32>, CompressionError> {
        if compressed.is_empty() {
            return Ok(Vec::new());
        }
        let n = self.check_universe(universe_size)?;

        let (num_ids, offset) = Self::decode_varint(compressed)?;
        if num_ids > n as u64 {
            return Err(CompressionError::DecompressionFailed(format!(
                "{} IDs cannot fit in universe size {}",
                num_ids, universe_size
            )));
        }
        let k = num_ids as usize;

        let rank_bytes = &compressed[offset..];
        if rank_bytes.last() == Some(&0) {
            return Err(CompressionError::DecompressionFailed(
                "rank has trailing zero bytes".to_string(),
            ));
        }
        let rank = BigUint::from_bytes_le(rank_bytes);
        let count = self.table.get(n, k).ok_or_else(|| {
            CompressionError::DecompressionFailed(format!("C({}, {}) is not in the table", n, k))
        })?;
        if rank >= *count {
            return Err(CompressionError::DecompressionFailed(format!(
                "rank of {} bits is out of range for C({}, {})",
                rank.bits(),
                n,
                k
            )));
        }

        let bits = decode(&self.table, &rank, n, k)?;
        let ids: Vec<u32> = bits
            .iter()
            .enumerate()
            .filter(|&(_, &bit)| bit)
            .map(|(id, _)| id as u32)
            .collect();

        log::trace!(
            "decompressed {} ids over universe {} from {} bytes",
            ids.len(),
            universe_size,
            compressed.len()
        );

        Ok(ids)
    }

    fn estimate_size(&self, num_ids: usize, universe_size: u32) -> usize {
        if num_ids == 0 {
            return 0;
        }

        let header = Self::varint_len(num_ids as u64);
        match rank_bits(&self.table, universe_size as usize, num_ids) {
            Some(bits) => header + bits.div_ceil(8) as usize,
            None => header + (Self::theoretical_bits(num_ids, universe_size) / 8.0).ceil() as usize,
        }
    }

    fn bits_per_id(&self, num_ids: usize, universe_size: u32) -> f64 {
        if num_ids == 0 {
            return 0.0;
        }

        let bits = match rank_bits(&self.table, universe_size as usize, num_ids) {
            Some(bits) => bits as f64,
            None => Self::theoretical_bits(num_ids, universe_size),
        };
        bits / (num_ids as f64)
    }
}
