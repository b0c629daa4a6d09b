//! Combinadic compression of fixed-weight bitsets.
//!
//! `combinadic` replaces a bitset of length `n` with `k` set bits by its
//! index among all `C(n, k)` such bitsets. The index (the *rank*) needs
//! `ceil(log2(C(n, k)))` bits, which is far less than `n` when `k` is
//! small. The mapping is a bijection, so compression is lossless as long
//! as `n` and `k` travel with the rank.
//!
//! # Pieces
//!
//! - [`BinomialTable`]: `C(n, k)` for every `k <= n <= max_n`, as big
//!   integers, built once and shared read-only
//! - [`encode`] / [`decode`]: rank and unrank a bitset against a table
//! - [`CombinadicCompressor`]: an [`IdSetCompressor`] that stores a sorted
//!   ID set as `varint(k)` followed by its rank
//!
//! # Example
//!
//! ```rust
//! use combinadic::{decode, encode, BigUint, BinomialTable};
//!
//! let table = BinomialTable::new(64).unwrap();
//! let bits = [false, true, true, false];
//!
//! let rank = encode(&table, &bits, 2);
//! assert_eq!(rank, BigUint::from(3u32));
//!
//! let decoded = decode(&table, &rank, bits.len(), 2).unwrap();
//! assert_eq!(decoded, bits);
//! ```
//!
//! ID sets go through the compressor:
//!
//! ```rust
//! use combinadic::{CombinadicCompressor, IdSetCompressor};
//!
//! let compressor = CombinadicCompressor::with_max_universe(200).unwrap();
//! let ids = vec![1u32, 5, 10, 20, 50];
//!
//! let compressed = compressor.compress_set(&ids, 200).unwrap();
//! let decompressed = compressor.decompress_set(&compressed, 200).unwrap();
//! assert_eq!(ids, decompressed);
//! ```
//!
//! # Panics and errors
//!
//! The raw codec treats a table that does not cover `n` as a programming
//! error and panics. [`CombinadicCompressor`] checks its inputs first and
//! reports [`CompressionError`] instead.
//!
//! # References
//!
//! - Knuth, D. (2005). TAOCP Vol. 4A, §7.2.1.3 "Generating all combinations"
//! - Pascal, B. (1665). "Traité du triangle arithmétique"

#![warn(missing_docs)]
#![warn(clippy::all)]

mod binomial;
mod codec;
mod compressor;
mod error;
mod traits;

pub use binomial::BinomialTable;
pub use codec::{decode, encode, rank_bits};
pub use compressor::{CombinadicCompressor, DEFAULT_MAX_UNIVERSE};
pub use error::CompressionError;
pub use traits::IdSetCompressor;

pub use num_bigint::BigUint;
