//! Error type shared by the table, codec and set compressor.

use thiserror::Error;

/// Errors surfaced by combinadic compression.
///
/// Contract violations in the raw codec (a table too small for `n`,
/// `k > n` on decode) are panics, not variants of this type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompressionError {
    /// Storage for the binomial table or an output buffer could not be obtained.
    #[error("allocation failed: {0}")]
    AllocationFailed(String),

    /// Input rejected before compression.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Compressed bytes are malformed or inconsistent with the universe.
    #[error("decompression failed: {0}")]
    DecompressionFailed(String),
}
