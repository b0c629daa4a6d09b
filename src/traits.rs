//! Compressor interface for ID sets.

use crate::error::CompressionError;

/// Compression of sorted, unique ID sets drawn from `[0, universe_size)`.
///
/// The universe size is not stored in the compressed form; callers must
/// pass the same value to [`decompress_set`](Self::decompress_set).
pub trait IdSetCompressor {
    /// Compress a sorted, unique set of IDs.
    fn compress_set(&self, ids: &[u32], universe_size: u32) -> Result<Vec<u8>, CompressionError>;

    /// Recover the ID set written by [`compress_set`](Self::compress_set).
    fn decompress_set(
        &self,
        compressed: &[u8],
        universe_size: u32,
    ) -> Result<Vec<u32>, CompressionError>;

    /// Expected compressed size in bytes for `num_ids` IDs.
    fn estimate_size(&self, num_ids: usize, universe_size: u32) -> usize;

    /// Expected compressed bits per ID.
    fn bits_per_id(&self, num_ids: usize, universe_size: u32) -> f64;
}
