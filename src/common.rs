//! Common types and constants for the LZSS format
//!
//! This module defines the format constants, the error type and the statistics
//! structure shared by the compressor and the decompressor.

use thiserror::Error;

/// Dictionary size in bytes (8 KiB)
pub const DICT_SIZE: usize = 0x2000;

/// Mask applied to every dictionary address
pub const DICT_MASK: usize = DICT_SIZE - 1;

/// Shortest repetition worth a match entry
pub const MIN_MATCH: usize = 3;

/// Longest repetition a match entry can describe (MIN_MATCH + 4 bits)
pub const MAX_MATCH: usize = 18;

/// Width of the absolute dictionary address in a match entry
pub const OFFSET_BITS: u32 = 13;

/// Width of the biased length in a match entry
pub const LENGTH_BITS: u32 = 4;

/// Number of buckets in the match index
pub const HASH_SIZE: usize = 0x10000;

/// Empty bucket / end of chain. Doubles as the end-of-stream offset.
pub const HASH_NULL: usize = 0;

/// First address written by both sides of the codec
pub const DICT_START: usize = 1;

/// Error type for LZSS operations
#[derive(Debug, Error)]
pub enum LzssError {
    /// Compressed data ended before the terminator entry
    #[error("Unexpected end of input")]
    UnexpectedEof,

    /// Decompressed output grew past the caller's limit
    #[error("Decompressed output exceeds limit of {limit} bytes")]
    OutputLimitExceeded {
        /// Maximum number of output bytes allowed
        limit: usize,
    },

    /// Decompressed output does not have the size the caller expected
    #[error("Size mismatch: expected {expected} bytes, got {actual}")]
    SizeMismatch {
        /// Expected decompressed size
        expected: usize,
        /// Actual decompressed size
        actual: usize,
    },

    /// Data was written after the stream was finished
    #[error("Writer already finished")]
    WriterFinished,

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for LZSS operations
pub type Result<T> = std::result::Result<T, LzssError>;

/// Statistics for compression/decompression operations
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CompressionStats {
    /// Number of literal entries encoded/decoded
    pub literal_count: usize,
    /// Number of match entries encoded/decoded (terminator excluded)
    pub match_count: usize,
    /// Total uncompressed bytes covered by the entries
    pub bytes_processed: usize,
    /// Longest match found
    pub longest_match: usize,
    /// Input bytes
    pub input_bytes: u64,
    /// Output bytes
    pub output_bytes: u64,
    /// Compressed size divided by uncompressed size
    pub compression_ratio: f64,
}

impl CompressionStats {
    /// Record a literal entry
    pub fn record_literal(&mut self) {
        self.literal_count += 1;
        self.bytes_processed += 1;
    }

    /// Record a match entry of `length` bytes
    pub fn record_match(&mut self, length: usize) {
        self.match_count += 1;
        self.bytes_processed += length;
        self.longest_match = self.longest_match.max(length);
    }

    /// Fill in the byte totals and the ratio (compressed / uncompressed)
    pub fn finalize(&mut self, input_bytes: u64, output_bytes: u64, compressed_bytes: u64) {
        self.input_bytes = input_bytes;
        self.output_bytes = output_bytes;
        let uncompressed = self.bytes_processed as u64;
        self.compression_ratio = if uncompressed > 0 {
            compressed_bytes as f64 / uncompressed as f64
        } else {
            0.0
        };
    }
}
