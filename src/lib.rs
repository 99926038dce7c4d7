//! thlzss - LZSS compression over a fixed 8 KiB dictionary
//!
//! This crate implements a greedy LZSS compressor, and the matching
//! decompressor, for the bit-packed format used by a family of game resource
//! archives. The format is fixed: an 8192-byte circular dictionary, 13-bit
//! absolute match addresses, 4-bit lengths covering matches of 3 to 18 bytes,
//! and a zero-address entry marking the end of the stream.
//!
//! # Features
//!
//! - Hash-chain accelerated greedy match finder
//! - In-memory and `Read`-based compression entry points
//! - Streaming API via Read/Write traits
//! - Compression statistics from either side of the codec
//! - Async helpers behind the `async` feature
//!
//! # Example
//!
//! ```
//! use thlzss::{decompress_bytes, encode_from_memory};
//!
//! let data = b"Hello, World! Hello, World! Hello, World!";
//! let compressed = encode_from_memory(data);
//! let decompressed = decompress_bytes(&compressed)?;
//! assert_eq!(&decompressed[..], &data[..]);
//! # Ok::<(), thlzss::LzssError>(())
//! ```
//!
//! # Example - Streaming
//!
//! ```no_run
//! use std::io::{BufReader, Read, Write};
//! use thlzss::{LzssReader, LzssWriter};
//!
//! let mut writer = LzssWriter::new(std::fs::File::create("data.lz")?);
//! writer.write_all(&std::fs::read("data.bin")?)?;
//! writer.finish()?;
//!
//! let file = BufReader::new(std::fs::File::open("data.lz")?);
//! let mut reader = LzssReader::new(file);
//! let mut output = Vec::new();
//! reader.read_to_end(&mut output)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Neither the compressed nor the uncompressed size is stored in the stream;
//! containers wrapping it must record them.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

// Public modules
pub mod common;
pub mod compress;
pub mod decompress;
pub mod error;
pub mod source;

// Async modules (only available with async feature)
#[cfg(feature = "async")]
pub mod async_batch;
#[cfg(feature = "async")]
pub mod async_convenience;

// Re-export commonly used types
pub use common::{
    CompressionStats, LzssError, Result, DICT_MASK, DICT_SIZE, LENGTH_BITS, MAX_MATCH, MIN_MATCH,
    OFFSET_BITS,
};
pub use compress::{Encoder, LzssWriter};
pub use decompress::{
    decompress_bytes, decompress_bytes_with_limit, decompress_exact, inspect_stream, LzssReader,
};
pub use source::{ByteSource, MemorySource, StreamSource};

// Re-export async types when async feature is enabled
#[cfg(feature = "async")]
pub use async_batch::AsyncBatchProcessor;
#[cfg(feature = "async")]
pub use async_convenience::*;

// Convenience functions

/// Compress an in-memory buffer
///
/// # Arguments
/// * `data` - The data to compress
///
/// # Returns
/// The compressed stream; its length is the compressed size
pub fn encode_from_memory(data: &[u8]) -> Vec<u8> {
    compress::encode_from_memory(data)
}

/// Compress everything a reader yields
///
/// The reader is buffered internally and read one byte at a time until it
/// reports end of stream.
///
/// # Arguments
/// * `reader` - The sequential input stream
///
/// # Returns
/// The compressed stream, or the first I/O error the reader reported
pub fn encode_from_stream<R: std::io::Read>(reader: R) -> Result<Vec<u8>> {
    compress::encode_from_stream(reader)
}

/// Compress an in-memory buffer and return the encoder's statistics
pub fn compress_with_stats(data: &[u8]) -> (Vec<u8>, CompressionStats) {
    compress::compress_with_stats(data)
}
