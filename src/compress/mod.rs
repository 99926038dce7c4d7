//! LZSS compression
//!
//! Greedy LZSS over a fixed 8 KiB circular dictionary. Each entry starts with
//! a flag bit: `1` is followed by a raw byte, `0` by a 13-bit absolute
//! dictionary address and a 4-bit length biased by 3. The stream ends with a
//! match entry whose address and length are both zero, and the last byte is
//! zero-padded. There is no header.

mod bits;
mod hash;
mod pattern;
mod state;
mod window;
mod writer;

pub use bits::BitWriter;
pub use hash::{Chain, MatchIndex};
pub use pattern::MatchResult;
pub use state::Encoder;
pub use window::DictionaryWindow;
pub use writer::LzssWriter;

use crate::common::CompressionStats;
use crate::source::{MemorySource, StreamSource};
use crate::Result;
use std::io::{BufReader, Read};

/// Compress an in-memory buffer
///
/// The compressed length is the length of the returned vector.
pub fn encode_from_memory(data: &[u8]) -> Vec<u8> {
    compress_with_stats(data).0
}

/// Compress an in-memory buffer and report what the encoder did
pub fn compress_with_stats(data: &[u8]) -> (Vec<u8>, CompressionStats) {
    match Encoder::new().encode(MemorySource::new(data)) {
        Ok(result) => result,
        Err(never) => match never {},
    }
}

/// Compress everything `reader` yields until end of stream
pub fn encode_from_stream<R: Read>(reader: R) -> Result<Vec<u8>> {
    let source = StreamSource::new(BufReader::new(reader));
    let (output, _) = Encoder::new().encode(source)?;
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_stream_matches_memory() {
        let data: Vec<u8> = (0..10_000u32).map(|i| (i * i % 251) as u8).collect();
        let from_stream = encode_from_stream(Cursor::new(&data)).unwrap();
        assert_eq!(from_stream, encode_from_memory(&data));
    }

    #[test]
    fn test_stream_empty() {
        let output = encode_from_stream(std::io::empty()).unwrap();
        assert_eq!(output, vec![0, 0, 0]);
    }

    #[test]
    fn test_compress_with_stats() {
        let data = vec![0u8; 5000];
        let (output, stats) = compress_with_stats(&data);
        assert_eq!(stats.bytes_processed, 5000);
        assert_eq!(stats.output_bytes, output.len() as u64);
        assert!(stats.compression_ratio < 0.13);
    }
}
