//! LZSS decompression
//!
//! Rebuilds the original bytes from a stream produced by the compressor. The
//! stream carries no sizes, so decoding runs until the terminator entry;
//! callers that stored the uncompressed size can cap or check the output.

mod decoder;
mod reader;
mod state;

pub use decoder::{BitReader, Entry};
pub use reader::LzssReader;
pub use state::DecodeState;

use crate::common::{CompressionStats, LzssError};
use crate::Result;

/// Convenience function to decompress data in memory
pub fn decompress_bytes(data: &[u8]) -> Result<Vec<u8>> {
    LzssReader::new(data).decompress_all()
}

/// Decompress, failing as soon as the output would exceed `limit` bytes
pub fn decompress_bytes_with_limit(data: &[u8], limit: usize) -> Result<Vec<u8>> {
    LzssReader::with_limit(data, limit).decompress_all()
}

/// Decompress and require exactly `expected` output bytes
pub fn decompress_exact(data: &[u8], expected: usize) -> Result<Vec<u8>> {
    let output = match decompress_bytes_with_limit(data, expected) {
        Err(LzssError::OutputLimitExceeded { .. }) => {
            // Finish decoding to report the real size
            let actual = decompress_bytes(data)?.len();
            return Err(LzssError::SizeMismatch { expected, actual });
        }
        other => other?,
    };

    if output.len() != expected {
        return Err(LzssError::SizeMismatch {
            expected,
            actual: output.len(),
        });
    }
    Ok(output)
}

/// Decode a stream and report its entry statistics without keeping the output
pub fn inspect_stream(data: &[u8]) -> Result<CompressionStats> {
    let mut reader = LzssReader::new(data);
    reader.decompress_all()?;
    Ok(reader.stats())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode_from_memory;

    #[test]
    fn test_empty_stream() {
        assert!(decompress_bytes(&[0, 0, 0]).unwrap().is_empty());
    }

    #[test]
    fn test_no_terminator() {
        assert!(matches!(
            decompress_bytes(&[]),
            Err(LzssError::UnexpectedEof)
        ));
    }

    #[test]
    fn test_trailing_bytes_after_terminator_are_ignored() {
        let mut compressed = encode_from_memory(b"hello hello hello");
        compressed.extend_from_slice(&[0xFF, 0xFF]);
        assert_eq!(decompress_bytes(&compressed).unwrap(), b"hello hello hello");
    }

    #[test]
    fn test_limit() {
        let compressed = encode_from_memory(&[1u8; 100]);
        assert_eq!(decompress_bytes_with_limit(&compressed, 100).unwrap().len(), 100);
        assert!(matches!(
            decompress_bytes_with_limit(&compressed, 99),
            Err(LzssError::OutputLimitExceeded { limit: 99 })
        ));
    }

    #[test]
    fn test_exact() {
        let compressed = encode_from_memory(&[1u8; 100]);
        assert_eq!(decompress_exact(&compressed, 100).unwrap().len(), 100);
        assert!(matches!(
            decompress_exact(&compressed, 50),
            Err(LzssError::SizeMismatch {
                expected: 50,
                actual: 100
            })
        ));
        assert!(matches!(
            decompress_exact(&compressed, 150),
            Err(LzssError::SizeMismatch {
                expected: 150,
                actual: 100
            })
        ));
    }

    #[test]
    fn test_inspect_stream() {
        let data = vec![0u8; 5000];
        let compressed = encode_from_memory(&data);
        let stats = inspect_stream(&compressed).unwrap();

        assert_eq!(stats.literal_count, 1);
        assert_eq!(stats.bytes_processed, 5000);
        assert_eq!(stats.longest_match, 18);
        assert_eq!(stats.input_bytes, compressed.len() as u64);
        assert_eq!(stats.output_bytes, 5000);
    }
}
