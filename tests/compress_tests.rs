//! End-to-end compression scenarios
//!
//! These tests run the public entry points on representative inputs and check
//! both the shape of the compressed stream and the round trip.

use std::io::{Cursor, Read, Write};
use thlzss::{
    compress_with_stats, decompress_bytes, decompress_exact, encode_from_memory,
    encode_from_stream, inspect_stream, LzssError, LzssReader, LzssWriter, DICT_SIZE,
};

/// Simple deterministic generator so failures are reproducible
fn pseudo_random(len: usize, mut seed: u32) -> Vec<u8> {
    (0..len)
        .map(|_| {
            seed = seed.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            (seed >> 24) as u8
        })
        .collect()
}

#[test]
fn test_two_byte_cycle() -> Result<(), Box<dyn std::error::Error>> {
    let data = b"AB".repeat(10);
    let (compressed, stats) = compress_with_stats(&data);

    assert_eq!(stats.literal_count, 2);
    assert_eq!(stats.match_count, 1);
    assert_eq!(stats.longest_match, 18);
    assert_eq!(decompress_bytes(&compressed)?, data);

    Ok(())
}

#[test]
fn test_zero_run() -> Result<(), Box<dyn std::error::Error>> {
    let data = vec![0u8; 5000];
    let (compressed, stats) = compress_with_stats(&data);

    // One priming literal, then 277 full matches and a 13-byte tail
    assert_eq!(stats.literal_count, 1);
    assert_eq!(stats.match_count, 278);
    assert_eq!(stats.longest_match, 18);
    // 9 + 278 * 18 + 18 bits
    assert_eq!(compressed.len(), 629);
    assert_eq!(decompress_bytes(&compressed)?, data);

    Ok(())
}

#[test]
fn test_wraparound() -> Result<(), Box<dyn std::error::Error>> {
    // Repeating text several times the dictionary size
    let sentence = b"The quick brown fox jumps over the lazy dog. ";
    let data: Vec<u8> = sentence.iter().copied().cycle().take(DICT_SIZE * 3 + 77).collect();

    let compressed = encode_from_memory(&data);
    assert!(compressed.len() < data.len() / 4);
    assert_eq!(decompress_bytes(&compressed)?, data);

    Ok(())
}

#[test]
fn test_wraparound_mixed_content() -> Result<(), Box<dyn std::error::Error>> {
    // Random blocks repeated at distances both inside and beyond the window
    let block = pseudo_random(3000, 7);
    let mut data = Vec::new();
    for i in 0..6 {
        data.extend_from_slice(&block);
        data.extend_from_slice(&pseudo_random(1500 + i * 700, i as u32));
    }

    assert!(data.len() > DICT_SIZE * 2);
    assert_eq!(decompress_bytes(&encode_from_memory(&data))?, data);

    Ok(())
}

#[test]
fn test_incompressible_data_expands_by_one_ninth() -> Result<(), Box<dyn std::error::Error>> {
    // Every byte value once: no three-byte sequence repeats
    let data: Vec<u8> = (0..=255u8).collect();
    let (compressed, stats) = compress_with_stats(&data);

    assert_eq!(stats.literal_count, 256);
    assert_eq!(stats.match_count, 0);
    // 256 * 9 + 18 bits
    assert_eq!(compressed.len(), (256 * 9 + 18 + 7) / 8);
    assert_eq!(decompress_bytes(&compressed)?, data);

    Ok(())
}

#[test]
fn test_stream_and_memory_agree() -> Result<(), Box<dyn std::error::Error>> {
    let data = pseudo_random(20_000, 42)
        .into_iter()
        .map(|b| b % 4)
        .collect::<Vec<u8>>();

    let from_stream = encode_from_stream(Cursor::new(&data))?;
    assert_eq!(from_stream, encode_from_memory(&data));

    Ok(())
}

#[test]
fn test_encoding_is_deterministic() {
    let data = pseudo_random(10_000, 3);
    assert_eq!(encode_from_memory(&data), encode_from_memory(&data));
}

#[test]
fn test_writer_and_reader() -> Result<(), Box<dyn std::error::Error>> {
    let text = b"Streaming through the writer and back through the reader. ".repeat(300);

    let mut writer = LzssWriter::new(Vec::new());
    for chunk in text.chunks(1000) {
        writer.write_all(chunk)?;
    }
    let compressed = writer.finish()?;
    assert_eq!(compressed, encode_from_memory(&text));

    let mut reader = LzssReader::new(Cursor::new(compressed));
    let mut output = Vec::new();
    reader.read_to_end(&mut output)?;
    assert_eq!(output, text);

    Ok(())
}

#[test]
fn test_exact_size_checks() -> Result<(), Box<dyn std::error::Error>> {
    let data = vec![0x55u8; 1234];
    let compressed = encode_from_memory(&data);

    assert_eq!(decompress_exact(&compressed, 1234)?, data);
    assert!(matches!(
        decompress_exact(&compressed, 1000),
        Err(LzssError::SizeMismatch {
            expected: 1000,
            actual: 1234
        })
    ));

    Ok(())
}

#[test]
fn test_inspect_reports_encoder_counts() -> Result<(), Box<dyn std::error::Error>> {
    let data = pseudo_random(5000, 11)
        .into_iter()
        .map(|b| b % 8)
        .collect::<Vec<u8>>();
    let (compressed, encoded) = compress_with_stats(&data);
    let decoded = inspect_stream(&compressed)?;

    assert_eq!(decoded.literal_count, encoded.literal_count);
    assert_eq!(decoded.match_count, encoded.match_count);
    assert_eq!(decoded.longest_match, encoded.longest_match);
    assert_eq!(decoded.output_bytes, data.len() as u64);

    Ok(())
}

#[test]
fn test_truncated_stream() {
    let compressed = encode_from_memory(&pseudo_random(500, 5));
    for cut in [0, 1, compressed.len() / 2, compressed.len() - 1] {
        assert!(matches!(
            decompress_bytes(&compressed[..cut]),
            Err(LzssError::UnexpectedEof)
        ));
    }
}
