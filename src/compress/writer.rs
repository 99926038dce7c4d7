//! LzssWriter - Streaming compression writer
//!
//! Input written to the `LzssWriter` is queued and fed to the encoder only
//! while at least a full lookahead (18 bytes) is pending, so every refill the
//! encoder asks for succeeds exactly as it would on an in-memory buffer. The
//! compressed stream is therefore byte-identical to a one-shot encode of the
//! concatenated input. Completed output bytes are passed on after every write.

use super::state::Encoder;
use crate::common::{CompressionStats, LzssError, MAX_MATCH};
use crate::Result;
use std::collections::VecDeque;
use std::convert::Infallible;
use std::io::{self, Write};

/// Streaming compression writer implementing Write trait
#[derive(Debug)]
pub struct LzssWriter<W: Write> {
    writer: Option<W>,
    encoder: Option<Encoder>,
    pending: VecDeque<u8>,
    bytes_written: u64,
    stats: Option<CompressionStats>,
}

fn infallible<T>(result: std::result::Result<T, Infallible>) -> T {
    match result {
        Ok(value) => value,
        Err(never) => match never {},
    }
}

impl<W: Write> LzssWriter<W> {
    /// Create a new LzssWriter
    pub fn new(writer: W) -> Self {
        Self {
            writer: Some(writer),
            encoder: Some(Encoder::new()),
            pending: VecDeque::with_capacity(2 * MAX_MATCH),
            bytes_written: 0,
            stats: None,
        }
    }

    /// Number of compressed bytes handed to the inner writer so far
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Encode as much pending input as can be done without running dry
    fn process_input(&mut self) -> Result<()> {
        let encoder = self.encoder.as_mut().ok_or(LzssError::WriterFinished)?;

        if !encoder.is_primed() {
            if self.pending.len() < MAX_MATCH {
                return Ok(());
            }
            infallible(encoder.prime(&mut self.pending));
        }

        while self.pending.len() >= MAX_MATCH {
            infallible(encoder.step(&mut self.pending));
        }

        let output = encoder.take_output();
        self.write_output(&output)
    }

    fn write_output(&mut self, output: &[u8]) -> Result<()> {
        if output.is_empty() {
            return Ok(());
        }
        let writer = self.writer.as_mut().ok_or(LzssError::WriterFinished)?;
        writer.write_all(output)?;
        self.bytes_written += output.len() as u64;
        Ok(())
    }

    /// Encode the remaining input, write the terminator and flush
    fn finish_stream(&mut self) -> Result<()> {
        let Some(mut encoder) = self.encoder.take() else {
            return Ok(());
        };

        if !encoder.is_primed() {
            infallible(encoder.prime(&mut self.pending));
        }
        while !encoder.is_drained() {
            infallible(encoder.step(&mut self.pending));
        }

        let mut output = encoder.take_output();
        let (tail, stats) = encoder.finish();
        output.extend_from_slice(&tail);
        self.write_output(&output)?;
        self.stats = Some(stats);

        if let Some(writer) = self.writer.as_mut() {
            writer.flush()?;
        }
        Ok(())
    }

    /// Finish compression and return the inner writer
    pub fn finish(mut self) -> Result<W> {
        self.finish_stream()?;
        self.writer.take().ok_or(LzssError::WriterFinished)
    }

    /// Finish compression and return the inner writer with statistics
    pub fn finish_with_stats(mut self) -> Result<(W, CompressionStats)> {
        self.finish_stream()?;
        let mut stats = self.stats.take().unwrap_or_default();
        stats.output_bytes = self.bytes_written;
        let writer = self.writer.take().ok_or(LzssError::WriterFinished)?;
        Ok((writer, stats))
    }
}

fn into_io_error(err: LzssError) -> io::Error {
    match err {
        LzssError::Io(e) => e,
        other => io::Error::new(io::ErrorKind::Other, other),
    }
}

impl<W: Write> Write for LzssWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.encoder.is_none() {
            return Err(into_io_error(LzssError::WriterFinished));
        }

        self.pending.extend(buf);
        self.process_input().map_err(into_io_error)?;
        Ok(buf.len())
    }

    /// Passes completed bytes on; up to one lookahead of input and the
    /// partial last byte stay buffered until `finish`.
    fn flush(&mut self) -> io::Result<()> {
        self.process_input().map_err(into_io_error)?;
        match self.writer.as_mut() {
            Some(writer) => writer.flush(),
            None => Ok(()),
        }
    }
}

impl<W: Write> Drop for LzssWriter<W> {
    fn drop(&mut self) {
        if self.encoder.is_some() && self.writer.is_some() {
            // Try to finish compression, but ignore errors in drop
            let _ = self.finish_stream();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compress::encode_from_memory;

    fn sample(len: usize) -> Vec<u8> {
        (0..len).map(|i| b"lorem ipsum dolor "[i % 18] ^ (i / 97) as u8).collect()
    }

    #[test]
    fn test_matches_one_shot_encode() {
        let data = sample(20_000);
        let expected = encode_from_memory(&data);

        for chunk_size in [1, 7, 18, 19, 4096] {
            let mut writer = LzssWriter::new(Vec::new());
            for chunk in data.chunks(chunk_size) {
                writer.write_all(chunk).unwrap();
            }
            let output = writer.finish().unwrap();
            assert_eq!(output, expected, "chunk size {}", chunk_size);
        }
    }

    #[test]
    fn test_short_input_waits_for_finish() {
        let mut writer = LzssWriter::new(Vec::new());
        writer.write_all(b"short").unwrap();
        writer.flush().unwrap();
        assert_eq!(writer.bytes_written(), 0);

        let output = writer.finish().unwrap();
        assert_eq!(output, encode_from_memory(b"short"));
    }

    #[test]
    fn test_empty_stream() {
        let writer = LzssWriter::new(Vec::new());
        assert_eq!(writer.finish().unwrap(), vec![0, 0, 0]);
    }

    #[test]
    fn test_finish_with_stats() {
        let data = sample(1000);
        let mut writer = LzssWriter::new(Vec::new());
        writer.write_all(&data).unwrap();
        let (output, stats) = writer.finish_with_stats().unwrap();

        assert_eq!(stats.bytes_processed, data.len());
        assert_eq!(stats.output_bytes, output.len() as u64);
    }

    #[test]
    fn test_drop_finishes_stream() {
        let data = sample(300);
        let mut output = Vec::new();
        {
            let mut writer = LzssWriter::new(&mut output);
            writer.write_all(&data).unwrap();
        }
        assert_eq!(output, encode_from_memory(&data));
    }
}
