//! LzssReader - Streaming decompression reader
//!
//! This module implements the LzssReader that provides a Read interface over
//! a compressed stream, decoding entries in batches as the caller reads.

use super::decoder::BitReader;
use super::state::DecodeState;
use crate::common::{CompressionStats, LzssError};
use crate::Result;
use std::io::{self, Read};

/// Decoded bytes gathered per refill
const OUTPUT_CHUNK: usize = 0x1000;

/// Streaming decompression reader implementing Read trait
#[derive(Debug)]
pub struct LzssReader<R: Read> {
    bits: BitReader<R>,
    state: DecodeState,
    finished: bool,
    output_buffer: Vec<u8>,
    output_pos: usize,
}

impl<R: Read> LzssReader<R> {
    /// Create a new LzssReader
    pub fn new(reader: R) -> Self {
        Self::with_state(reader, DecodeState::new())
    }

    /// Create a reader that fails once more than `limit` bytes are produced
    pub fn with_limit(reader: R, limit: usize) -> Self {
        Self::with_state(reader, DecodeState::with_limit(limit))
    }

    fn with_state(reader: R, state: DecodeState) -> Self {
        Self {
            bits: BitReader::new(reader),
            state,
            finished: false,
            output_buffer: Vec::with_capacity(OUTPUT_CHUNK + crate::MAX_MATCH),
            output_pos: 0,
        }
    }

    /// Whether the terminator has been reached
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Entry statistics with byte totals filled in
    pub fn stats(&self) -> CompressionStats {
        let mut stats = self.state.stats().clone();
        let compressed = self.bits.bytes_read();
        stats.finalize(compressed, self.state.produced() as u64, compressed);
        stats
    }

    /// Decode entries until a chunk of output is ready or the stream ends
    fn fill_buffer(&mut self) -> Result<()> {
        self.output_buffer.clear();
        self.output_pos = 0;

        while !self.finished && self.output_buffer.len() < OUTPUT_CHUNK {
            let entry = self.bits.read_entry()?;
            if !self.state.expand(entry, &mut self.output_buffer)? {
                self.finished = true;
                log::debug!(
                    "unlzss: {} bytes -> {} bytes",
                    self.bits.bytes_read(),
                    self.state.produced()
                );
            }
        }
        Ok(())
    }

    /// Decode the whole stream, keeping the crate's error type
    pub fn decompress_all(&mut self) -> Result<Vec<u8>> {
        let mut output = self.output_buffer[self.output_pos..].to_vec();
        self.output_pos = self.output_buffer.len();

        while !self.finished {
            self.fill_buffer()?;
            output.extend_from_slice(&self.output_buffer);
            self.output_pos = self.output_buffer.len();
        }
        Ok(output)
    }
}

fn into_io_error(err: LzssError) -> io::Error {
    match err {
        LzssError::Io(e) => e,
        LzssError::UnexpectedEof => io::Error::new(io::ErrorKind::UnexpectedEof, err),
        other => io::Error::new(io::ErrorKind::InvalidData, other),
    }
}

impl<R: Read> Read for LzssReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.output_pos >= self.output_buffer.len() {
            if self.finished {
                return Ok(0);
            }
            self.fill_buffer().map_err(into_io_error)?;
        }

        let available = &self.output_buffer[self.output_pos..];
        let count = available.len().min(buf.len());
        buf[..count].copy_from_slice(&available[..count]);
        self.output_pos += count;
        Ok(count)
    }
}
