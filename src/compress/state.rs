//! Compression state management
//!
//! An `Encoder` owns everything one compression run touches: the dictionary
//! window, the match index, the bit writer and the running statistics. A new
//! one is built for every run and nothing is shared between runs.

use super::bits::BitWriter;
use super::hash::MatchIndex;
use super::pattern::MatchResult;
use super::window::DictionaryWindow;
use crate::common::{CompressionStats, LENGTH_BITS, MIN_MATCH, OFFSET_BITS};
use crate::source::ByteSource;

/// Greedy LZSS encoder context
#[derive(Debug)]
pub struct Encoder {
    pub(super) window: DictionaryWindow,
    pub(super) index: MatchIndex,
    bits: BitWriter,
    stats: CompressionStats,
    primed: bool,
}

impl Encoder {
    /// Create a fresh encoder
    pub fn new() -> Self {
        Self {
            window: DictionaryWindow::new(),
            index: MatchIndex::new(),
            bits: BitWriter::default(),
            stats: CompressionStats::default(),
            primed: false,
        }
    }

    /// Whether the lookahead has been filled
    pub fn is_primed(&self) -> bool {
        self.primed
    }

    /// Whether every input byte has been emitted
    pub fn is_drained(&self) -> bool {
        self.primed && self.window.waiting() == 0
    }

    /// Fill the lookahead before the first step
    pub fn prime<S: ByteSource>(&mut self, source: &mut S) -> Result<(), S::Error> {
        self.window.prime(source)?;
        self.primed = true;
        Ok(())
    }

    /// Retire one lookahead byte into the history
    pub(super) fn advance<S: ByteSource>(&mut self, source: &mut S) -> Result<(), S::Error> {
        self.window.advance_and_refill(&mut self.index, source)
    }

    /// Emit one entry for the lookahead and slide the window past it
    ///
    /// Does nothing once the encoder is drained.
    pub fn step<S: ByteSource>(&mut self, source: &mut S) -> Result<(), S::Error> {
        if self.window.waiting() == 0 {
            return Ok(());
        }

        let found = self.find_match();
        let consumed = if found.is_match() {
            self.emit_match(found);
            found.length
        } else {
            let byte = self.window.byte_at(self.window.head());
            self.emit_literal(byte);
            1
        };

        for _ in 0..consumed {
            self.advance(source)?;
        }
        Ok(())
    }

    /// Compress everything `source` produces and return the finished stream
    pub fn encode<S: ByteSource>(
        mut self,
        mut source: S,
    ) -> Result<(Vec<u8>, CompressionStats), S::Error> {
        self.prime(&mut source)?;
        while self.window.waiting() > 0 {
            self.step(&mut source)?;
        }
        Ok(self.finish())
    }

    fn emit_literal(&mut self, byte: u8) {
        log::trace!("literal {:#04x} at {}", byte, self.window.head());
        self.bits.write_bit(1);
        self.bits.write_bits(8, byte as u32);
        self.stats.record_literal();
    }

    fn emit_match(&mut self, found: MatchResult) {
        log::trace!(
            "match {} bytes from {} at {}",
            found.length,
            found.address,
            self.window.head()
        );
        self.bits.write_bit(0);
        self.bits.write_bits(OFFSET_BITS, found.address as u32);
        self.bits.write_bits(LENGTH_BITS, (found.length - MIN_MATCH) as u32);
        self.stats.record_match(found.length);
    }

    /// Zero offset, zero length: cannot occur as a real match
    fn write_terminator(&mut self) {
        self.bits.write_bit(0);
        self.bits.write_bits(OFFSET_BITS, 0);
        self.bits.write_bits(LENGTH_BITS, 0);
    }

    /// Statistics gathered so far
    pub fn stats(&self) -> &CompressionStats {
        &self.stats
    }

    /// Drain the output bytes completed so far
    pub fn take_output(&mut self) -> Vec<u8> {
        self.bits.take_complete_bytes()
    }

    /// Write the terminator and return the remaining output with the stats
    ///
    /// Any input still in the lookahead is dropped; call `step` until
    /// `is_drained` first.
    pub fn finish(mut self) -> (Vec<u8>, CompressionStats) {
        self.write_terminator();

        let total_bits = self.bits.bit_len();
        let compressed = total_bits.div_ceil(8) as u64;
        let uncompressed = self.stats.bytes_processed as u64;

        let mut stats = std::mem::take(&mut self.stats);
        stats.finalize(uncompressed, compressed, compressed);
        log::debug!(
            "lzss: {} bytes -> {} bytes ({} literals, {} matches, longest {})",
            uncompressed,
            compressed,
            stats.literal_count,
            stats.match_count,
            stats.longest_match
        );

        (self.bits.finish(), stats)
    }
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new()
    }
}
