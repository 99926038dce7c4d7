//! Bit reading and entry decoding
//!
//! This module pulls MSB-first bit fields from the compressed stream and turns
//! them into literal, match and end entries.

use crate::common::{LzssError, LENGTH_BITS, MIN_MATCH, OFFSET_BITS};
use crate::Result;
use std::io::{ErrorKind, Read};

/// One decoded entry of the compressed stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entry {
    /// A raw byte
    Literal(u8),
    /// Copy `length` bytes starting at the absolute dictionary `address`
    Match {
        /// Absolute dictionary address (never 0)
        address: usize,
        /// Number of bytes to copy (3..=18)
        length: usize,
    },
    /// End-of-stream terminator
    End,
}

/// MSB-first bit reader over a byte stream
#[derive(Debug)]
pub struct BitReader<R: Read> {
    reader: R,
    current: u8,
    /// Unread bits left in `current`
    remaining: u32,
    bytes_read: u64,
}

impl<R: Read> BitReader<R> {
    /// Create a new bit reader
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            current: 0,
            remaining: 0,
            bytes_read: 0,
        }
    }

    /// Number of compressed bytes consumed so far
    pub fn bytes_read(&self) -> u64 {
        self.bytes_read
    }

    fn load_byte(&mut self) -> Result<()> {
        let mut byte = [0u8; 1];
        loop {
            match self.reader.read(&mut byte) {
                Ok(0) => return Err(LzssError::UnexpectedEof),
                Ok(_) => break,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        self.current = byte[0];
        self.remaining = 8;
        self.bytes_read += 1;
        Ok(())
    }

    /// Read a single bit
    pub fn read_bit(&mut self) -> Result<u32> {
        self.read_bits(1)
    }

    /// Read `n_bits` bits (at most 32), most significant first
    pub fn read_bits(&mut self, n_bits: u32) -> Result<u32> {
        debug_assert!(n_bits <= 32);

        let mut value = 0u32;
        let mut needed = n_bits;
        while needed > 0 {
            if self.remaining == 0 {
                self.load_byte()?;
            }
            let take = needed.min(self.remaining);
            let shift = self.remaining - take;
            let chunk = (self.current as u32 >> shift) & ((1u32 << take) - 1);

            value = (value << take) | chunk;
            self.remaining -= take;
            needed -= take;
        }
        Ok(value)
    }

    /// Decode the next entry
    pub fn read_entry(&mut self) -> Result<Entry> {
        if self.read_bit()? == 1 {
            let byte = self.read_bits(8)? as u8;
            return Ok(Entry::Literal(byte));
        }

        let address = self.read_bits(OFFSET_BITS)? as usize;
        let length = self.read_bits(LENGTH_BITS)? as usize + MIN_MATCH;
        if address == 0 {
            // Address 0 is never a match target; its length field is ignored
            return Ok(Entry::End);
        }
        Ok(Entry::Match { address, length })
    }
}
