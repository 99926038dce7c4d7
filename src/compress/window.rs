//! Circular dictionary window
//!
//! The window is 8 KiB of history addressed modulo its size. The 18 slots
//! starting at the write cursor hold lookahead bytes that have been read from
//! the source but not yet emitted; everything else is matchable history.
//! Writing starts at address 1 so that address 0 never becomes a match
//! target.

use super::hash::MatchIndex;
use crate::common::{DICT_MASK, DICT_SIZE, DICT_START, HASH_NULL, MAX_MATCH};
use crate::source::ByteSource;

/// Dictionary bytes plus the cursor and lookahead bookkeeping
#[derive(Debug)]
pub struct DictionaryWindow {
    bytes: Vec<u8>,
    /// Write cursor; the first lookahead byte lives here
    head: usize,
    /// Lookahead bytes still to be emitted (0..=MAX_MATCH)
    waiting: usize,
}

impl DictionaryWindow {
    /// Create a zeroed window with the cursor at the first usable address
    pub fn new() -> Self {
        Self {
            bytes: vec![0; DICT_SIZE],
            head: DICT_START,
            waiting: 0,
        }
    }

    /// Byte at `addr`, wrapping around the end of the dictionary
    #[inline]
    pub fn byte_at(&self, addr: usize) -> u8 {
        self.bytes[addr & DICT_MASK]
    }

    #[cfg(test)]
    pub(super) fn set(&mut self, addr: usize, byte: u8) {
        self.bytes[addr & DICT_MASK] = byte;
    }

    /// Current write cursor
    pub fn head(&self) -> usize {
        self.head
    }

    /// Number of lookahead bytes not yet emitted
    pub fn waiting(&self) -> usize {
        self.waiting
    }

    /// Fill the lookahead from `source`, stopping early at end of input
    pub fn prime<S: ByteSource>(&mut self, source: &mut S) -> Result<(), S::Error> {
        while self.waiting < MAX_MATCH {
            match source.next_byte()? {
                Some(byte) => {
                    self.bytes[(self.head + self.waiting) & DICT_MASK] = byte;
                    self.waiting += 1;
                }
                None => break,
            }
        }
        Ok(())
    }

    /// Length of the common prefix of the lookahead and the bytes at
    /// `candidate`, capped at `limit`
    pub fn match_length(&self, candidate: usize, limit: usize) -> usize {
        (0..limit)
            .take_while(|&i| self.byte_at(self.head + i) == self.byte_at(candidate + i))
            .count()
    }

    /// Retire the byte under the cursor
    ///
    /// The slot just past the lookahead leaves the index and takes the next
    /// input byte, the cursor position joins the index, and the cursor moves
    /// on. `waiting` only grows when the source produced a byte, so it drains
    /// to zero once the input is exhausted.
    pub fn advance_and_refill<S: ByteSource>(
        &mut self,
        index: &mut MatchIndex,
        source: &mut S,
    ) -> Result<(), S::Error> {
        let incoming = (self.head + MAX_MATCH) & DICT_MASK;
        if incoming != HASH_NULL {
            index.remove(MatchIndex::key_of(self, incoming), incoming);
        }

        if let Some(byte) = source.next_byte()? {
            self.bytes[incoming] = byte;
            self.waiting += 1;
        }

        if self.head != HASH_NULL {
            index.insert(MatchIndex::key_of(self, self.head), self.head);
        }

        self.head = (self.head + 1) & DICT_MASK;
        self.waiting -= 1;
        Ok(())
    }
}

impl Default for DictionaryWindow {
    fn default() -> Self {
        Self::new()
    }
}
