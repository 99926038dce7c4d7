//! Decompression state management
//!
//! The decoder keeps a mirror of the encoder's dictionary: same size, same
//! zeroed start, same first write address. Matches are copied one byte at a
//! time through the window so a match may overlap the bytes it produces.

use super::decoder::Entry;
use crate::common::{CompressionStats, LzssError, DICT_MASK, DICT_SIZE, DICT_START};
use crate::Result;

/// Mirror dictionary plus output accounting
#[derive(Debug)]
pub struct DecodeState {
    window: Vec<u8>,
    cursor: usize,
    produced: usize,
    limit: Option<usize>,
    stats: CompressionStats,
}

impl DecodeState {
    /// Create a new decompression state
    pub fn new() -> Self {
        Self {
            window: vec![0; DICT_SIZE],
            cursor: DICT_START,
            produced: 0,
            limit: None,
            stats: CompressionStats::default(),
        }
    }

    /// Create a state that refuses to produce more than `limit` bytes
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit: Some(limit),
            ..Self::new()
        }
    }

    /// Total bytes produced so far
    pub fn produced(&self) -> usize {
        self.produced
    }

    /// Entry statistics gathered so far
    pub fn stats(&self) -> &CompressionStats {
        &self.stats
    }

    fn reserve(&self, count: usize) -> Result<()> {
        match self.limit {
            Some(limit) if self.produced + count > limit => {
                Err(LzssError::OutputLimitExceeded { limit })
            }
            _ => Ok(()),
        }
    }

    #[inline]
    fn push(&mut self, byte: u8, out: &mut Vec<u8>) {
        self.window[self.cursor] = byte;
        self.cursor = (self.cursor + 1) & DICT_MASK;
        out.push(byte);
    }

    /// Apply one entry, appending its bytes to `out`
    ///
    /// Returns `false` for the terminator.
    pub fn expand(&mut self, entry: Entry, out: &mut Vec<u8>) -> Result<bool> {
        match entry {
            Entry::Literal(byte) => {
                self.reserve(1)?;
                self.push(byte, out);
                self.produced += 1;
                self.stats.record_literal();
            }
            Entry::Match { address, length } => {
                self.reserve(length)?;
                for i in 0..length {
                    let byte = self.window[(address + i) & DICT_MASK];
                    self.push(byte, out);
                }
                self.produced += length;
                self.stats.record_match(length);
            }
            Entry::End => return Ok(false),
        }
        Ok(true)
    }
}

impl Default for DecodeState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literals_then_match() {
        let mut state = DecodeState::new();
        let mut out = Vec::new();
        state.expand(Entry::Literal(b'A'), &mut out).unwrap();
        state.expand(Entry::Literal(b'B'), &mut out).unwrap();
        state
            .expand(
                Entry::Match {
                    address: 1,
                    length: 6,
                },
                &mut out,
            )
            .unwrap();
        assert_eq!(out, b"ABABABAB");
        assert_eq!(state.produced(), 8);
        assert_eq!(state.stats().literal_count, 2);
        assert_eq!(state.stats().match_count, 1);
    }

    #[test]
    fn test_end_entry() {
        let mut state = DecodeState::new();
        let mut out = Vec::new();
        assert!(!state.expand(Entry::End, &mut out).unwrap());
        assert!(out.is_empty());
    }

    #[test]
    fn test_match_into_untouched_window_yields_zeros() {
        let mut state = DecodeState::new();
        let mut out = Vec::new();
        state
            .expand(
                Entry::Match {
                    address: 4000,
                    length: 3,
                },
                &mut out,
            )
            .unwrap();
        assert_eq!(out, vec![0, 0, 0]);
    }

    #[test]
    fn test_match_wraps_around_window_end() {
        let mut state = DecodeState::new();
        let mut out = Vec::new();
        // Fill the window until the cursor comes back to address 2
        for i in 0..DICT_SIZE + 1 {
            state.expand(Entry::Literal(i as u8), &mut out).unwrap();
        }
        out.clear();
        state
            .expand(
                Entry::Match {
                    address: DICT_MASK,
                    length: 3,
                },
                &mut out,
            )
            .unwrap();
        // Addresses 8191, 0, 1 hold the last literals written there
        let expected = vec![(DICT_SIZE - 2) as u8, (DICT_SIZE - 1) as u8, DICT_SIZE as u8];
        assert_eq!(out, expected);
    }

    #[test]
    fn test_limit() {
        let mut state = DecodeState::with_limit(4);
        let mut out = Vec::new();
        state.expand(Entry::Literal(1), &mut out).unwrap();
        let err = state
            .expand(
                Entry::Match {
                    address: 1,
                    length: 4,
                },
                &mut out,
            )
            .unwrap_err();
        assert!(matches!(err, LzssError::OutputLimitExceeded { limit: 4 }));
        assert_eq!(out.len(), 1);
    }
}
