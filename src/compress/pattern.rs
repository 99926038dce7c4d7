//! Greedy match search
//!
//! For the lookahead at the cursor, walk the hash chain of its first three
//! bytes and keep the longest common prefix. The chain runs from the most
//! recent address backwards and only a strictly longer match replaces the
//! current best, so among equally long matches the closest one wins.

use super::hash::MatchIndex;
use super::state::Encoder;
use crate::common::MIN_MATCH;

/// Result of a match search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchResult {
    /// Length of the match (0 if nothing was found)
    pub length: usize,
    /// Absolute dictionary address of the match (0 if nothing was found)
    pub address: usize,
}

impl MatchResult {
    /// Create a new match result
    pub fn new(length: usize, address: usize) -> Self {
        Self { length, address }
    }

    /// Create a "no match" result
    pub fn no_match() -> Self {
        Self {
            length: 0,
            address: 0,
        }
    }

    /// Check if this is long enough to be emitted as a match entry
    pub fn is_match(&self) -> bool {
        self.length >= MIN_MATCH
    }
}

impl Encoder {
    /// Find the longest match for the lookahead at the cursor
    pub fn find_match(&self) -> MatchResult {
        let window = &self.window;
        let limit = window.waiting();
        let key = MatchIndex::key_of(window, window.head());

        let mut best = MatchResult::no_match();
        for candidate in self.index.chain_from(key) {
            let length = window.match_length(candidate, limit);
            if length > best.length {
                best = MatchResult::new(length, candidate);
                // Nothing can beat a match covering the whole lookahead
                if length == limit {
                    break;
                }
            }
        }

        if best.length < MIN_MATCH {
            return MatchResult::no_match();
        }
        best
    }
}
