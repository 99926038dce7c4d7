//! Hash chains for fast match lookup
//!
//! Every dictionary address that has left the lookahead is filed under the
//! key of the three bytes starting there. Chains are kept most recent first
//! in flat `prev`/`next` arrays indexed by dictionary address, with 0 as the
//! null link. Address 0 is never filed, which is what lets 0 also mean
//! "empty bucket".
//!
//! Addresses enter and leave the index in the same order as the window
//! slides, so the member being removed is always the oldest one in its chain
//! and only its predecessor needs relinking.

use super::window::DictionaryWindow;
use crate::common::{DICT_MASK, DICT_SIZE, HASH_NULL, HASH_SIZE};

/// Chain heads plus per-address sibling links
#[derive(Debug)]
pub struct MatchIndex {
    /// Most recently inserted address for each key
    hash: Vec<u16>,
    /// Newer neighbour of each address (towards the chain head)
    prev: Vec<u16>,
    /// Older neighbour of each address (towards the chain tail)
    next: Vec<u16>,
}

impl MatchIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self {
            hash: vec![HASH_NULL as u16; HASH_SIZE],
            prev: vec![HASH_NULL as u16; DICT_SIZE],
            next: vec![HASH_NULL as u16; DICT_SIZE],
        }
    }

    /// Key of the three bytes starting at `addr`
    ///
    /// `((b[addr+1] << 8) | b[addr+2]) ^ (b[addr] << 4)`, always below 0x10000.
    pub fn key_of(window: &DictionaryWindow, addr: usize) -> usize {
        let b0 = window.byte_at(addr) as usize;
        let b1 = window.byte_at(addr + 1) as usize;
        let b2 = window.byte_at(addr + 2) as usize;
        ((b1 << 8) | b2) ^ (b0 << 4)
    }

    /// File `addr` at the head of the chain for `key`
    pub fn insert(&mut self, key: usize, addr: usize) {
        debug_assert!(addr != HASH_NULL && addr <= DICT_MASK);

        let head = self.hash[key];
        self.next[addr] = head;
        self.prev[addr] = HASH_NULL as u16;
        if head as usize != HASH_NULL {
            self.prev[head as usize] = addr as u16;
        }
        self.hash[key] = addr as u16;
    }

    /// Detach `addr`, the oldest member of the chain for `key`
    ///
    /// A slot with no newer neighbour empties the bucket. During the first
    /// pass over the dictionary the evicted slots were never filed at all, so
    /// this empties the bucket of their all-zero key; the emitted stream
    /// depends on that.
    pub fn remove(&mut self, key: usize, addr: usize) {
        debug_assert!(addr != HASH_NULL && addr <= DICT_MASK);
        debug_assert_eq!(self.next[addr] as usize, HASH_NULL);

        let newer = self.prev[addr] as usize;
        if newer == HASH_NULL {
            self.hash[key] = HASH_NULL as u16;
        } else {
            self.next[newer] = HASH_NULL as u16;
        }
    }

    /// Most recently inserted address for `key`, if any
    pub fn head(&self, key: usize) -> Option<usize> {
        match self.hash[key] as usize {
            HASH_NULL => None,
            addr => Some(addr),
        }
    }

    /// Walk the chain for `key`, most recent address first
    pub fn chain_from(&self, key: usize) -> Chain<'_> {
        Chain {
            index: self,
            cursor: self.hash[key] as usize,
        }
    }
}

impl Default for MatchIndex {
    fn default() -> Self {
        Self::new()
    }
}

/// Lazy iterator over one hash chain
#[derive(Debug, Clone)]
pub struct Chain<'a> {
    index: &'a MatchIndex,
    cursor: usize,
}

impl Iterator for Chain<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.cursor == HASH_NULL {
            return None;
        }
        let addr = self.cursor;
        self.cursor = self.index.next[addr] as usize;
        Some(addr)
    }
}
