//! Bit-level output buffer
//!
//! Entries are packed most-significant bit first and run straight across
//! byte boundaries; nothing is aligned until the final byte is padded.

/// Growable MSB-first bit writer
#[derive(Debug)]
pub struct BitWriter {
    /// Completed bytes
    buffer: Vec<u8>,
    /// Partially filled byte, filled from bit 7 downwards
    current: u8,
    /// Number of bits used in `current` (0..8)
    used: u32,
    /// Bytes already handed out by `take_complete_bytes`
    drained: usize,
}

impl BitWriter {
    /// Create a writer with the given initial byte capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(capacity),
            current: 0,
            used: 0,
            drained: 0,
        }
    }

    /// Append a single bit (only the lowest bit of `bit` is used)
    pub fn write_bit(&mut self, bit: u32) {
        self.write_bits(1, bit);
    }

    /// Append the low `n_bits` bits of `value`, most significant first
    pub fn write_bits(&mut self, n_bits: u32, value: u32) {
        debug_assert!(n_bits <= 32);

        let mut remaining = n_bits;
        while remaining > 0 {
            let free = 8 - self.used;
            let take = remaining.min(free);
            let chunk = (value >> (remaining - take)) & ((1u32 << take) - 1);

            self.current |= (chunk << (free - take)) as u8;
            self.used += take;
            remaining -= take;

            if self.used == 8 {
                self.buffer.push(self.current);
                self.current = 0;
                self.used = 0;
            }
        }
    }

    /// Total number of bits written so far
    pub fn bit_len(&self) -> usize {
        (self.drained + self.buffer.len()) * 8 + self.used as usize
    }

    /// Drain the completed bytes, keeping the partial byte
    pub fn take_complete_bytes(&mut self) -> Vec<u8> {
        self.drained += self.buffer.len();
        std::mem::take(&mut self.buffer)
    }

    /// Zero-pad the partial byte and return the remaining output
    pub fn finish(mut self) -> Vec<u8> {
        if self.used > 0 {
            self.buffer.push(self.current);
        }
        self.buffer
    }
}

impl Default for BitWriter {
    fn default() -> Self {
        Self::with_capacity(2048)
    }
}
