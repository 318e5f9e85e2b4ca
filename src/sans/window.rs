//! The ten-bit sliding window.

use super::table::Codeword;

/// Bits per symbol.
pub const SYMBOL_BITS: usize = 10;

/// A recovered bit and the sample index of its centre.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitSample {
    pub level: bool,
    pub center: u64,
}

/// Up to ten of the most recently sampled bits.
///
/// The newest bit is held in bit 0 of the codeword, and bit centres are kept
/// newest-first so a symbol's sample span can be rebuilt once it is decoded.
#[derive(Debug, Clone)]
pub struct Window {
    bits: u16,
    centers: [u64; SYMBOL_BITS],
    len: usize,
}

impl Window {
    pub const fn new() -> Self {
        Self {
            bits: 0,
            centers: [0; SYMBOL_BITS],
            len: 0,
        }
    }

    /// Shift in a bit, dropping the oldest once ten are held.
    pub fn push(&mut self, sample: BitSample) {
        self.bits = (self.bits << 1 | sample.level as u16) & 0x3FF;

        self.centers.copy_within(..SYMBOL_BITS - 1, 1);
        self.centers[0] = sample.center;

        self.len = (self.len + 1).min(SYMBOL_BITS);
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len == SYMBOL_BITS
    }

    pub fn codeword(&self) -> Codeword {
        Codeword::new(self.bits)
    }

    /// First and last sample (inclusive) covered by the held bits, given half
    /// a bit period in samples.
    pub fn span(&self, half_bit: u64) -> (u64, u64) {
        let newest = self.centers[0];
        let oldest = self.centers[self.len.saturating_sub(1)];

        (oldest.saturating_sub(half_bit), newest.saturating_add(half_bit))
    }

    pub fn clear(&mut self) {
        *self = Self::new();
    }
}

impl Default for Window {
    fn default() -> Self {
        Self::new()
    }
}
