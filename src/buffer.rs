//! Per-digit segment buffer

use heapless::Vec;

use crate::error::MAX_DIGITS;
use crate::glyph::BLANK;

/// Segment masks for every digit, leftmost digit first
///
/// Each entry uses the [`glyph`](crate::glyph) bit order (bit 7 = segment A,
/// bit 0 = decimal point). The refresher reads it, the renderer writes it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisplayBuffer {
    masks: Vec<u8, MAX_DIGITS>,
}

impl DisplayBuffer {
    /// Buffer for `digits` digits, every segment off
    ///
    /// `digits` is clamped to [`MAX_DIGITS`].
    pub fn new(digits: usize) -> Self {
        let mut masks = Vec::new();
        // length is clamped to capacity, so resize cannot fail
        let _ = masks.resize(digits.min(MAX_DIGITS), BLANK);
        Self { masks }
    }

    /// Number of digits
    pub fn len(&self) -> usize {
        self.masks.len()
    }

    /// Whether the buffer has no digits
    pub fn is_empty(&self) -> bool {
        self.masks.is_empty()
    }

    /// Mask of digit `index`
    pub fn get(&self, index: usize) -> Option<u8> {
        self.masks.get(index).copied()
    }

    /// Replace the mask of digit `index`, returning `false` if out of range
    pub(crate) fn set(&mut self, index: usize, mask: u8) -> bool {
        self.masks.get_mut(index).map(|entry| *entry = mask).is_some()
    }

    /// OR `bits` into digit `index`, returning `false` if out of range
    pub(crate) fn merge(&mut self, index: usize, bits: u8) -> bool {
        self.masks.get_mut(index).map(|entry| *entry |= bits).is_some()
    }

    /// Turn every segment off
    pub(crate) fn clear(&mut self) {
        self.masks.iter_mut().for_each(|entry| *entry = BLANK);
    }

    /// All masks, leftmost digit first
    pub fn as_slice(&self) -> &[u8] {
        &self.masks
    }

    /// Iterate over the masks
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        self.masks.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_buffer_is_blank() {
        let buffer = DisplayBuffer::new(4);
        assert_eq!(buffer.len(), 4);
        assert_eq!(buffer.as_slice(), &[BLANK; 4]);
    }

    #[test]
    fn test_new_clamps_to_max_digits() {
        assert_eq!(DisplayBuffer::new(MAX_DIGITS + 5).len(), MAX_DIGITS);
    }

    #[test]
    fn test_set_replaces_and_merge_ors() {
        let mut buffer = DisplayBuffer::new(2);
        assert!(buffer.set(0, 0b1100_0000));
        assert!(buffer.set(0, 0b0000_0011));
        assert_eq!(buffer.get(0), Some(0b0000_0011));

        assert!(buffer.merge(1, 0b1000_0000));
        assert!(buffer.merge(1, 0b0000_0001));
        assert_eq!(buffer.get(1), Some(0b1000_0001));
    }

    #[test]
    fn test_out_of_range_access() {
        let mut buffer = DisplayBuffer::new(2);
        assert!(!buffer.set(2, 0xFF));
        assert!(!buffer.merge(5, 0xFF));
        assert_eq!(buffer.get(2), None);
        assert_eq!(buffer.as_slice(), &[BLANK; 2]);
    }

    #[test]
    fn test_clear() {
        let mut buffer = DisplayBuffer::new(3);
        buffer.set(0, 0xFF);
        buffer.set(2, 0x0F);
        buffer.clear();
        assert!(buffer.iter().all(|mask| mask == BLANK));
    }
}
