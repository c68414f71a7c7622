//! Glyph table for 7-segment cells
//!
//! Every supported character maps to an 8-bit segment mask. Bit 7 (MSB) is
//! segment A and bit 0 (LSB) is the decimal point:
//!
//! ```text
//!   AAAA
//!  F    B
//!  F    B
//!   GGGG
//!  E    C
//!  E    C
//!   DDDD   P
//!
//!  mask = 0bABCDEFGP
//! ```
//!
//! A 7-segment cell cannot draw every letter, so some characters share a
//! pattern (`K` and `X` look like `H`, `V` like `U`, `Z` like `2`) and `M`/`W`
//! render blank. Lookup of anything outside the table fails; nothing is
//! silently replaced with a blank.
//!
//! ## Example
//!
//! ```
//! use sevseg_mux::glyph::{self, Segment};
//!
//! assert_eq!(glyph::lookup('7'), Ok(0b1110_0000));
//! assert_eq!(glyph::lookup('.'), Ok(Segment::P.bit()));
//! assert!(glyph::lookup('a').is_err());
//! ```

/// Number of segment lines on one cell (A-G plus the decimal point)
pub const SEGMENT_COUNT: usize = 8;

/// Every character [`lookup`] accepts
pub const SUPPORTED: &str = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ -.*_";

/// Mask with every segment off
pub const BLANK: u8 = 0b0000_0000;

/// One segment of a cell, in mask bit order
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Segment {
    /// Top
    A,
    /// Upper right
    B,
    /// Lower right
    C,
    /// Bottom
    D,
    /// Lower left
    E,
    /// Upper left
    F,
    /// Middle
    G,
    /// Decimal point
    P,
}

impl Segment {
    /// All segments, ordered A through P
    pub const ALL: [Self; SEGMENT_COUNT] = [
        Self::A,
        Self::B,
        Self::C,
        Self::D,
        Self::E,
        Self::F,
        Self::G,
        Self::P,
    ];

    /// Segment at `index` (0 = A, 7 = P)
    pub const fn from_index(index: usize) -> Option<Self> {
        if index < SEGMENT_COUNT {
            Some(Self::ALL[index])
        } else {
            None
        }
    }

    /// Position of this segment in the A..P order
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Mask bit for this segment
    pub const fn bit(self) -> u8 {
        0x80 >> self.index()
    }
}

/// The character has no entry in the glyph table
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UnsupportedCharacter(pub char);

impl core::fmt::Display for UnsupportedCharacter {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Unsupported character: {:?}", self.0)
    }
}

impl core::error::Error for UnsupportedCharacter {}

/// Look up the segment mask for `character`
///
/// Letters are upper case only; lower case input is rejected like any other
/// character outside [`SUPPORTED`].
///
/// # Errors
///
/// Returns [`UnsupportedCharacter`] for characters outside the table.
pub const fn lookup(character: char) -> Result<u8, UnsupportedCharacter> {
    let mask = match character {
        '0' => 0b1111_1100,
        '1' => 0b0110_0000,
        '2' => 0b1101_1010,
        '3' => 0b1111_0010,
        '4' => 0b0110_0110,
        '5' => 0b1011_0110,
        '6' => 0b1011_1110,
        '7' => 0b1110_0000,
        '8' => 0b1111_1110,
        '9' => 0b1111_0110,
        'A' => 0b1110_1110,
        'B' => 0b0011_1110, // b
        'C' => 0b1001_1100,
        'D' => 0b0111_1010, // d
        'E' => 0b1001_1110,
        'F' => 0b1000_1110,
        'G' => 0b1011_1100,
        'H' => 0b0110_1110,
        'I' => 0b0000_1100,
        'J' => 0b0111_0000,
        'K' => 0b0110_1110, // same as H
        'L' => 0b0001_1100,
        'M' => BLANK,
        'N' => 0b0010_1010, // n
        'O' => 0b1111_1100,
        'P' => 0b1100_1110,
        'Q' => 0b1110_0110, // q
        'R' => 0b0000_1010, // r
        'S' => 0b1011_0110,
        'T' => 0b0001_1110, // t
        'U' => 0b0111_1100,
        'V' => 0b0111_1100, // same as U
        'W' => BLANK,
        'X' => 0b0110_1110, // same as H
        'Y' => 0b0111_0110, // y
        'Z' => 0b1101_1010, // same as 2
        ' ' => BLANK,
        '-' => 0b0000_0010,
        '.' => 0b0000_0001,
        '*' => 0b1100_0110,
        '_' => 0b0001_0000,
        _ => return Err(UnsupportedCharacter(character)),
    };
    Ok(mask)
}

/// Whether `character` is a dot or comma separator
pub const fn is_separator(character: char) -> bool {
    matches!(character, '.' | ',')
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: [(char, u8); 41] = [
        ('0', 0b1111_1100),
        ('1', 0b0110_0000),
        ('2', 0b1101_1010),
        ('3', 0b1111_0010),
        ('4', 0b0110_0110),
        ('5', 0b1011_0110),
        ('6', 0b1011_1110),
        ('7', 0b1110_0000),
        ('8', 0b1111_1110),
        ('9', 0b1111_0110),
        ('A', 0b1110_1110),
        ('B', 0b0011_1110),
        ('C', 0b1001_1100),
        ('D', 0b0111_1010),
        ('E', 0b1001_1110),
        ('F', 0b1000_1110),
        ('G', 0b1011_1100),
        ('H', 0b0110_1110),
        ('I', 0b0000_1100),
        ('J', 0b0111_0000),
        ('K', 0b0110_1110),
        ('L', 0b0001_1100),
        ('M', 0b0000_0000),
        ('N', 0b0010_1010),
        ('O', 0b1111_1100),
        ('P', 0b1100_1110),
        ('Q', 0b1110_0110),
        ('R', 0b0000_1010),
        ('S', 0b1011_0110),
        ('T', 0b0001_1110),
        ('U', 0b0111_1100),
        ('V', 0b0111_1100),
        ('W', 0b0000_0000),
        ('X', 0b0110_1110),
        ('Y', 0b0111_0110),
        ('Z', 0b1101_1010),
        (' ', 0b0000_0000),
        ('-', 0b0000_0010),
        ('.', 0b0000_0001),
        ('*', 0b1100_0110),
        ('_', 0b0001_0000),
    ];

    #[test]
    fn test_lookup_matches_table() {
        for (character, mask) in TABLE {
            assert_eq!(lookup(character), Ok(mask), "glyph {character:?}");
        }
    }

    #[test]
    fn test_supported_list_matches_table() {
        assert_eq!(SUPPORTED.chars().count(), TABLE.len());
        for character in SUPPORTED.chars() {
            assert!(TABLE.iter().any(|(c, _)| *c == character));
        }
    }

    #[test]
    fn test_aliased_letters_share_patterns() {
        assert_eq!(lookup('K'), lookup('H'));
        assert_eq!(lookup('X'), lookup('H'));
        assert_eq!(lookup('V'), lookup('U'));
        assert_eq!(lookup('Z'), lookup('2'));
        assert_eq!(lookup('M'), Ok(BLANK));
        assert_eq!(lookup('W'), Ok(BLANK));
    }

    #[test]
    fn test_lookup_rejects_unknown_characters() {
        for character in ['a', 'z', ',', '!', '#', 'Ä', '\n'] {
            assert_eq!(lookup(character), Err(UnsupportedCharacter(character)));
        }
    }

    #[test]
    fn test_segment_bits_follow_abcdefgp_order() {
        assert_eq!(Segment::A.bit(), 0b1000_0000);
        assert_eq!(Segment::G.bit(), 0b0000_0010);
        assert_eq!(Segment::P.bit(), 0b0000_0001);
        assert_eq!(Segment::from_index(3), Some(Segment::D));
        assert_eq!(Segment::from_index(8), None);
        for (index, segment) in Segment::ALL.iter().enumerate() {
            assert_eq!(segment.index(), index);
        }
    }

    #[test]
    fn test_separators() {
        assert!(is_separator('.'));
        assert!(is_separator(','));
        assert!(!is_separator('-'));
    }
}
