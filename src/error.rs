//! Error types for the driver
//!
//! This module defines error types for configuration building ([`ConfigError`])
//! and display operations ([`Error`]).
//!
//! ## Error Types
//!
//! - [`ConfigError`] - Malformed constructor arguments, raised before any GPIO line is touched
//! - [`Error`] - Runtime errors from rendering and refreshing
//! - [`PinBankError`](crate::interface::PinBankError) - Low-level errors of the pin-bank backend
//!
//! ## Example
//!
//! ```
//! use sevseg_mux::{Builder, ConfigError};
//!
//! // Seven segment lines instead of eight
//! let result = Builder::new()
//!     .digit_lines(&[16, 17, 18, 19])
//!     .segment_lines(&[15, 14, 13, 12, 11, 10, 9])
//!     .build();
//! assert!(matches!(result, Err(ConfigError::WrongSegmentCount { provided: 7 })));
//!
//! // No digit lines at all
//! let result = Builder::new()
//!     .segment_lines(&[15, 14, 13, 12, 11, 10, 9, 8])
//!     .build();
//! assert!(matches!(result, Err(ConfigError::NoDigits)));
//! ```

use crate::config::LineId;
use crate::glyph::{SEGMENT_COUNT, UnsupportedCharacter};
use crate::interface::GpioBackend;

/// Maximum number of digit-select lines one display can drive
pub const MAX_DIGITS: usize = 16;

/// Number of addressable GPIO lines (line ids are `0..MAX_LINES`)
///
/// Lines are addressed by a 32-bit mask, one bit per line.
pub const MAX_LINES: u8 = 32;

/// Errors that can occur when interacting with the display
///
/// Generic over the backend type to preserve the specific error type.
#[derive(Debug)]
pub enum Error<G: GpioBackend> {
    /// GPIO backend error
    ///
    /// Wraps the underlying error from the [`GpioBackend`] implementation.
    Interface(G::Error),
    /// Digit index outside the configured digit count
    DigitOutOfRange {
        /// Requested digit index
        index: usize,
        /// Number of configured digits
        digits: usize,
    },
    /// Segment index outside `0..8`
    SegmentOutOfRange {
        /// Requested segment index
        index: usize,
    },
    /// Character absent from the glyph table
    UnsupportedCharacter(char),
    /// Text holds more characters than the display has digits
    StringTooLong {
        /// Offending length in characters
        len: usize,
        /// Largest accepted length
        max: usize,
    },
    /// Text holds more separators than the display can place
    ///
    /// Also raised when the blanks inserted between doubled separators leave
    /// more characters than the display has digits; `padded_len` is set then.
    TooManySeparators {
        /// Separators in the text
        count: usize,
        /// Number of digits, the most separators and characters the display holds
        max: usize,
        /// Characters to render once blanks are inserted, if that overflows
        padded_len: Option<usize>,
    },
}

impl<G: GpioBackend> From<UnsupportedCharacter> for Error<G> {
    fn from(err: UnsupportedCharacter) -> Self {
        Self::UnsupportedCharacter(err.0)
    }
}

impl<G: GpioBackend> core::fmt::Display for Error<G> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Interface(e) => write!(f, "Interface error: {e:?}"),
            Self::DigitOutOfRange { index, digits } => {
                write!(f, "Digit {index} out of range (display has {digits} digits)")
            }
            Self::SegmentOutOfRange { index } => {
                write!(f, "Segment {index} out of range (max {})", SEGMENT_COUNT - 1)
            }
            Self::UnsupportedCharacter(c) => write!(f, "Unsupported character: {c:?}"),
            Self::StringTooLong { len, max } => {
                write!(f, "String too long: {len} characters, max {max}")
            }
            Self::TooManySeparators {
                count,
                max,
                padded_len: None,
            } => write!(f, "Too many separators: {count}, max {max}"),
            Self::TooManySeparators {
                count,
                max,
                padded_len: Some(padded_len),
            } => write!(
                f,
                "Too many separators: {count} need {padded_len} digits once padded, max {max}"
            ),
        }
    }
}

impl<G: GpioBackend + core::fmt::Debug> core::error::Error for Error<G> {}

/// Errors that can occur when building configuration
///
/// These errors occur before the display is created, so no GPIO line has been
/// claimed when one is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Segment line sequence does not hold exactly eight lines
    WrongSegmentCount {
        /// Number of segment lines provided
        provided: usize,
    },
    /// Digit line sequence is empty
    NoDigits,
    /// More digit lines than [`MAX_DIGITS`]
    TooManyDigits {
        /// Number of digit lines provided
        provided: usize,
    },
    /// Line id not addressable by the 32-bit line mask
    LineOutOfRange {
        /// Offending line id
        line: LineId,
    },
    /// Same line listed twice across digit and segment lines
    DuplicateLine {
        /// Offending line id
        line: LineId,
    },
    /// One multiplex pass would last longer than `u32::MAX` microseconds
    TimingOverflow {
        /// Configured on-time in microseconds
        on_time_us: u32,
        /// Configured inter-digit delay in microseconds
        digit_delay_us: u32,
    },
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::WrongSegmentCount { provided } => {
                write!(f, "Expected {SEGMENT_COUNT} segment lines, got {provided}")
            }
            Self::NoDigits => write!(f, "At least one digit line must be specified"),
            Self::TooManyDigits { provided } => {
                write!(f, "Too many digit lines: {provided} (max {MAX_DIGITS})")
            }
            Self::LineOutOfRange { line } => {
                write!(f, "Line {line} out of range (max {})", MAX_LINES - 1)
            }
            Self::DuplicateLine { line } => write!(f, "Line {line} listed more than once"),
            Self::TimingOverflow {
                on_time_us,
                digit_delay_us,
            } => write!(
                f,
                "Refresh pass too long: on-time {on_time_us}us, digit delay {digit_delay_us}us"
            ),
        }
    }
}

impl core::error::Error for ConfigError {}
