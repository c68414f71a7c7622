//! Display configuration types and builder

use heapless::Vec;

pub use crate::error::{ConfigError, MAX_DIGITS, MAX_LINES};
use crate::glyph::SEGMENT_COUNT;

/// GPIO number of a digit-select or segment-select line
pub type LineId = u8;

/// Default time each digit stays lit per pass, in microseconds
pub const DEFAULT_ON_TIME_US: u32 = 5_000;

/// Default pause between two digits, in microseconds
pub const DEFAULT_DIGIT_DELAY_US: u32 = 0;

/// Set of GPIO lines, one bit per [`LineId`]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct LineMask(u32);

impl LineMask {
    /// Mask with no lines
    pub const EMPTY: Self = Self(0);

    /// Create a mask from raw bits
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Mask holding a single line
    ///
    /// Lines at or above [`MAX_LINES`] are not representable and yield an empty mask.
    pub const fn line(line: LineId) -> Self {
        if line < MAX_LINES {
            Self(1 << line)
        } else {
            Self::EMPTY
        }
    }

    /// Mask holding every line in `lines`
    pub fn from_lines(lines: &[LineId]) -> Self {
        lines.iter().fold(Self::EMPTY, |mask, &line| mask.with(line))
    }

    /// This mask with `line` added
    #[must_use]
    pub const fn with(self, line: LineId) -> Self {
        Self(self.0 | Self::line(line).0)
    }

    /// Whether `line` is part of this mask
    pub const fn contains(self, line: LineId) -> bool {
        line < MAX_LINES && self.0 & (1 << line) != 0
    }

    /// Number of lines in this mask
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// Whether the mask holds no lines
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Raw bits, bit `n` standing for line `n`
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Iterate over the lines in this mask, lowest first
    pub fn lines(self) -> impl Iterator<Item = LineId> {
        (0..MAX_LINES).filter(move |&line| self.contains(line))
    }
}

impl core::ops::BitOr for LineMask {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Wiring polarity of the display
///
/// Decides which physical level energizes a digit or a segment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Polarity {
    /// Digits share a cathode: a digit is selected by driving its line low,
    /// a segment lights when its line is driven high
    #[default]
    CommonCathode,
    /// Digits share an anode: a digit is selected by driving its line high,
    /// a segment lights when its line is driven low
    CommonAnode,
}

impl Polarity {
    /// Whether a selected digit line is driven high
    pub const fn digit_active_high(self) -> bool {
        matches!(self, Self::CommonAnode)
    }

    /// Whether a lit segment line is driven high
    pub const fn segment_active_high(self) -> bool {
        matches!(self, Self::CommonCathode)
    }
}

/// Display configuration
///
/// Immutable once built; use [`Builder`] to create one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    digit_lines: Vec<LineId, MAX_DIGITS>,
    segment_lines: [LineId; SEGMENT_COUNT],
    polarity: Polarity,
    on_time_us: u32,
    digit_delay_us: u32,
}

impl Config {
    /// Digit-select lines, leftmost digit first
    pub fn digit_lines(&self) -> &[LineId] {
        &self.digit_lines
    }

    /// Segment-select lines in A, B, C, D, E, F, G, P order
    pub fn segment_lines(&self) -> &[LineId; SEGMENT_COUNT] {
        &self.segment_lines
    }

    /// Number of digits on the display
    pub fn digit_count(&self) -> usize {
        self.digit_lines.len()
    }

    /// Wiring polarity
    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    /// Time each digit stays lit per pass, in microseconds
    pub fn on_time_us(&self) -> u32 {
        self.on_time_us
    }

    /// Pause after each digit, in microseconds
    pub fn digit_delay_us(&self) -> u32 {
        self.digit_delay_us
    }

    /// Mask of every digit-select line
    pub fn digit_mask(&self) -> LineMask {
        LineMask::from_lines(&self.digit_lines)
    }

    /// Mask of every segment-select line
    pub fn segment_mask(&self) -> LineMask {
        LineMask::from_lines(&self.segment_lines)
    }

    /// Duration of one multiplex pass, in microseconds
    ///
    /// Never overflows: [`Builder::build`] rejects configurations where it would.
    pub fn pass_duration_us(&self) -> u32 {
        pass_duration_us(self.digit_count(), self.on_time_us, self.digit_delay_us)
            .unwrap_or(u32::MAX)
    }

    /// Lines to assert for a segment mask (bit 7 = segment A)
    pub fn segment_lines_for(&self, mask: u8) -> LineMask {
        self.segment_lines
            .iter()
            .enumerate()
            .filter(|(index, _)| mask & (0x80 >> index) != 0)
            .fold(LineMask::EMPTY, |lines, (_, &line)| lines.with(line))
    }
}

fn pass_duration_us(digits: usize, on_time_us: u32, digit_delay_us: u32) -> Option<u32> {
    let digits = u32::try_from(digits).ok()?;
    on_time_us.checked_add(digit_delay_us)?.checked_mul(digits)
}

/// Builder for constructing display configuration
///
/// # Example
///
/// ```
/// use sevseg_mux::{Builder, Polarity};
///
/// let config = match Builder::new()
///     .digit_lines(&[16, 17, 18, 19])
///     .segment_lines(&[15, 14, 13, 12, 11, 10, 9, 8])
///     .polarity(Polarity::CommonCathode)
///     .on_time_us(2_000)
///     .build()
/// {
///     Ok(config) => config,
///     Err(_) => return,
/// };
/// assert_eq!(config.digit_count(), 4);
/// assert_eq!(config.pass_duration_us(), 8_000);
/// ```
#[must_use]
#[derive(Clone, Copy, Debug)]
pub struct Builder<'a> {
    /// Digit-select lines (required, at least one)
    digit_lines: &'a [LineId],
    /// Segment-select lines (required, exactly eight)
    segment_lines: &'a [LineId],
    /// Wiring polarity
    polarity: Polarity,
    /// On-time per digit in microseconds
    on_time_us: u32,
    /// Inter-digit delay in microseconds
    digit_delay_us: u32,
}

impl Default for Builder<'_> {
    fn default() -> Self {
        Self {
            digit_lines: &[],
            segment_lines: &[],
            polarity: Polarity::CommonCathode,
            on_time_us: DEFAULT_ON_TIME_US,
            digit_delay_us: DEFAULT_DIGIT_DELAY_US,
        }
    }
}

impl<'a> Builder<'a> {
    /// Create a new Builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set digit-select lines, leftmost digit first (required)
    pub fn digit_lines(mut self, lines: &'a [LineId]) -> Self {
        self.digit_lines = lines;
        self
    }

    /// Set segment-select lines in A..G, P order (required)
    pub fn segment_lines(mut self, lines: &'a [LineId]) -> Self {
        self.segment_lines = lines;
        self
    }

    /// Set wiring polarity
    pub fn polarity(mut self, polarity: Polarity) -> Self {
        self.polarity = polarity;
        self
    }

    /// Set how long each digit stays lit per pass
    ///
    /// Longer on-times give a brighter digit but a lower frame rate.
    pub fn on_time_us(mut self, us: u32) -> Self {
        self.on_time_us = us;
        self
    }

    /// Set the pause between two digits
    pub fn digit_delay_us(mut self, us: u32) -> Self {
        self.digit_delay_us = us;
        self
    }

    /// Build the configuration
    ///
    /// Checks run in order and stop at the first violation: segment count,
    /// digit count, line ids, duplicate lines, pass duration.
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigError`] for the first check that fails.
    pub fn build(self) -> Result<Config, ConfigError> {
        let segment_lines: [LineId; SEGMENT_COUNT] =
            self.segment_lines
                .try_into()
                .map_err(|_| ConfigError::WrongSegmentCount {
                    provided: self.segment_lines.len(),
                })?;

        if self.digit_lines.is_empty() {
            return Err(ConfigError::NoDigits);
        }
        let digit_lines =
            Vec::from_slice(self.digit_lines).map_err(|()| ConfigError::TooManyDigits {
                provided: self.digit_lines.len(),
            })?;

        let mut seen = LineMask::EMPTY;
        for &line in self.digit_lines.iter().chain(segment_lines.iter()) {
            if line >= MAX_LINES {
                return Err(ConfigError::LineOutOfRange { line });
            }
            if seen.contains(line) {
                return Err(ConfigError::DuplicateLine { line });
            }
            seen = seen.with(line);
        }

        if pass_duration_us(self.digit_lines.len(), self.on_time_us, self.digit_delay_us).is_none()
        {
            return Err(ConfigError::TimingOverflow {
                on_time_us: self.on_time_us,
                digit_delay_us: self.digit_delay_us,
            });
        }

        Ok(Config {
            digit_lines,
            segment_lines,
            polarity: self.polarity,
            on_time_us: self.on_time_us,
            digit_delay_us: self.digit_delay_us,
        })
    }
}
