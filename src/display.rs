//! Core display operations
//!
//! [`Display`] owns the GPIO backend, the configuration and the per-digit
//! buffer. Rendering methods write the buffer; [`Display::refresh_display`]
//! runs one multiplex pass over it.
//!
//! ## Multiplexing
//!
//! Only one digit is energized at a time. Each pass walks the digits left to
//! right:
//!
//! 1. select the digit line
//! 2. light the segment lines set in the digit's mask
//! 3. hold for the on-time
//! 4. turn every segment line off
//! 5. deselect the digit line
//! 6. hold for the digit delay
//!
//! A pass therefore blocks for `digits * (on_time + digit_delay)`. Call it in
//! a tight loop to keep the display lit.

use embedded_hal::delay::DelayNs;
use heapless::Vec;
use log::{debug, trace};

use crate::buffer::DisplayBuffer;
use crate::config::{Config, LineMask};
use crate::error::{Error, MAX_DIGITS};
use crate::glyph::{self, Segment};
use crate::interface::GpioBackend;

type DisplayResult<G> = core::result::Result<(), Error<G>>;

/// Longest text after blanks are inserted around separators
const PADDED_CAPACITY: usize = 3 * MAX_DIGITS + 1;

type Padded = Vec<char, PADDED_CAPACITY>;

/// Multiplexed 7-segment display driver
///
/// The backend lines listed in the [`Config`] are claimed in [`Display::new`]
/// and stay owned by this instance until it is dropped or released.
///
/// The buffer is not locked: when it is written from another context than the
/// one refreshing, the caller serializes access.
#[derive(Debug)]
pub struct Display<G>
where
    G: GpioBackend,
{
    /// GPIO backend
    backend: G,
    /// Display configuration
    config: Config,
    /// Segment masks shown by the next pass
    buffer: DisplayBuffer,
}

impl<G> Display<G>
where
    G: GpioBackend,
{
    /// Create a new Display instance
    ///
    /// Claims every digit line, then every segment line, as an output and
    /// drives all of them to their inactive level. The buffer starts blank.
    ///
    /// # Errors
    ///
    /// Returns `Error::Interface` if the backend refuses a line, together
    /// with the backend so its pins can be reused.
    pub fn new(backend: G, config: Config) -> Result<Self, (G, Error<G>)> {
        let mut display = Self {
            backend,
            buffer: DisplayBuffer::new(config.digit_count()),
            config,
        };
        if let Err(e) = display.claim_lines() {
            debug!("7-segment display setup failed: {e}");
            return Err((display.backend, e));
        }
        debug!(
            "7-segment display ready: {} digits, {:?}, {}us per pass",
            display.config.digit_count(),
            display.config.polarity(),
            display.config.pass_duration_us()
        );
        Ok(display)
    }

    /// Show `character` on digit `index`
    ///
    /// The digit's previous segments are replaced, not merged.
    ///
    /// # Errors
    ///
    /// Returns `Error::DigitOutOfRange` for an index past the last digit and
    /// `Error::UnsupportedCharacter` for characters outside the glyph table.
    pub fn set_digit(&mut self, index: usize, character: char) -> DisplayResult<G> {
        self.check_digit(index)?;
        let mask = glyph::lookup(character)?;
        self.buffer.set(index, mask);
        Ok(())
    }

    /// Light segment `segment` (0 = A .. 7 = P) on digit `index`
    ///
    /// Other segments of the digit are kept.
    ///
    /// # Errors
    ///
    /// Returns `Error::DigitOutOfRange` or `Error::SegmentOutOfRange`.
    pub fn set_digit_segment(&mut self, index: usize, segment: usize) -> DisplayResult<G> {
        self.check_digit(index)?;
        let segment = Segment::from_index(segment)
            .ok_or(Error::SegmentOutOfRange { index: segment })?;
        self.buffer.merge(index, segment.bit());
        Ok(())
    }

    /// Show only the decimal point on digit `index`
    ///
    /// This replaces the digit like `set_digit(index, '.')`. To add a dot to a
    /// digit that already shows a character, use
    /// `set_digit_segment(index, Segment::P.index())`.
    ///
    /// # Errors
    ///
    /// Returns `Error::DigitOutOfRange` for an index past the last digit.
    pub fn set_comma(&mut self, index: usize) -> DisplayResult<G> {
        self.set_digit(index, '.')
    }

    /// Render `text` starting at digit 0
    ///
    /// Dots and commas do not take a digit of their own: they light the
    /// decimal point of the character before them. A leading separator gets
    /// a blank digit to attach to, and a blank is inserted between doubled
    /// separators (`"1,,2"` renders like `"1, ,2"`).
    ///
    /// Digits past the end of `text` keep their content. Capacity checks run
    /// before any digit is written, but a character missing from the glyph
    /// table is only detected when its digit is reached, so digits before it
    /// are already updated when that error is returned.
    ///
    /// # Errors
    ///
    /// - `Error::StringTooLong` if `text` has more than two characters per
    ///   digit, or more non-separator characters than digits
    /// - `Error::TooManySeparators` if there are more separators than digits,
    ///   or the inserted blanks overflow the display
    /// - `Error::UnsupportedCharacter` for characters outside the glyph table
    pub fn set_string(&mut self, text: &str) -> DisplayResult<G> {
        let result = self.render_string(text);
        if let Err(e) = &result {
            debug!("set_string({text:?}) rejected: {e}");
        }
        result
    }

    fn render_string(&mut self, text: &str) -> DisplayResult<G> {
        let digits = self.config.digit_count();
        let capacity = digits * 2;

        let len = text.chars().count();
        if len > capacity {
            return Err(Error::StringTooLong { len, max: capacity });
        }
        let separators = text.chars().filter(|&c| glyph::is_separator(c)).count();
        if separators > digits {
            return Err(Error::TooManySeparators {
                count: separators,
                max: digits,
                padded_len: None,
            });
        }
        if len - separators > digits {
            return Err(Error::StringTooLong {
                len: len - separators,
                max: digits,
            });
        }

        let padded = pad_separators(text).ok_or(Error::TooManySeparators {
            count: separators,
            max: digits,
            padded_len: None,
        })?;
        let padded_len = padded.len() - separators;
        if padded.len() > capacity || padded_len > digits {
            return Err(Error::TooManySeparators {
                count: separators,
                max: digits,
                padded_len: Some(padded_len),
            });
        }

        let characters = padded.iter().copied().filter(|&c| !glyph::is_separator(c));
        for (index, character) in characters.enumerate() {
            self.set_digit(index, character)?;
        }

        // A separator belongs to the closest character on its left; padding
        // guarantees one exists.
        let mut preceding = 0;
        for (position, &character) in padded.iter().enumerate() {
            if glyph::is_separator(character) {
                self.set_digit_segment(position - preceding - 1, Segment::P.index())?;
                preceding += 1;
            }
        }
        Ok(())
    }

    /// Turn every segment of every digit off
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Run one multiplex pass over all digits
    ///
    /// Blocks for [`Config::pass_duration_us`]. At most one digit line is
    /// active at any moment.
    ///
    /// # Errors
    ///
    /// Returns `Error::Interface` if the backend fails to drive a line. The
    /// pass stops there; lines may be left active.
    pub fn refresh_display<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<G> {
        let Self {
            backend,
            config,
            buffer,
        } = self;
        let polarity = config.polarity();
        let digit_on = polarity.digit_active_high();
        let segment_on = polarity.segment_active_high();
        let all_segments = config.segment_mask();

        trace!("refresh pass: {:?}", buffer.as_slice());
        for (&line, mask) in config.digit_lines().iter().zip(buffer.iter()) {
            let digit = LineMask::line(line);
            drive(backend, digit, digit_on)?;
            drive(backend, config.segment_lines_for(mask), segment_on)?;
            delay.delay_us(config.on_time_us());
            drive(backend, all_segments, !segment_on)?;
            drive(backend, digit, !digit_on)?;
            delay.delay_us(config.digit_delay_us());
        }
        Ok(())
    }

    /// Drive every line inactive and hand the backend back
    ///
    /// # Errors
    ///
    /// Returns `Error::Interface` if a line cannot be switched off, together
    /// with the backend.
    pub fn release(mut self) -> Result<G, (G, Error<G>)> {
        match self.deactivate_all() {
            Ok(()) => {
                debug!("7-segment display released");
                Ok(self.backend)
            }
            Err(e) => {
                debug!("7-segment display released with lines still driven: {e}");
                Err((self.backend, e))
            }
        }
    }

    /// Get the display configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get the segment buffer
    pub fn buffer(&self) -> &DisplayBuffer {
        &self.buffer
    }

    /// Segment mask of digit `index`
    pub fn digit(&self, index: usize) -> Option<u8> {
        self.buffer.get(index)
    }

    fn check_digit(&self, index: usize) -> DisplayResult<G> {
        let digits = self.config.digit_count();
        if index >= digits {
            return Err(Error::DigitOutOfRange { index, digits });
        }
        Ok(())
    }

    fn claim_lines(&mut self) -> DisplayResult<G> {
        let Self {
            backend, config, ..
        } = self;
        for &line in config.digit_lines().iter().chain(config.segment_lines()) {
            backend.configure_output(line).map_err(Error::Interface)?;
        }
        self.deactivate_all()
    }

    fn deactivate_all(&mut self) -> DisplayResult<G> {
        let polarity = self.config.polarity();
        let digits = self.config.digit_mask();
        let segments = self.config.segment_mask();
        drive(&mut self.backend, digits, !polarity.digit_active_high())?;
        drive(&mut self.backend, segments, !polarity.segment_active_high())
    }
}

fn drive<G: GpioBackend>(backend: &mut G, lines: LineMask, high: bool) -> DisplayResult<G> {
    let result = if high {
        backend.set_lines(lines)
    } else {
        backend.clear_lines(lines)
    };
    result.map_err(Error::Interface)
}

/// Copy `text` with a blank before a leading separator and between doubled ones
///
/// Pairs are matched left to right without overlap, commas first, then dots.
fn pad_separators(text: &str) -> Option<Padded> {
    let mut chars = Padded::new();
    if text.chars().next().is_some_and(glyph::is_separator) {
        chars.push(' ').ok()?;
    }
    for c in text.chars() {
        chars.push(c).ok()?;
    }
    let chars = split_pairs(&chars, ',')?;
    split_pairs(&chars, '.')
}

fn split_pairs(chars: &[char], separator: char) -> Option<Padded> {
    let mut out = Padded::new();
    let mut index = 0;
    while index < chars.len() {
        if chars[index] == separator && chars.get(index + 1) == Some(&separator) {
            out.extend_from_slice(&[separator, ' ', separator]).ok()?;
            index += 2;
        } else {
            out.push(chars[index]).ok()?;
            index += 1;
        }
    }
    Some(out)
}
