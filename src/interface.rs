//! GPIO backend abstraction
//!
//! This module provides the [`GpioBackend`] trait the display drives its lines
//! through, and the [`PinBank`] struct implementing it over `embedded-hal`
//! output pins.
//!
//! ## Hardware Requirements
//!
//! A multiplexed display needs:
//! - one output line per digit (digit select, shared cathode or anode)
//! - eight output lines for segments A-G and the decimal point, shared by all digits
//!
//! ## Example
//!
//! ```rust
//! use embedded_hal::digital::OutputPin;
//! use sevseg_mux::{GpioBackend, LineMask, PinBank};
//! # use core::convert::Infallible;
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl OutputPin for MockPin {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! let mut bank = PinBank::new([MockPin, MockPin, MockPin]);
//!
//! // Lines must be claimed before they can be driven
//! let _ = bank.configure_output(0);
//! let _ = bank.configure_output(2);
//! assert!(bank.set_lines(LineMask::from_lines(&[0, 2])).is_ok());
//! assert!(bank.set_lines(LineMask::line(1)).is_err());
//! ```

use core::fmt::Debug;

use embedded_hal::digital::OutputPin;

use crate::config::{LineId, LineMask};
use crate::error::MAX_LINES;

/// Trait for the GPIO lines driving the display
///
/// Lines are addressed by [`LineId`] and driven in groups through a
/// [`LineMask`]. Implementations backed by a set/clear register should apply
/// a whole mask in one write so no partial state becomes visible.
///
/// ## Implementing
///
/// For pins implementing [`OutputPin`], use the provided [`PinBank`]. For a
/// memory-mapped GPIO bank, implement this trait on a type writing the set and
/// clear registers directly.
pub trait GpioBackend {
    /// Error type for backend operations
    ///
    /// Must implement [`Debug`] for error reporting.
    type Error: Debug;

    /// Claim `line` as an output
    ///
    /// # Errors
    ///
    /// Returns an error if the line does not exist or cannot be configured.
    fn configure_output(&mut self, line: LineId) -> Result<(), Self::Error>;

    /// Drive every line in `lines` high, leaving other lines unchanged
    ///
    /// # Errors
    ///
    /// Returns an error if any line cannot be driven.
    fn set_lines(&mut self, lines: LineMask) -> Result<(), Self::Error>;

    /// Drive every line in `lines` low, leaving other lines unchanged
    ///
    /// # Errors
    ///
    /// Returns an error if any line cannot be driven.
    fn clear_lines(&mut self, lines: LineMask) -> Result<(), Self::Error>;
}

/// Errors raised by [`PinBank`]
///
/// Generic over the pin error type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinBankError<PinErr> {
    /// GPIO pin error
    Pin(PinErr),
    /// No pin is wired to this line
    UnknownLine(LineId),
    /// Line was driven before being claimed with `configure_output`
    NotConfigured(LineId),
}

impl<PinErr: Debug> core::fmt::Display for PinBankError<PinErr> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Pin(e) => write!(f, "Pin error: {e:?}"),
            Self::UnknownLine(line) => write!(f, "No pin for line {line}"),
            Self::NotConfigured(line) => write!(f, "Line {line} not configured as output"),
        }
    }
}

impl<PinErr: Debug> core::error::Error for PinBankError<PinErr> {}

/// GPIO backend over an array of [`OutputPin`]s
///
/// Line `n` is `pins[n]`. Pins are driven one after the other, so a mask is
/// not applied atomically; keep the on-time long compared to a pin write.
///
/// ## Type Parameters
///
/// * `P` - Output pin implementing [`OutputPin`]
/// * `N` - Number of pins (at most 32; further pins are unreachable)
pub struct PinBank<P, const N: usize> {
    /// Pins indexed by line id
    pins: [P; N],
    /// Lines claimed through `configure_output`
    claimed: LineMask,
}

impl<P, const N: usize> PinBank<P, N>
where
    P: OutputPin,
{
    /// Create a new PinBank, no line claimed yet
    pub fn new(pins: [P; N]) -> Self {
        Self {
            pins,
            claimed: LineMask::EMPTY,
        }
    }

    /// Lines claimed so far
    pub fn claimed(&self) -> LineMask {
        self.claimed
    }

    /// Release the pins
    pub fn release(self) -> [P; N] {
        self.pins
    }

    fn check(&self, lines: LineMask) -> Result<(), PinBankError<P::Error>> {
        for line in lines.lines() {
            if usize::from(line) >= N {
                return Err(PinBankError::UnknownLine(line));
            }
            if !self.claimed.contains(line) {
                return Err(PinBankError::NotConfigured(line));
            }
        }
        Ok(())
    }

    fn drive(&mut self, lines: LineMask, high: bool) -> Result<(), PinBankError<P::Error>> {
        self.check(lines)?;
        for line in lines.lines() {
            let pin = &mut self.pins[usize::from(line)];
            if high {
                pin.set_high().map_err(PinBankError::Pin)?;
            } else {
                pin.set_low().map_err(PinBankError::Pin)?;
            }
        }
        Ok(())
    }
}

impl<P, const N: usize> GpioBackend for PinBank<P, N>
where
    P: OutputPin,
{
    type Error = PinBankError<P::Error>;

    fn configure_output(&mut self, line: LineId) -> Result<(), Self::Error> {
        if line >= MAX_LINES || usize::from(line) >= N {
            return Err(PinBankError::UnknownLine(line));
        }
        self.claimed = self.claimed.with(line);
        Ok(())
    }

    fn set_lines(&mut self, lines: LineMask) -> Result<(), Self::Error> {
        self.drive(lines, true)
    }

    fn clear_lines(&mut self, lines: LineMask) -> Result<(), Self::Error> {
        self.drive(lines, false)
    }
}
