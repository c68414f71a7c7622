//! Multiplexed 7-Segment LED Display Driver
//!
//! A driver for multi-digit 7-segment LED displays wired directly to GPIO
//! lines: one select line per digit and eight segment lines shared by all
//! digits. Digits are lit one at a time, fast enough to look steady.
//!
//! ## Features
//!
//! - `no_std` compatible, no allocation
//! - `embedded-hal` v1.0 support
//! - Common-cathode and common-anode wiring
//! - Text rendering with dots and commas folded into the previous digit
//! - Configurable on-time and inter-digit delay
//!
//! ## Usage
//!
//! ```rust,no_run
//! use core::convert::Infallible;
//! use embedded_hal::delay::DelayNs;
//! use embedded_hal::digital::OutputPin;
//! use sevseg_mux::{Builder, Display, PinBank, Polarity};
//!
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl OutputPin for MockPin {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # struct MockDelay;
//! # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! # let pins: [MockPin; 20] = core::array::from_fn(|_| MockPin);
//! # let mut delay = MockDelay;
//! let config = match Builder::new()
//!     .digit_lines(&[16, 17, 18, 19])
//!     .segment_lines(&[15, 14, 13, 12, 11, 10, 9, 8])
//!     .polarity(Polarity::CommonCathode)
//!     .on_time_us(5_000)
//!     .build()
//! {
//!     Ok(config) => config,
//!     Err(_) => return,
//! };
//!
//! let mut display = match Display::new(PinBank::new(pins), config) {
//!     Ok(display) => display,
//!     Err(_) => return,
//! };
//! let _ = display.set_string("3.141");
//!
//! loop {
//!     let _ = display.refresh_display(&mut delay);
//! }
//! ```

#![no_std]

#[cfg(test)]
extern crate alloc;

/// Per-digit segment buffer
pub mod buffer;
/// Display configuration types and builder
pub mod config;
/// Core display operations
pub mod display;
/// Error types for the driver
pub mod error;
/// Glyph table and segment bit order
pub mod glyph;
/// GPIO backend abstraction
pub mod interface;

pub use buffer::DisplayBuffer;
pub use config::{
    Builder, Config, DEFAULT_DIGIT_DELAY_US, DEFAULT_ON_TIME_US, LineId, LineMask, MAX_DIGITS,
    MAX_LINES, Polarity,
};
pub use display::Display;
pub use error::{ConfigError, Error};
pub use glyph::{SEGMENT_COUNT, Segment, UnsupportedCharacter};
pub use interface::{GpioBackend, PinBank, PinBankError};
