//! Unified error types for the LedSim firmware.
//!
//! A single `Error` enum that every subsystem converts into, keeping the
//! top-level polling loop's error handling uniform.  All variants are `Copy`
//! so they can be returned from the GPIO layer on every tick without
//! allocation.

use core::fmt;

use crate::gpio::{Mode, PinId};

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A GPIO operation was rejected by the pin layer.
    Gpio(GpioError),
    /// Configuration is invalid or could not be loaded.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gpio(e) => write!(f, "gpio: {e}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl core::error::Error for Error {}

// ---------------------------------------------------------------------------
// GPIO errors
// ---------------------------------------------------------------------------

/// Non-fatal pin-layer rejections.  The operation that produced one of these
/// left the pin table untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GpioError {
    /// Pin index is outside `[0, PIN_COUNT)`.
    InvalidPin { pin: PinId },
    /// Write to a pin not configured Output, or pull change on a pin not
    /// configured Input.
    WrongDirection { pin: PinId, required: Mode },
    /// The underlying `embedded-hal` pin reported an error.
    Hardware { pin: PinId },
}

impl GpioError {
    /// Pin the rejected operation targeted.
    pub const fn pin(&self) -> PinId {
        match *self {
            Self::InvalidPin { pin } | Self::WrongDirection { pin, .. } | Self::Hardware { pin } => {
                pin
            }
        }
    }
}

impl fmt::Display for GpioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPin { pin } => write!(f, "pin {pin} is not valid"),
            Self::WrongDirection { pin, required } => {
                write!(f, "pin {pin} is not configured as {required}")
            }
            Self::Hardware { pin } => write!(f, "pin {pin} hardware access failed"),
        }
    }
}

impl core::error::Error for GpioError {}

impl From<GpioError> for Error {
    fn from(e: GpioError) -> Self {
        Self::Gpio(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
