//! GPIO layer: the hardware-agnostic pin contract.
//!
//! ```text
//!   PollingDriver ──▶ Gpio trait ──▶ SimGpio  (in-memory pin table)
//!                                └─▶ HalGpio  (embedded-hal pins)
//! ```
//!
//! Application code depends only on [`Gpio`].  Retargeting to a real board
//! means handing a [`HalGpio`] built from the board's pins to the driver;
//! nothing above this module changes.
//!
//! ## Contract
//!
//! | Operation   | Requires                 | On violation                |
//! |-------------|--------------------------|-----------------------------|
//! | `set_mode`  | valid pin                | `InvalidPin`                |
//! | `set_pull`  | valid pin, mode Input    | `InvalidPin` / `WrongDirection` |
//! | `write`     | valid pin, mode Output   | `InvalidPin` / `WrongDirection` |
//! | `read`      | valid pin                | `InvalidPin` (caller reads Low) |
//!
//! Rejections are non-fatal: the pin table is left untouched, the layer
//! logs a warning, and the caller carries on.

use core::fmt;
use core::ops::Not;

use embedded_hal::digital::PinState;
use log::warn;

use crate::error::GpioError;

pub mod hal;
pub mod sim;

pub use hal::{FlexPin, HalGpio};
pub use sim::{PinSlot, SimGpio};

// ---------------------------------------------------------------------------
// Pin identity and configuration
// ---------------------------------------------------------------------------

/// Logical pin identifier, an index into a fixed-size pin table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PinId(pub u8);

impl PinId {
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for PinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Pin direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Input,
    Output,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Input => write!(f, "input"),
            Self::Output => write!(f, "output"),
        }
    }
}

/// Internal bias resistor.  Only consulted while the pin is an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pull {
    #[default]
    NoPull,
    PullUp,
    PullDown,
}

/// Logic level of a pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Level {
    #[default]
    Low,
    High,
}

impl Level {
    /// Normalise an integer level: zero is Low, anything else is High.
    pub const fn from_raw(raw: i32) -> Self {
        if raw != 0 { Self::High } else { Self::Low }
    }

    pub const fn is_high(self) -> bool {
        matches!(self, Self::High)
    }

    /// 0 or 1.
    pub const fn as_u8(self) -> u8 {
        self as u8
    }
}

impl Not for Level {
    type Output = Self;

    fn not(self) -> Self {
        match self {
            Self::Low => Self::High,
            Self::High => Self::Low,
        }
    }
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high { Self::High } else { Self::Low }
    }
}

impl From<Level> for bool {
    fn from(level: Level) -> Self {
        level.is_high()
    }
}

impl From<Level> for PinState {
    fn from(level: Level) -> Self {
        match level {
            Level::Low => PinState::Low,
            Level::High => PinState::High,
        }
    }
}

impl From<PinState> for Level {
    fn from(state: PinState) -> Self {
        match state {
            PinState::Low => Self::Low,
            PinState::High => Self::High,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

// ---------------------------------------------------------------------------
// Capability traits
// ---------------------------------------------------------------------------

/// Pin-layer capability shared by every backend.
///
/// All operations are synchronous, O(1) and allocation-free.
pub trait Gpio {
    /// Number of valid pins; valid ids are `0..pin_count()`.
    fn pin_count(&self) -> usize;

    /// Reset every pin to Input / NoPull / Low.  Idempotent.
    fn init(&mut self);

    /// Set pin direction.  No transition restrictions.
    fn set_mode(&mut self, pin: PinId, mode: Mode) -> Result<(), GpioError>;

    /// Set the bias resistor of an input pin.
    fn set_pull(&mut self, pin: PinId, pull: Pull) -> Result<(), GpioError>;

    /// Drive an output pin.
    fn write(&mut self, pin: PinId, level: Level) -> Result<(), GpioError>;

    /// Observed level: the cached value for outputs, the external signal
    /// combined with the pull policy for inputs.
    fn read(&mut self, pin: PinId) -> Result<Level, GpioError>;

    /// [`read`](Gpio::read) with the safe Low default on rejection.
    fn read_or_low(&mut self, pin: PinId) -> Level {
        self.read(pin).unwrap_or(Level::Low)
    }
}

/// Simulation-only injection point for the raw external signal of a pin.
///
/// Models a physical event, which cannot itself be wrong: an invalid pin
/// is ignored without any report.
pub trait StimulusSink {
    fn simulate_input(&mut self, pin: PinId, level: Level);
}

// ---------------------------------------------------------------------------
// Shared contract helpers
// ---------------------------------------------------------------------------

/// Level seen on an input pin: an external High always wins, otherwise the
/// pull resistor decides.  A floating input reads Low so runs are
/// reproducible.
pub const fn input_level(raw: Level, pull: Pull) -> Level {
    match (raw, pull) {
        (Level::High, _) | (Level::Low, Pull::PullUp) => Level::High,
        (Level::Low, Pull::PullDown | Pull::NoPull) => Level::Low,
    }
}

/// Bounds-check `pin` against a table of `count` pins.
pub(crate) fn check_pin(op: &str, pin: PinId, count: usize) -> Result<usize, GpioError> {
    let index = pin.index();
    if index < count {
        Ok(index)
    } else {
        Err(reject(op, GpioError::InvalidPin { pin }))
    }
}

/// Require `actual == required` for `pin`.
pub(crate) fn check_mode(op: &str, pin: PinId, actual: Mode, required: Mode) -> Result<(), GpioError> {
    if actual == required {
        Ok(())
    } else {
        Err(reject(op, GpioError::WrongDirection { pin, required }))
    }
}

/// Log a rejected operation and hand the error back to the caller.
pub(crate) fn reject(op: &str, err: GpioError) -> GpioError {
    warn!("gpio: {}: {}", op, err);
    err
}
