//! Simulated GPIO backend.
//!
//! Each pin is a [`PinSlot`] in a fixed-size table owned by the caller.
//! Inputs are driven by [`StimulusSink::simulate_input`], which stands in
//! for the physical signal on the pin.

use log::debug;

use super::{Gpio, Level, Mode, PinId, Pull, StimulusSink, check_mode, check_pin, input_level};
use crate::error::GpioError;
use crate::pins::PIN_COUNT;

/// Per-pin simulation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PinSlot {
    pub mode: Mode,
    /// Only consulted while `mode == Input`.
    pub pull: Pull,
    /// Cached output level.  Only authoritative while `mode == Output`.
    pub value: Level,
    /// Last injected external level.
    pub input_raw: Level,
}

impl PinSlot {
    /// Safe power-on state: Input, NoPull, Low.
    pub const RESET: Self = Self {
        mode: Mode::Input,
        pull: Pull::NoPull,
        value: Level::Low,
        input_raw: Level::Low,
    };

    /// Level `read()` reports for this slot.
    pub const fn observed(&self) -> Level {
        match self.mode {
            Mode::Output => self.value,
            Mode::Input => input_level(self.input_raw, self.pull),
        }
    }
}

/// In-memory pin table of `N` pins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimGpio<const N: usize = PIN_COUNT> {
    slots: [PinSlot; N],
}

impl<const N: usize> Default for SimGpio<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> SimGpio<N> {
    /// A table with every pin already in the reset state.
    pub const fn new() -> Self {
        Self {
            slots: [PinSlot::RESET; N],
        }
    }

    /// Read-only view of the whole table.
    pub fn slots(&self) -> &[PinSlot; N] {
        &self.slots
    }

    /// Slot for `pin`, if it exists.
    pub fn slot(&self, pin: PinId) -> Option<&PinSlot> {
        self.slots.get(pin.index())
    }
}

impl<const N: usize> Gpio for SimGpio<N> {
    fn pin_count(&self) -> usize {
        N
    }

    fn init(&mut self) {
        self.slots = [PinSlot::RESET; N];
        debug!("gpio(sim): {} pins reset", N);
    }

    fn set_mode(&mut self, pin: PinId, mode: Mode) -> Result<(), GpioError> {
        let i = check_pin("set_mode", pin, N)?;
        self.slots[i].mode = mode;
        Ok(())
    }

    fn set_pull(&mut self, pin: PinId, pull: Pull) -> Result<(), GpioError> {
        let i = check_pin("set_pull", pin, N)?;
        check_mode("set_pull", pin, self.slots[i].mode, Mode::Input)?;
        self.slots[i].pull = pull;
        Ok(())
    }

    fn write(&mut self, pin: PinId, level: Level) -> Result<(), GpioError> {
        let i = check_pin("write", pin, N)?;
        check_mode("write", pin, self.slots[i].mode, Mode::Output)?;
        self.slots[i].value = level;
        Ok(())
    }

    fn read(&mut self, pin: PinId) -> Result<Level, GpioError> {
        let i = check_pin("read", pin, N)?;
        Ok(self.slots[i].observed())
    }
}

impl<const N: usize> StimulusSink for SimGpio<N> {
    fn simulate_input(&mut self, pin: PinId, level: Level) {
        if let Some(slot) = self.slots.get_mut(pin.index()) {
            slot.input_raw = level;
        }
    }
}
