//! Real-hardware GPIO backend over `embedded-hal` 1.0 pins.
//!
//! `embedded-hal` fixes a pin's direction at the type level, while this
//! layer's contract lets the application change direction at runtime.  The
//! bridge is [`FlexPin`]: a pin that can be re-configured in place, which is
//! what "flex"/"dynamic" pin drivers in most HALs provide.
//!
//! A shadow copy of mode, pull and output value is kept per pin so the
//! contract checks are identical to [`SimGpio`](super::SimGpio) and never
//! touch the hardware when an operation is going to be rejected.

use embedded_hal::digital::{Error as _, InputPin, OutputPin};
use log::{debug, warn};

use super::{Gpio, Level, Mode, PinId, Pull, check_mode, check_pin, reject};
use crate::error::GpioError;
use crate::pins::PIN_COUNT;

/// A pin whose direction and bias can be changed at runtime.
pub trait FlexPin: InputPin + OutputPin {
    /// Apply direction and pull.  `pull` is ignored by implementations when
    /// `mode` is Output.
    fn configure(&mut self, mode: Mode, pull: Pull) -> Result<(), Self::Error>;
}

struct HalSlot<P> {
    pin: P,
    mode: Mode,
    pull: Pull,
    value: Level,
}

impl<P> HalSlot<P> {
    fn new(pin: P) -> Self {
        Self {
            pin,
            mode: Mode::Input,
            pull: Pull::NoPull,
            value: Level::Low,
        }
    }
}

/// GPIO backend driving `N` board pins.  Logical pin `i` is `pins[i]`.
pub struct HalGpio<P, const N: usize = PIN_COUNT> {
    slots: [HalSlot<P>; N],
}

impl<P: FlexPin, const N: usize> HalGpio<P, N> {
    /// Take ownership of the board pins.  Call [`Gpio::init`] before use.
    pub fn new(pins: [P; N]) -> Self {
        Self {
            slots: pins.map(HalSlot::new),
        }
    }

    /// Give the pins back, e.g. to hand them to another driver.
    pub fn release(self) -> [P; N] {
        self.slots.map(|slot| slot.pin)
    }
}

fn hardware_fault<E: embedded_hal::digital::Error>(op: &str, pin: PinId, e: &E) -> GpioError {
    debug!("gpio(hal): {}: pin {} reported {:?}", op, pin, e.kind());
    reject(op, GpioError::Hardware { pin })
}

impl<P: FlexPin, const N: usize> Gpio for HalGpio<P, N> {
    fn pin_count(&self) -> usize {
        N
    }

    fn init(&mut self) {
        for (i, slot) in self.slots.iter_mut().enumerate() {
            slot.mode = Mode::Input;
            slot.pull = Pull::NoPull;
            slot.value = Level::Low;
            if let Err(e) = slot.pin.configure(Mode::Input, Pull::NoPull) {
                warn!("gpio(hal): init: pin {} reported {:?}", i, e.kind());
            }
        }
        debug!("gpio(hal): {} pins reset", N);
    }

    fn set_mode(&mut self, pin: PinId, mode: Mode) -> Result<(), GpioError> {
        let i = check_pin("set_mode", pin, N)?;
        let slot = &mut self.slots[i];
        // Latch the level before enabling the driver; a failed latch must
        // leave the direction unchanged.
        if mode == Mode::Output {
            slot.pin
                .set_state(slot.value.into())
                .map_err(|e| hardware_fault("set_mode", pin, &e))?;
        }
        slot.pin
            .configure(mode, slot.pull)
            .map_err(|e| hardware_fault("set_mode", pin, &e))?;
        slot.mode = mode;
        Ok(())
    }

    fn set_pull(&mut self, pin: PinId, pull: Pull) -> Result<(), GpioError> {
        let i = check_pin("set_pull", pin, N)?;
        let slot = &mut self.slots[i];
        check_mode("set_pull", pin, slot.mode, Mode::Input)?;
        slot.pin
            .configure(Mode::Input, pull)
            .map_err(|e| hardware_fault("set_pull", pin, &e))?;
        slot.pull = pull;
        Ok(())
    }

    fn write(&mut self, pin: PinId, level: Level) -> Result<(), GpioError> {
        let i = check_pin("write", pin, N)?;
        let slot = &mut self.slots[i];
        check_mode("write", pin, slot.mode, Mode::Output)?;
        slot.pin
            .set_state(level.into())
            .map_err(|e| hardware_fault("write", pin, &e))?;
        slot.value = level;
        Ok(())
    }

    fn read(&mut self, pin: PinId) -> Result<Level, GpioError> {
        let i = check_pin("read", pin, N)?;
        let slot = &mut self.slots[i];
        match slot.mode {
            Mode::Output => Ok(slot.value),
            Mode::Input => slot
                .pin
                .is_high()
                .map(Level::from)
                .map_err(|e| hardware_fault("read", pin, &e)),
        }
    }
}
