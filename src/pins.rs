//! Logical pin map for the LED/button board.
//!
//! Single source of truth: the driver and the binary reference these ids
//! rather than hard-coding indices.  When the real board arrives, only the
//! order of pins handed to [`HalGpio::new`](crate::gpio::HalGpio::new)
//! has to match this table.

use crate::gpio::PinId;

// ---------------------------------------------------------------------------
// Actuators
// ---------------------------------------------------------------------------

/// System LED.  Digital output, HIGH = on.
pub const LED: PinId = PinId(0);

// ---------------------------------------------------------------------------
// Sensors
// ---------------------------------------------------------------------------

/// User button.  Digital input with internal pull-down: HIGH = pressed.
pub const BUTTON: PinId = PinId(1);

/// Number of logical pins on the board.
pub const PIN_COUNT: usize = 2;
