//! Application core: the polling driver and its ports.
//!
//! Sampling, debouncing and LED control live in [`service`].  All
//! interaction with time, the keyboard and the display happens through
//! **port traits** defined in [`ports`], and pins are reached through the
//! [`Gpio`](crate::gpio::Gpio) trait, keeping this layer fully testable
//! without real peripherals.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
