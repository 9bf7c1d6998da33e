//! LedSim firmware library.
//!
//! A hardware-independent GPIO layer and software debounce filters, plus
//! the polling driver that ties a button to an LED.  Everything runs on the
//! host against [`gpio::SimGpio`]; retargeting to a board means handing the
//! driver a [`gpio::HalGpio`] built from the board's `embedded-hal` pins.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod debounce;
pub mod error;
pub mod gpio;
pub mod pins;

pub mod adapters;

pub use error::{Error, GpioError, Result};
