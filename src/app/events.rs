//! Outbound application events.
//!
//! The [`PollingDriver`](super::service::PollingDriver) emits these through
//! the [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide where they end up.

use crate::config::AppMode;
use crate::gpio::Level;

/// Structured events emitted by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// Pins configured, polling about to begin.
    Started(AppMode),

    /// The observed LED level differs from the last one reported.
    LedChanged(Level),

    /// A debounced press was confirmed (toggle mode).
    PressConfirmed,

    /// The driver shut down and left the LED off.
    Stopped,
}
