//! Port traits: the boundary between the polling driver and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ PollingDriver (domain)
//! ```
//!
//! Driven adapters (clock, event sinks, command sources) implement these
//! traits.  The [`PollingDriver`](super::service::PollingDriver) consumes
//! them via generics, so the domain core never touches a terminal or an OS
//! timer directly.  Pins are reached through [`Gpio`](crate::gpio::Gpio).

use embassy_time::Instant;

use super::commands::AppCommand;
use super::events::AppEvent;

// ───────────────────────────────────────────────────────────────
// Clock source
// ───────────────────────────────────────────────────────────────

/// Monotonic time source.  Readings never decrease; the epoch is
/// unspecified.
pub trait Clock {
    fn now(&self) -> Instant;
}

// ───────────────────────────────────────────────────────────────
// Command source (driving adapter: outside world → domain)
// ───────────────────────────────────────────────────────────────

/// Non-blocking source of user commands (keyboard, script, RPC).
pub trait CommandSource {
    /// Next pending command, or `None` if nothing is waiting at `now`.
    /// Must return immediately.
    fn poll_command(&mut self, now: Instant) -> Option<AppCommand>;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / display)
// ───────────────────────────────────────────────────────────────

/// The driver emits structured [`AppEvent`]s through this port.  Adapters
/// decide where they go (serial log, terminal, test recorder).
pub trait EventSink {
    fn emit(&mut self, event: &AppEvent);
}
