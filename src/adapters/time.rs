//! Host time adapter.
//!
//! Provides the monotonic [`Clock`] for the simulator.  Backed by
//! `embassy_time::Instant::now()`, which on the host runs on the std time
//! driver and on a board runs on the HAL's timer driver, so the same
//! adapter serves both.

use embassy_time::{Duration, Instant};

use crate::app::ports::Clock;

/// Monotonic clock with an epoch at construction time.
pub struct MonotonicClock {
    start: Instant,
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self { start: Instant::now() }
    }

    /// Time since this clock was created.
    pub fn uptime(&self) -> Duration {
        Instant::now()
            .checked_duration_since(self.start)
            .unwrap_or(Duration::from_ticks(0))
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Instant {
        Instant::from_ticks(0) + self.uptime()
    }
}
