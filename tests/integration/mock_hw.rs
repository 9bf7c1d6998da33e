//! Mock adapters for integration tests.
//!
//! A hand-driven clock, a recording event sink, a queued command source and
//! an `embedded-hal` pin double, so every test controls time and stimulus
//! exactly and can assert on the full event history.

use std::cell::Cell;
use std::collections::VecDeque;
use std::rc::Rc;

use embassy_time::{Duration, Instant};
use embedded_hal::digital::{ErrorKind, ErrorType, InputPin, OutputPin};
use ledsim::app::commands::AppCommand;
use ledsim::app::events::AppEvent;
use ledsim::app::ports::{Clock, CommandSource, EventSink};
use ledsim::gpio::{FlexPin, Level, Mode, Pull};

// ── ManualClock ───────────────────────────────────────────────

pub struct ManualClock {
    now: Cell<Instant>,
}

#[allow(dead_code)]
impl ManualClock {
    pub fn at(ms: u64) -> Self {
        Self {
            now: Cell::new(Instant::from_millis(ms)),
        }
    }

    pub fn set_ms(&self, ms: u64) {
        self.now.set(Instant::from_millis(ms));
    }

    pub fn advance_ms(&self, ms: u64) {
        self.now.set(self.now.get() + Duration::from_millis(ms));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}

// ── RecordingSink ─────────────────────────────────────────────

pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// LED levels reported, in order.
    pub fn led_changes(&self) -> Vec<Level> {
        self.events
            .iter()
            .filter_map(|e| match e {
                AppEvent::LedChanged(level) => Some(*level),
                _ => None,
            })
            .collect()
    }

    pub fn presses(&self) -> usize {
        self.events
            .iter()
            .filter(|e| **e == AppEvent::PressConfirmed)
            .count()
    }
}

impl Default for RecordingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(*event);
    }
}

// ── QueuedCommands ────────────────────────────────────────────

/// Commands pushed by the test, delivered on the next poll.
pub struct QueuedCommands {
    pending: VecDeque<AppCommand>,
}

#[allow(dead_code)]
impl QueuedCommands {
    pub fn new() -> Self {
        Self {
            pending: VecDeque::new(),
        }
    }

    pub fn push(&mut self, cmd: AppCommand) {
        self.pending.push_back(cmd);
    }
}

impl Default for QueuedCommands {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandSource for QueuedCommands {
    fn poll_command(&mut self, _now: Instant) -> Option<AppCommand> {
        self.pending.pop_front()
    }
}

// ── MockPin ───────────────────────────────────────────────────

/// Shared external line: what the outside world drives onto a pin.  `None`
/// leaves it floating so the configured bias decides.
pub type Line = Rc<Cell<Option<bool>>>;

/// Board pin double.
#[derive(Debug, Default)]
pub struct MockPin {
    pub line: Line,
    pub mode: Mode,
    pub pull: Pull,
    pub driven: bool,
    pub configure_calls: usize,
}

#[allow(dead_code)]
impl MockPin {
    /// A pin whose external line stays reachable through `line`.
    pub fn wired(line: &Line) -> Self {
        Self {
            line: Rc::clone(line),
            ..Self::default()
        }
    }
}

impl ErrorType for MockPin {
    type Error = ErrorKind;
}

impl InputPin for MockPin {
    fn is_high(&mut self) -> Result<bool, ErrorKind> {
        Ok(self.line.get().unwrap_or(self.pull == Pull::PullUp))
    }

    fn is_low(&mut self) -> Result<bool, ErrorKind> {
        self.is_high().map(|h| !h)
    }
}

impl OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), ErrorKind> {
        self.driven = false;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), ErrorKind> {
        self.driven = true;
        Ok(())
    }
}

impl FlexPin for MockPin {
    fn configure(&mut self, mode: Mode, pull: Pull) -> Result<(), ErrorKind> {
        self.mode = mode;
        self.pull = pull;
        self.configure_calls += 1;
        Ok(())
    }
}
