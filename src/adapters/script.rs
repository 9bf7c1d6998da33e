//! Scripted command source.
//!
//! Replays a fixed list of timed [`ScriptStep`]s relative to a start
//! instant.  Used for unattended runs (`ledsim ... --config bounce.json`)
//! and by the integration tests as a deterministic stimulus source.

use embassy_time::{Duration, Instant};

use crate::app::commands::{AppCommand, ScriptStep};
use crate::app::ports::CommandSource;
use crate::config::MAX_SCRIPT_STEPS;

pub struct ScriptedCommands {
    steps: heapless::Vec<ScriptStep, MAX_SCRIPT_STEPS>,
    origin: Instant,
    next: usize,
}

impl ScriptedCommands {
    /// `steps` must be in time order (see
    /// [`DriverConfig::validate`](crate::config::DriverConfig::validate)).
    pub fn new(steps: heapless::Vec<ScriptStep, MAX_SCRIPT_STEPS>, origin: Instant) -> Self {
        Self {
            steps,
            origin,
            next: 0,
        }
    }

    /// All steps have fired.
    pub fn finished(&self) -> bool {
        self.next >= self.steps.len()
    }
}

impl CommandSource for ScriptedCommands {
    fn poll_command(&mut self, now: Instant) -> Option<AppCommand> {
        let step = self.steps.get(self.next)?;
        let due = self.origin + Duration::from_millis(u64::from(step.at_ms));
        if now < due {
            return None;
        }
        self.next += 1;
        Some(step.command)
    }
}
