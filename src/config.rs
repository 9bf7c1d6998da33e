//! Driver configuration parameters
//!
//! Timing for the polling loop and the debounce window.  Defaults depend on
//! the application mode; a JSON file and CLI flags can override them.

use serde::{Deserialize, Serialize};

use crate::app::commands::{AppCommand, ScriptStep};
use crate::error::{Error, Result};

/// Maximum number of scripted stimulus steps.
pub const MAX_SCRIPT_STEPS: usize = 32;

/// What the LED does with the button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppMode {
    /// LED follows the debounced button level.
    Switch,
    /// Each debounced press inverts the LED.
    Toggle,
}

/// Core driver configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriverConfig {
    pub mode: AppMode,
    /// Sampling period (milliseconds).  Must be shorter than the debounce
    /// window or the window cannot be resolved.
    pub poll_interval_ms: u32,
    /// Stability window (milliseconds)
    pub debounce_ms: u32,
    /// Extra hold on a virtual toggle press beyond the debounce window
    /// (milliseconds)
    pub pulse_margin_ms: u32,
    /// Timed stimulus replayed instead of (or alongside) the keyboard.
    #[serde(default)]
    pub script: heapless::Vec<ScriptStep, MAX_SCRIPT_STEPS>,
}

impl DriverConfig {
    /// Reference timing for `mode`.
    pub fn for_mode(mode: AppMode) -> Self {
        let poll_interval_ms = match mode {
            AppMode::Switch => 40, // 25 Hz is enough to follow a held switch
            AppMode::Toggle => 5,  // fine sampling so short taps are seen
        };
        Self {
            mode,
            poll_interval_ms,
            debounce_ms: 50,
            pulse_margin_ms: 5,
            script: heapless::Vec::new(),
        }
    }

    /// Reject timings the polling loop cannot honour.
    pub fn validate(&self) -> Result<()> {
        if self.poll_interval_ms == 0 {
            return Err(Error::Config("poll_interval_ms must be non-zero"));
        }
        if self.poll_interval_ms >= self.debounce_ms {
            return Err(Error::Config("poll_interval_ms must be below debounce_ms"));
        }
        if self.script.windows(2).any(|w| w[0].at_ms > w[1].at_ms) {
            return Err(Error::Config("script steps must be in time order"));
        }
        // A replayed run has no keyboard to stop it.
        if self
            .script
            .last()
            .is_some_and(|step| step.command != AppCommand::Quit)
        {
            return Err(Error::Config("script must end with a quit step"));
        }
        Ok(())
    }

    /// How long a virtual toggle press is held.
    pub fn pulse_hold_ms(&self) -> u32 {
        self.debounce_ms.saturating_add(self.pulse_margin_ms)
    }
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self::for_mode(AppMode::Switch)
    }
}

/// Partial configuration as read from a JSON file.  Every field is
/// optional; missing ones keep the mode's defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub poll_interval_ms: Option<u32>,
    pub debounce_ms: Option<u32>,
    pub pulse_margin_ms: Option<u32>,
    pub script: heapless::Vec<ScriptStep, MAX_SCRIPT_STEPS>,
}

impl ConfigFile {
    pub fn from_json(text: &str) -> core::result::Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Overlay the fields present in this file onto `base`.
    pub fn apply(self, mut base: DriverConfig) -> DriverConfig {
        if let Some(v) = self.poll_interval_ms {
            base.poll_interval_ms = v;
        }
        if let Some(v) = self.debounce_ms {
            base.debounce_ms = v;
        }
        if let Some(v) = self.pulse_margin_ms {
            base.pulse_margin_ms = v;
        }
        if !self.script.is_empty() {
            base.script = self.script;
        }
        base
    }
}
