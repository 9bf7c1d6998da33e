//! Inbound commands to the polling driver.
//!
//! These represent actions requested by the outside world (keyboard,
//! scripted stimulus) that the [`PollingDriver`](super::service::PollingDriver)
//! interprets as button stimulus or as a request to stop.

use serde::{Deserialize, Serialize};

/// Commands that external adapters can send into the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppCommand {
    /// Button pushed: raw input goes High.
    Press,

    /// Button let go: raw input goes Low.
    Release,

    /// Leave the polling loop.
    Quit,
}

impl AppCommand {
    /// Keyboard mapping: `1` press, `0` release, `q` quit.
    pub fn from_key(key: char) -> Option<Self> {
        match key {
            '1' => Some(Self::Press),
            '0' => Some(Self::Release),
            'q' | 'Q' => Some(Self::Quit),
            _ => None,
        }
    }
}

/// One entry of a scripted stimulus: `command` fires `at_ms` after the
/// script starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptStep {
    pub at_ms: u32,
    pub command: AppCommand,
}
