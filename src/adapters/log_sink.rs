//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing driver events to the `log` facade
//! (stderr on the host, UART on a board).

use log::info;

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started(mode) => {
                info!("START | mode={:?}", mode);
            }
            AppEvent::LedChanged(level) => {
                info!("LED   | {}", if level.is_high() { "ON" } else { "OFF" });
            }
            AppEvent::PressConfirmed => {
                info!("PRESS | confirmed");
            }
            AppEvent::Stopped => {
                info!("STOP  | LED off");
            }
        }
    }
}
