//! Polling driver, the application core.
//!
//! [`PollingDriver`] owns the debounce filters and the loop timing.  Pins,
//! commands and events are injected at call sites through traits, making
//! the whole driver testable with a simulated pin table and a manual clock.
//!
//! ```text
//!  CommandSource ──▶ ┌──────────────────────┐ ──▶ EventSink
//!                    │    PollingDriver     │
//!           Gpio ◀──▶│ LevelFilter · Edge   │
//!                    └──────────────────────┘
//! ```
//!
//! ## Tick ordering
//!
//! 1. apply pending stimulus (commands → raw input)
//! 2. sample + debounce + act, if the sampling period has elapsed
//! 3. release an expired virtual press
//!
//! The caller idles between ticks.

use embassy_time::{Duration, Instant};
use log::{debug, info};

use crate::config::{AppMode, DriverConfig};
use crate::debounce::{EdgeFilter, LevelFilter};
use crate::error::Result;
use crate::gpio::{Gpio, Level, Mode, Pull, StimulusSink};
use crate::pins;

use super::commands::AppCommand;
use super::events::AppEvent;
use super::ports::{CommandSource, EventSink};

/// Whether the polling loop should keep going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    Quit,
}

// ───────────────────────────────────────────────────────────────
// PollingDriver
// ───────────────────────────────────────────────────────────────

pub struct PollingDriver {
    config: DriverConfig,
    poll_interval: Duration,
    debounce: Duration,
    level: LevelFilter,
    edge: EdgeFilter,
    next_tick: Instant,
    /// Release deadline of the virtual toggle press, while one is held.
    pulse_release_at: Option<Instant>,
    /// Last LED level reported through the sink.
    last_led: Option<Level>,
    samples: u64,
}

impl PollingDriver {
    /// Construct the driver from validated configuration.
    ///
    /// Does **not** touch the pins; call [`start`](Self::start) next.
    pub fn new(config: DriverConfig) -> Result<Self> {
        config.validate()?;
        // Switch mode only reports changes from an initially-off LED;
        // toggle mode always reports the first sample.
        let last_led = match config.mode {
            AppMode::Switch => Some(Level::Low),
            AppMode::Toggle => None,
        };
        Ok(Self {
            poll_interval: Duration::from_millis(u64::from(config.poll_interval_ms)),
            debounce: Duration::from_millis(u64::from(config.debounce_ms)),
            config,
            level: LevelFilter::new(),
            edge: EdgeFilter::new(),
            next_tick: Instant::from_ticks(0),
            pulse_release_at: None,
            last_led,
            samples: 0,
        })
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Reset the pin layer and configure the board: LED output, button
    /// input with pull-down.  The first sample is due at `now`.
    pub fn start(&mut self, now: Instant, gpio: &mut impl Gpio, sink: &mut impl EventSink) -> Result<()> {
        gpio.init();
        gpio.set_mode(pins::LED, Mode::Output)?;
        gpio.set_mode(pins::BUTTON, Mode::Input)?;
        gpio.set_pull(pins::BUTTON, Pull::PullDown)?;

        self.next_tick = now;
        sink.emit(&AppEvent::Started(self.config.mode));
        info!(
            "PollingDriver started: mode={:?} poll={}ms debounce={}ms",
            self.config.mode, self.config.poll_interval_ms, self.config.debounce_ms
        );
        Ok(())
    }

    /// Leave the board in a safe state: LED off, stimulus released.
    pub fn shutdown(&mut self, gpio: &mut (impl Gpio + StimulusSink), sink: &mut impl EventSink) {
        if self.pulse_release_at.take().is_some() {
            gpio.simulate_input(pins::BUTTON, Level::Low);
        }
        // Already logged by the pin layer if the LED is misconfigured.
        let _ = gpio.write(pins::LED, Level::Low);
        sink.emit(&AppEvent::Stopped);
        info!("PollingDriver stopped after {} samples", self.samples);
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one loop iteration against a simulated board.
    pub fn tick(
        &mut self,
        now: Instant,
        gpio: &mut (impl Gpio + StimulusSink),
        commands: &mut impl CommandSource,
        sink: &mut impl EventSink,
    ) -> TickOutcome {
        // 1. Stimulus
        while let Some(cmd) = commands.poll_command(now) {
            if cmd == AppCommand::Quit {
                info!("Quit requested");
                return TickOutcome::Quit;
            }
            self.apply_stimulus(cmd, now, gpio);
        }

        // 2. Sample
        self.sample(now, gpio, sink);

        // 3. Release the virtual press only after it has been sampled.
        if let Some(release_at) = self.pulse_release_at {
            if now >= release_at {
                gpio.simulate_input(pins::BUTTON, Level::Low);
                self.pulse_release_at = None;
                debug!("virtual press released");
            }
        }

        TickOutcome::Continue
    }

    /// Sample the button, debounce and drive the LED if the sampling
    /// period has elapsed.  This is the whole loop on real hardware, where
    /// the button itself supplies the stimulus.
    ///
    /// Returns `true` if a sample was taken.
    pub fn sample(&mut self, now: Instant, gpio: &mut impl Gpio, sink: &mut impl EventSink) -> bool {
        if now < self.next_tick {
            return false;
        }

        let raw = gpio.read_or_low(pins::BUTTON);
        match self.config.mode {
            AppMode::Switch => {
                let stable = self.level.update(raw, self.debounce, now);
                let _ = gpio.write(pins::LED, stable);
            }
            AppMode::Toggle => {
                if self.edge.update(raw, self.debounce, now) {
                    let led = gpio.read_or_low(pins::LED);
                    let _ = gpio.write(pins::LED, !led);
                    sink.emit(&AppEvent::PressConfirmed);
                }
            }
        }

        let led_now = gpio.read_or_low(pins::LED);
        if self.last_led != Some(led_now) {
            self.last_led = Some(led_now);
            sink.emit(&AppEvent::LedChanged(led_now));
        }

        self.samples += 1;
        self.next_tick = self.next_tick + self.poll_interval;
        debug!("sample #{}: raw={} led={}", self.samples, raw, led_now);
        true
    }

    fn apply_stimulus(&mut self, cmd: AppCommand, now: Instant, gpio: &mut impl StimulusSink) {
        match (self.config.mode, cmd) {
            (AppMode::Switch, AppCommand::Press) => gpio.simulate_input(pins::BUTTON, Level::High),
            (AppMode::Switch, AppCommand::Release) => gpio.simulate_input(pins::BUTTON, Level::Low),
            (AppMode::Toggle, AppCommand::Press) => {
                if self.pulse_release_at.is_none() {
                    gpio.simulate_input(pins::BUTTON, Level::High);
                    let hold = Duration::from_millis(u64::from(self.config.pulse_hold_ms()));
                    self.pulse_release_at = Some(now + hold);
                    debug!("virtual press held for {}ms", self.config.pulse_hold_ms());
                }
            }
            (AppMode::Toggle, AppCommand::Release) => {
                debug!("release ignored in toggle mode");
            }
            (_, AppCommand::Quit) => {}
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    /// Samples taken since startup.
    pub fn samples(&self) -> u64 {
        self.samples
    }

    /// Instant the next sample is due.
    pub fn next_tick(&self) -> Instant {
        self.next_tick
    }

    /// Whether a virtual toggle press is currently held.
    pub fn pulse_active(&self) -> bool {
        self.pulse_release_at.is_some()
    }
}
