//! LedSim host simulator entry point.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  Adapters (outer ring)                   │
//! │                                                          │
//! │  StdinCommands / ScriptedCommands   LogEventSink         │
//! │  (CommandSource)                    (EventSink)          │
//! │  MonotonicClock (Clock)             SimGpio (Gpio)       │
//! │                                                          │
//! │  ───────────── Port Trait Boundary ─────────────         │
//! │                                                          │
//! │  ┌────────────────────────────────────────────────┐      │
//! │  │        PollingDriver (pure logic)              │      │
//! │  │  LevelFilter · EdgeFilter · virtual press      │      │
//! │  └────────────────────────────────────────────────┘      │
//! └──────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use std::fs;
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use env_logger::{Builder, Env};
use log::info;

use ledsim::adapters::log_sink::LogEventSink;
use ledsim::adapters::script::ScriptedCommands;
use ledsim::adapters::stdin::StdinCommands;
use ledsim::adapters::time::MonotonicClock;
use ledsim::app::ports::{Clock, CommandSource};
use ledsim::app::service::{PollingDriver, TickOutcome};
use ledsim::config::{AppMode, ConfigFile, DriverConfig};
use ledsim::gpio::SimGpio;

/// Idle time between loop iterations.
const IDLE: Duration = Duration::from_millis(1);

/// Environment variable holding the log filter (`error` .. `trace`, or
/// per-module directives).
const LOG_ENV: &str = "LEDSIM_LOG";

#[derive(Parser)]
#[command(name = "ledsim")]
#[command(about = "Simulated LED/button board with software debounce")]
struct Cli {
    #[command(subcommand)]
    mode: ModeCommand,

    /// JSON file with timing overrides and an optional stimulus script
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Sampling period in milliseconds
    #[arg(long, global = true)]
    poll_ms: Option<u32>,

    /// Debounce window in milliseconds
    #[arg(long, global = true)]
    debounce_ms: Option<u32>,
}

#[derive(Subcommand)]
enum ModeCommand {
    /// LED follows the button: '1' press, '0' release, 'q' quit
    Switch,
    /// Each press toggles the LED: '1' press, 'q' quit
    Toggle,
}

// ── Cleanup ───────────────────────────────────────────────────
//
// Owns everything the loop mutates so that the board is left safe on
// every way out of `main`, including `?` returns.

struct Session {
    driver: PollingDriver,
    gpio: SimGpio,
    sink: LogEventSink,
}

impl Drop for Session {
    fn drop(&mut self) {
        self.driver.shutdown(&mut self.gpio, &mut self.sink);
    }
}

/// Route the `log` facade to stderr, filtered by [`LOG_ENV`] (default
/// `info`).  Stdout stays free for the key prompt.
fn init_logging() -> core::result::Result<(), log::SetLoggerError> {
    Builder::from_env(Env::new().filter_or(LOG_ENV, "info")).try_init()
}

fn load_config(cli: &Cli) -> Result<DriverConfig> {
    let mode = match cli.mode {
        ModeCommand::Switch => AppMode::Switch,
        ModeCommand::Toggle => AppMode::Toggle,
    };
    let mut config = DriverConfig::for_mode(mode);

    if let Some(path) = &cli.config {
        let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        let file = ConfigFile::from_json(&text).with_context(|| format!("parsing {}", path.display()))?;
        config = file.apply(config);
    }
    if let Some(v) = cli.poll_ms {
        config.poll_interval_ms = v;
    }
    if let Some(v) = cli.debounce_ms {
        config.debounce_ms = v;
    }

    config.validate().context("invalid configuration")?;
    Ok(config)
}

fn run(session: &mut Session, clock: &impl Clock, commands: &mut impl CommandSource) {
    let Session { driver, gpio, sink } = session;
    while driver.tick(clock.now(), gpio, commands, sink) == TickOutcome::Continue {
        thread::sleep(IDLE);
    }
}

fn main() -> Result<()> {
    init_logging().context("installing logger")?;
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    info!("LedSim v{}", env!("CARGO_PKG_VERSION"));

    let clock = MonotonicClock::new();
    let mut session = Session {
        driver: PollingDriver::new(config)?,
        gpio: SimGpio::new(),
        sink: LogEventSink::new(),
    };
    {
        let Session { driver, gpio, sink } = &mut session;
        driver.start(clock.now(), gpio, sink).context("configuring pins")?;
    }

    let config = session.driver.config();
    if config.script.is_empty() {
        match config.mode {
            AppMode::Switch => println!("SWITCH: '1' press, '0' release, 'q' quit (then Enter)"),
            AppMode::Toggle => println!("TOGGLE: '1' toggles the LED, 'q' quit (then Enter)"),
        }
        let mut keys = StdinCommands::spawn().context("starting keyboard reader")?;
        run(&mut session, &clock, &mut keys);
    } else {
        info!("Replaying {} scripted steps", config.script.len());
        let mut script = ScriptedCommands::new(config.script.clone(), clock.now());
        run(&mut session, &clock, &mut script);
    }

    Ok(())
}
