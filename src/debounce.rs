//! Software debounce filters for a single polled signal.
//!
//! ## Algorithm
//!
//! Both filters share one state shape and one transition function:
//!
//! | Observation                  | Action                                        |
//! |------------------------------|-----------------------------------------------|
//! | `raw == last_stable`         | `candidate := last_stable`, restart the timer |
//! | `raw != candidate`           | `candidate := raw`, restart the timer         |
//! | `raw == candidate`, held ≥ window | promote: `last_stable := candidate`      |
//!
//! The first row runs on *every* call where the signal sits at the accepted
//! level, so a signal that later wanders off and comes back must sit out a
//! full fresh window before it is accepted again.  Stability history is
//! never accumulated across detours.
//!
//! [`LevelFilter`] reports the accepted level on every call; [`EdgeFilter`]
//! reports `true` exactly once per accepted Low → High transition.
//!
//! A filter carries no pin identity: dedicate one instance per monitored
//! signal.

use embassy_time::{Duration, Instant};

use crate::app::ports::Clock;
use crate::gpio::Level;

/// Filter state: the accepted level plus the level being evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterState {
    pub last_stable: Level,
    pub candidate: Level,
    pub candidate_since: Instant,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            last_stable: Level::Low,
            candidate: Level::Low,
            candidate_since: Instant::from_ticks(0),
        }
    }
}

/// Result of one transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// Accepted level after this call.
    pub stable: Level,
    /// `true` if this call promoted the candidate.
    pub promoted: bool,
}

/// Advance `state` by one observation.
pub fn step(state: &mut FilterState, raw: Level, window: Duration, now: Instant) -> Transition {
    let mut promoted = false;

    if raw == state.last_stable {
        state.candidate = state.last_stable;
        state.candidate_since = now;
    } else if raw != state.candidate {
        state.candidate = raw;
        state.candidate_since = now;
    } else {
        // A clock that stepped backwards counts as no time elapsed.
        let held = now
            .checked_duration_since(state.candidate_since)
            .unwrap_or(Duration::from_ticks(0));
        if held >= window {
            state.last_stable = state.candidate;
            promoted = true;
        }
    }

    Transition {
        stable: state.last_stable,
        promoted,
    }
}

// ---------------------------------------------------------------------------
// Level filter
// ---------------------------------------------------------------------------

/// Debounced level: follows the input once it has held for the window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LevelFilter {
    state: FilterState,
}

impl LevelFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one raw sample taken at `now`; returns the accepted level.
    pub fn update(&mut self, raw: Level, window: Duration, now: Instant) -> Level {
        step(&mut self.state, raw, window, now).stable
    }

    /// [`update`](Self::update) timestamped by `clock`.
    pub fn poll(&mut self, raw: Level, window: Duration, clock: &impl Clock) -> Level {
        self.update(raw, window, clock.now())
    }

    pub fn stable(&self) -> Level {
        self.state.last_stable
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }
}

// ---------------------------------------------------------------------------
// Edge filter
// ---------------------------------------------------------------------------

/// Debounced press detector: one `true` per accepted Low → High edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EdgeFilter {
    state: FilterState,
}

impl EdgeFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one raw sample taken at `now`; `true` only on the call that
    /// confirms a press.
    pub fn update(&mut self, raw: Level, window: Duration, now: Instant) -> bool {
        let t = step(&mut self.state, raw, window, now);
        t.promoted && t.stable == Level::High
    }

    /// [`update`](Self::update) timestamped by `clock`.
    pub fn poll(&mut self, raw: Level, window: Duration, clock: &impl Clock) -> bool {
        self.update(raw, window, clock.now())
    }

    pub fn stable(&self) -> Level {
        self.state.last_stable
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }
}
