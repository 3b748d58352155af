//! One-second countdown for a running game.
//!
//! The countdown is plain state; the caller drives it from `ticker()` (or
//! from tests, directly).

use std::time::Duration;

use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

/// Tick period of the game clock.
pub const TICK: Duration = Duration::from_secs(1);

/// Outcome of a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Still running, with this many seconds left.
    Running(u64),
    /// Reached zero on this tick. Reported once.
    Expired,
    /// Already expired earlier.
    Stopped,
}

/// Remaining whole seconds of a game session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Countdown {
    remaining: u64,
    expired: bool,
}

impl Countdown {
    /// Start from a server-supplied remaining time, floored to seconds.
    pub fn from_time_left(time_left: Duration) -> Self {
        Self {
            remaining: time_left.as_secs(),
            expired: false,
        }
    }

    pub fn tick(&mut self) -> Tick {
        if self.expired {
            return Tick::Stopped;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.expired = true;
            Tick::Expired
        } else {
            Tick::Running(self.remaining)
        }
    }

    /// Replace the remaining time with a fresh server value. Has no effect
    /// once the countdown expired.
    pub fn resync(&mut self, time_left: Duration) {
        if !self.expired {
            self.remaining = time_left.as_secs();
        }
    }

    pub fn remaining(&self) -> Duration {
        Duration::from_secs(self.remaining)
    }

    pub fn is_expired(&self) -> bool {
        self.expired
    }

    /// `m:ss` rendering of the remaining time.
    pub fn display(&self) -> String {
        format_time(self.remaining())
    }
}

/// Render a duration as `m:ss`.
pub fn format_time(time: Duration) -> String {
    let total = time.as_secs();
    format!("{}:{:02}", total / 60, total % 60)
}

/// An interval firing every second, starting one second from now.
pub fn ticker() -> Interval {
    let mut interval = interval_at(Instant::now() + TICK, TICK);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval
}
