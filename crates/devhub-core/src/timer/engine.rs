//! Countdown timer engine.
//!
//! A wall-clock-based state machine with no internal thread: the caller
//! invokes `tick()` roughly once per second while the timer is running.
//! Remaining time is always derived from the captured start instant, never
//! from the number of ticks, so late or missed ticks do not accumulate drift.
//!
//! ## State Transitions
//!
//! ```text
//! Idle --start--> Running --pause--> Paused --start--> Running
//! Running --tick (reaches 0)--> Idle
//! any --reset--> Idle
//! ```

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::clock::{Clock, SystemClock};
use super::duration::{Hms, RequestedDuration};
use crate::events::{Event, RejectReason};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    #[default]
    Idle,
    Running,
    Paused,
}

impl TimerState {
    /// Status label shown next to the display.
    pub fn label(&self) -> &'static str {
        match self {
            TimerState::Idle => "Ready",
            TimerState::Running => "Running",
            TimerState::Paused => "Paused",
        }
    }
}

/// Core countdown timer.
#[derive(Debug, Clone)]
pub struct CountdownTimer<C: Clock = SystemClock> {
    clock: C,
    state: TimerState,
    total_secs: u64,
    remaining_secs: u64,
    /// Instant elapsed time is measured from. Only set while Running.
    start_epoch: Option<DateTime<Utc>>,
}

impl CountdownTimer<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for CountdownTimer<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> CountdownTimer<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            state: TimerState::Idle,
            total_secs: 0,
            remaining_secs: 0,
            start_epoch: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn total_secs(&self) -> u64 {
        self.total_secs
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn remaining_hms(&self) -> Hms {
        Hms::from_secs(self.remaining_secs)
    }

    pub fn start_epoch(&self) -> Option<DateTime<Utc>> {
        self.start_epoch
    }

    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            state: self.state,
            total_secs: self.total_secs,
            remaining_secs: self.remaining_secs,
            at: self.clock.now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Start a new run from Idle, or resume from Paused.
    ///
    /// `requested` is only consulted when starting from Idle. Returns `None`
    /// when already running.
    pub fn start(&mut self, requested: impl FnOnce() -> RequestedDuration) -> Option<Event> {
        let now = self.clock.now();
        match self.state {
            TimerState::Running => None,
            TimerState::Idle => {
                let requested = requested();
                if requested.is_zero() {
                    info!("start rejected: no duration configured");
                    return Some(Event::StartRejected {
                        reason: RejectReason::ZeroDuration,
                        at: now,
                    });
                }
                let total = requested.total_secs();
                self.total_secs = total;
                self.remaining_secs = total;
                self.state = TimerState::Running;
                self.start_epoch = Some(now);
                debug!(total_secs = total, "timer started");
                Some(Event::TimerStarted {
                    total_secs: total,
                    at: now,
                })
            }
            TimerState::Paused => {
                let elapsed = self.total_secs - self.remaining_secs;
                self.start_epoch = Some(now - secs(elapsed));
                self.state = TimerState::Running;
                debug!(remaining_secs = self.remaining_secs, "timer resumed");
                Some(Event::TimerResumed {
                    remaining_secs: self.remaining_secs,
                    at: now,
                })
            }
        }
    }

    /// Freeze the countdown. No-op unless running.
    ///
    /// If the clock shows the run already finished, completes instead.
    pub fn pause(&mut self) -> Option<Event> {
        if self.state != TimerState::Running {
            return None;
        }
        let now = self.clock.now();
        self.recompute(now);
        if self.remaining_secs == 0 {
            return Some(self.complete(now));
        }
        self.state = TimerState::Paused;
        self.start_epoch = None;
        debug!(remaining_secs = self.remaining_secs, "timer paused");
        Some(Event::TimerPaused {
            remaining_secs: self.remaining_secs,
            at: now,
        })
    }

    pub fn reset(&mut self) -> Event {
        self.clear();
        debug!("timer reset");
        Event::TimerReset {
            at: self.clock.now(),
        }
    }

    /// Recompute remaining time. Call about once per second while running.
    ///
    /// Returns `TimerCompleted` when the countdown reaches zero, `TimerTicked`
    /// otherwise, and `None` when not running.
    pub fn tick(&mut self) -> Option<Event> {
        if self.state != TimerState::Running {
            return None;
        }
        let now = self.clock.now();
        self.recompute(now);
        if self.remaining_secs == 0 {
            return Some(self.complete(now));
        }
        Some(Event::TimerTicked {
            remaining_secs: self.remaining_secs,
            at: now,
        })
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn recompute(&mut self, now: DateTime<Utc>) {
        if let Some(start) = self.start_epoch {
            // Clock going backwards counts as zero elapsed.
            let elapsed = (now - start).num_seconds().max(0) as u64;
            self.remaining_secs = self.total_secs.saturating_sub(elapsed);
        }
    }

    fn complete(&mut self, now: DateTime<Utc>) -> Event {
        let total = self.total_secs;
        self.clear();
        info!(total_secs = total, "timer completed");
        Event::TimerCompleted {
            total_secs: total,
            at: now,
        }
    }

    fn clear(&mut self) {
        self.state = TimerState::Idle;
        self.total_secs = 0;
        self.remaining_secs = 0;
        self.start_epoch = None;
    }
}

fn secs(n: u64) -> Duration {
    Duration::seconds(i64::try_from(n).unwrap_or(i64::MAX))
}
