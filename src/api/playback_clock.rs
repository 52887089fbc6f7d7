//! Playback timer as an explicit, cancellable scheduled-task handle.
//!
//! The clock does not own a real timer. Hosts either feed it elapsed time
//! through [`PlaybackClock::advance`] or schedule their own timer from
//! [`PlaybackClock::handle`] and report fires with [`PlaybackClock::fire`].
//! Every re-arm bumps the handle generation so fires from a torn-down timer
//! are ignored.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::PaneId;

/// Values the running timer depends on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimerDeps {
    pub pane: PaneId,
    pub playing: bool,
    pub speed: f64,
    pub total_bars: usize,
    pub seek: usize,
}

impl TimerDeps {
    fn same_except_seek(self, other: Self) -> bool {
        self.pane == other.pane
            && self.playing == other.playing
            && self.speed == other.speed
            && self.total_bars == other.total_bars
    }
}

/// Identity and period of the currently armed timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerHandle {
    pub generation: u64,
    pub interval: Duration,
}

/// What [`PlaybackClock::reconcile`] did with the timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockTransition {
    Unchanged,
    Armed(TimerHandle),
    Cancelled,
}

#[derive(Debug, Clone)]
pub struct PlaybackClock {
    base_interval: Duration,
    min_interval: Duration,
    handle: Option<TimerHandle>,
    deps: Option<TimerDeps>,
    elapsed: Duration,
    generation: u64,
    own_seek: Option<usize>,
}

impl PlaybackClock {
    #[must_use]
    pub fn new(base_interval: Duration, min_interval: Duration) -> Self {
        Self {
            base_interval,
            min_interval,
            handle: None,
            deps: None,
            elapsed: Duration::ZERO,
            generation: 0,
            own_seek: None,
        }
    }

    /// `max(min_interval, base_interval / speed)`; invalid speeds count as 1.
    #[must_use]
    pub fn interval_for(&self, speed: f64) -> Duration {
        let speed = if speed.is_finite() && speed > 0.0 {
            speed
        } else {
            1.0
        };
        let scaled = Duration::from_secs_f64(self.base_interval.as_secs_f64() / speed);
        scaled.max(self.min_interval)
    }

    #[must_use]
    pub fn handle(&self) -> Option<TimerHandle> {
        self.handle
    }

    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.handle.is_some()
    }

    /// Brings the timer in line with `deps`.
    ///
    /// Stops when not playing or without data. Re-arms on any dependency
    /// change except a seek the clock produced itself.
    pub fn reconcile(&mut self, deps: TimerDeps) -> ClockTransition {
        if !deps.playing || deps.total_bars == 0 {
            self.deps = Some(deps);
            return if self.cancel() {
                ClockTransition::Cancelled
            } else {
                ClockTransition::Unchanged
            };
        }

        if let (Some(previous), Some(_)) = (self.deps, self.handle) {
            let seek_is_own = self.own_seek == Some(deps.seek);
            if previous == deps || (previous.same_except_seek(deps) && seek_is_own) {
                self.deps = Some(deps);
                return ClockTransition::Unchanged;
            }
        }

        self.cancel();
        self.generation += 1;
        let handle = TimerHandle {
            generation: self.generation,
            interval: self.interval_for(deps.speed),
        };
        self.handle = Some(handle);
        self.deps = Some(deps);
        debug!(
            pane = deps.pane.index(),
            generation = handle.generation,
            interval_ms = handle.interval.as_millis() as u64,
            "playback timer armed"
        );
        ClockTransition::Armed(handle)
    }

    /// Tears the timer down. Returns whether one was armed; safe to repeat.
    pub fn cancel(&mut self) -> bool {
        self.elapsed = Duration::ZERO;
        self.own_seek = None;
        self.handle.take().is_some()
    }

    /// Accumulates `elapsed` and returns how many ticks came due.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        let Some(handle) = self.handle else {
            return 0;
        };
        self.elapsed += elapsed;
        let mut due = 0;
        while self.elapsed >= handle.interval && !handle.interval.is_zero() {
            self.elapsed -= handle.interval;
            due += 1;
        }
        due
    }

    /// Accepts a host timer fire only when it belongs to the live handle.
    #[must_use]
    pub fn fire(&self, generation: u64) -> bool {
        self.handle
            .is_some_and(|handle| handle.generation == generation)
    }

    /// Records the seek a tick just applied so the next reconcile keeps the
    /// timer running instead of re-arming it.
    pub fn note_tick_applied(&mut self, seek: usize) {
        self.own_seek = Some(seek);
    }
}

impl Default for PlaybackClock {
    fn default() -> Self {
        Self::new(Duration::from_millis(500), Duration::from_millis(50))
    }
}

/// Seek the active pane should move to on a tick, or `None` at the end.
#[must_use]
pub fn next_tick_seek(seek: usize, total_bars: usize) -> Option<usize> {
    let next = (seek + 1).min(total_bars.saturating_sub(1));
    (next != seek).then_some(next)
}
