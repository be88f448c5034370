//! # Debounced Save Scheduler
//!
//! Bursts of edits (typing, dragging, toggling) should not each hit storage.
//! Every edit re-arms a timer `quiet` after the edit; the save runs only once
//! the timer expires without another edit arriving. Structural changes bypass
//! this and save immediately, which also cancels any pending timer.
//!
//! There is no background thread. Time comes from a [`Clock`] and the owner
//! polls the scheduler from its event loop, so tests drive time by hand with
//! [`ManualClock`].

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Quiet period observed between the last edit and the save.
pub const DEFAULT_QUIET: Duration = Duration::from_millis(400);

pub trait Clock {
    fn now(&self) -> Instant;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<Instant>>,
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Rc::new(Cell::new(Instant::now())),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}

/// A single cancellable deadline.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SaveTimer {
    deadline: Option<Instant>,
}

impl SaveTimer {
    /// Arms the timer, replacing any earlier deadline.
    pub fn arm(&mut self, deadline: Instant) {
        self.deadline = Some(deadline);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Disarms and returns `true` if the deadline has been reached.
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SaveScheduler {
    quiet: Duration,
    timer: SaveTimer,
}

impl Default for SaveScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_QUIET)
    }
}

impl SaveScheduler {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            timer: SaveTimer::default(),
        }
    }

    pub fn quiet(&self) -> Duration {
        self.quiet
    }

    /// Changes the quiet period for future signals. A pending deadline is kept.
    pub fn set_quiet(&mut self, quiet: Duration) {
        self.quiet = quiet;
    }

    /// A mutation happened: restart the quiet period from `now`.
    pub fn signal(&mut self, now: Instant) {
        self.timer.arm(now + self.quiet);
    }

    /// Drops the pending save, if any. Used when an immediate save supersedes it.
    pub fn cancel(&mut self) {
        self.timer.cancel();
    }

    pub fn is_pending(&self) -> bool {
        self.timer.is_armed()
    }

    /// Time left before the pending save is due.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.timer
            .deadline()
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    /// Returns `true` exactly once per quiet period, when the save is due.
    pub fn poll(&mut self, now: Instant) -> bool {
        self.timer.fire_if_due(now)
    }

    /// Returns `true` if a save was pending, clearing it regardless of the deadline.
    pub fn take_pending(&mut self) -> bool {
        let pending = self.timer.is_armed();
        self.timer.cancel();
        pending
    }
}
