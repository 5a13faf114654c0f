//! Time sources for the frame pacer.
//!
//! The pacer never calls `Instant::now()` or `thread::sleep` directly; it goes
//! through a [`Clock`] so that the wait can be made cancellable and so tests
//! can run against virtual time.

use std::cell::Cell;
use std::rc::Rc;
use std::thread;
use std::time::{Duration, Instant};

/// How a blocking wait ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wake {
    /// The full duration elapsed.
    Elapsed,
    /// The wait was cut short by a cancellation request.
    Cancelled,
}

/// A monotonic time source with a blocking wait.
pub trait Clock {
    fn now(&self) -> Instant;

    /// Block for `duration`, or less if cancelled.
    fn sleep(&mut self, duration: Duration) -> Wake;

    /// Non-blocking check for a pending cancellation. Used when a frame ran
    /// late and there is nothing to wait for.
    fn poll_cancel(&mut self) -> bool {
        false
    }
}

/// Real time, uninterruptible sleep.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&mut self, duration: Duration) -> Wake {
        thread::sleep(duration);
        Wake::Elapsed
    }
}

/// Virtual time that only moves when told to.
///
/// Clones share the same timeline, so a scripted frame source can hold a
/// clone and simulate decode cost with [`ManualClock::advance`].
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<Instant>>,
    sleeps: Rc<Cell<usize>>,
    slept: Rc<Cell<Duration>>,
    cancel_after: Rc<Cell<Option<usize>>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Rc::new(Cell::new(Instant::now())),
            sleeps: Rc::new(Cell::new(0)),
            slept: Rc::new(Cell::new(Duration::ZERO)),
            cancel_after: Rc::new(Cell::new(None)),
        }
    }

    /// Move virtual time forward.
    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    /// Number of `sleep` calls so far.
    pub fn sleep_count(&self) -> usize {
        self.sleeps.get()
    }

    /// Total virtual time spent sleeping.
    pub fn total_slept(&self) -> Duration {
        self.slept.get()
    }

    /// Make the `n`-th sleep (1-based) report a cancellation.
    pub fn cancel_on_sleep(&self, n: usize) {
        self.cancel_after.set(Some(n));
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }

    fn sleep(&mut self, duration: Duration) -> Wake {
        let count = self.sleeps.get() + 1;
        self.sleeps.set(count);
        if self.cancel_after.get() == Some(count) {
            return Wake::Cancelled;
        }
        self.advance(duration);
        self.slept.set(self.slept.get() + duration);
        Wake::Elapsed
    }
}
