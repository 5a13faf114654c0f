//! Best-effort fixed-rate frame pacing.
//!
//! After each drawn frame the pacer blocks for whatever is left of the frame
//! interval. Overruns are never paid back: a late frame is followed
//! immediately by the next one and the effective rate degrades. The timing
//! reference is re-read from the clock after every wait, so rounding and
//! oversleep do not accumulate across frames.

use std::time::{Duration, Instant};

use super::clock::{Clock, Wake};
use super::interval::FrameInterval;

/// Time left to wait, or `None` if the iteration already used the interval.
pub fn remaining_wait(
    target: Duration,
    iteration_start: Instant,
    processing_end: Instant,
) -> Option<Duration> {
    let elapsed = processing_end.saturating_duration_since(iteration_start);
    target.checked_sub(elapsed).filter(|left| !left.is_zero())
}

/// Result of one pacing step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    /// Reference for the next iteration, read after the wait completed.
    pub started: Instant,
    /// How long the pacer asked the clock to block.
    pub waited: Duration,
    /// True if the wait was cut short by a cancellation.
    pub cancelled: bool,
}

/// Keeps iteration period at the frame interval.
#[derive(Debug, Clone)]
pub struct FramePacer {
    interval: FrameInterval,
    last_tick: Instant,
    late_frames: u64,
}

impl FramePacer {
    /// Start pacing with `start` as the first iteration's reference.
    pub fn new(interval: FrameInterval, start: Instant) -> Self {
        Self {
            interval,
            last_tick: start,
            late_frames: 0,
        }
    }

    /// Start of the current iteration.
    pub fn last_tick(&self) -> Instant {
        self.last_tick
    }

    /// Frames whose processing alone exceeded the interval.
    pub fn late_frames(&self) -> u64 {
        self.late_frames
    }

    /// Block until the next frame is due, then reset the reference.
    pub fn wait_for_next_frame<C: Clock>(&mut self, clock: &mut C, processing_end: Instant) -> Tick {
        let (waited, wake) =
            match remaining_wait(self.interval.duration(), self.last_tick, processing_end) {
                Some(left) => (left, clock.sleep(left)),
                None => {
                    self.late_frames += 1;
                    tracing::trace!(
                        overrun_us = processing_end
                            .saturating_duration_since(self.last_tick)
                            .saturating_sub(self.interval.duration())
                            .as_micros() as u64,
                        "frame ran late"
                    );
                    let wake = if clock.poll_cancel() {
                        Wake::Cancelled
                    } else {
                        Wake::Elapsed
                    };
                    (Duration::ZERO, wake)
                }
            };

        self.last_tick = clock.now();
        Tick {
            started: self.last_tick,
            waited,
            cancelled: wake == Wake::Cancelled,
        }
    }
}
