//! Target frame interval.

use std::time::Duration;

/// Rate used when the source declares no positive frame rate.
pub const FALLBACK_FPS: f64 = 30.0;

/// Slowest frame rate accepted, one frame every 100 seconds.
pub const MIN_FPS: f64 = 0.01;

/// Fastest frame rate accepted.
pub const MAX_FPS: f64 = 1000.0;

/// Whether `fps` lies in `[MIN_FPS, MAX_FPS]`.
pub fn is_valid_rate(fps: f64) -> bool {
    fps.is_finite() && (MIN_FPS..=MAX_FPS).contains(&fps)
}

/// Wall-clock time between two displayed frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInterval {
    fps: f64,
    duration: Duration,
}

impl FrameInterval {
    /// Interval for `declared_fps`, falling back to `fallback_fps` when the
    /// declared rate is missing or outside [`MIN_FPS`]..=[`MAX_FPS`]. An
    /// out-of-range fallback is replaced by [`FALLBACK_FPS`].
    pub fn from_rate(declared_fps: Option<f64>, fallback_fps: f64) -> Self {
        let fps = match declared_fps {
            Some(rate) if is_valid_rate(rate) => rate,
            _ => fallback_fps,
        };
        let fps = if is_valid_rate(fps) { fps } else { FALLBACK_FPS };
        Self {
            fps,
            duration: Duration::from_secs_f64(1.0 / fps),
        }
    }

    /// Effective frame rate.
    pub fn fps(&self) -> f64 {
        self.fps
    }

    /// Target interval in microseconds (`1_000_000 / fps`).
    pub fn as_micros_f64(&self) -> f64 {
        1_000_000.0 / self.fps
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }
}

impl Default for FrameInterval {
    fn default() -> Self {
        Self::from_rate(None, FALLBACK_FPS)
    }
}
