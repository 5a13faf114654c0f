//! Player state management
//!
//! Contains the playback phase machine, the running statistics kept by the
//! loop, and the result and error types returned to callers.

use std::fmt;
use std::time::Duration;

use crate::decode::DecodeError;

/// Lifecycle of one playback.
///
/// `Starting -> Running -> Draining -> Stopped`; any failure during
/// `Starting` or `Running` goes straight to `Stopped`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackPhase {
    Starting,
    Running,
    Draining,
    Stopped,
}

impl PlaybackPhase {
    /// Whether `self -> next` is a legal transition.
    pub fn can_transition_to(self, next: PlaybackPhase) -> bool {
        use PlaybackPhase::*;
        matches!(
            (self, next),
            (Starting, Running)
                | (Starting, Stopped)
                | (Running, Draining)
                | (Running, Stopped)
                | (Draining, Stopped)
        )
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Starting => "starting",
            Self::Running => "running",
            Self::Draining => "draining",
            Self::Stopped => "stopped",
        }
    }
}

impl fmt::Display for PlaybackPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What the player should do after an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputResult {
    /// Keep playing.
    Continue,
    /// Stop playback at the next opportunity.
    Quit,
}

/// Why the loop left `Running`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The source ran out of frames.
    EndOfStream,
    /// A quit key or termination signal arrived during a wait.
    Cancelled,
}

/// Counters collected while playing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlaybackStats {
    /// Frames drawn to the terminal.
    pub frames_drawn: u64,
    /// Decode attempts that produced nothing displayable.
    pub frames_skipped: u64,
    /// Drawn frames whose processing exceeded the frame interval.
    pub late_frames: u64,
    /// Total time the pacer spent blocking.
    pub time_waited: Duration,
    /// Wall time from the first iteration to the stop.
    pub wall_time: Duration,
}

impl PlaybackStats {
    /// Achieved frame rate over the whole playback.
    pub fn effective_fps(&self) -> f64 {
        let secs = self.wall_time.as_secs_f64();
        if secs > 0.0 {
            self.frames_drawn as f64 / secs
        } else {
            0.0
        }
    }

    /// One-line summary for the end of playback.
    pub fn summary(&self) -> String {
        format!(
            "{} frames drawn, {} skipped, {} late, {:.1}s ({:.2} fps)",
            self.frames_drawn,
            self.frames_skipped,
            self.late_frames,
            self.wall_time.as_secs_f64(),
            self.effective_fps()
        )
    }
}

/// How a playback that did not fail ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackResult {
    /// Played to the end of the stream.
    Finished(PlaybackStats),
    /// Stopped by the user before the end.
    Interrupted(PlaybackStats),
}

impl PlaybackResult {
    pub fn stats(&self) -> &PlaybackStats {
        match self {
            Self::Finished(stats) | Self::Interrupted(stats) => stats,
        }
    }

    pub fn is_interrupted(&self) -> bool {
        matches!(self, Self::Interrupted(_))
    }
}

/// Fatal playback errors.
#[derive(Debug, thiserror::Error)]
pub enum PlaybackError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("terminal output failed: {0}")]
    Output(#[source] std::io::Error),

    #[error("terminal setup failed: {0}")]
    Terminal(#[source] std::io::Error),

    #[error("cannot determine terminal size")]
    NoTerminalSize,
}
