//! Frame pacing for the player.
//!
//! - `interval`: target frame interval derived from the stream's frame rate
//! - `clock`: time sources (real, virtual) with an optionally cancellable wait
//! - `pacer`: the drift-free, never-negative wait between frames

mod clock;
mod interval;
mod pacer;

pub use clock::{Clock, ManualClock, SystemClock, Wake};
pub use interval::{is_valid_rate, FrameInterval, FALLBACK_FPS, MAX_FPS, MIN_FPS};
pub use pacer::{remaining_wait, FramePacer, Tick};
