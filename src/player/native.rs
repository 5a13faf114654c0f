//! Playing a video file on the attached terminal.
//!
//! Wires the `ffprobe`/`ffmpeg` source, the terminal guard and the
//! interactive clock into a [`PlaybackLoop`]. Everything that can fail
//! before the first frame (probe, size query, spawning the decoder, decoding
//! the first frame) happens before the terminal is touched.

use std::io;
use std::path::Path;

use crate::decode::{probe, FfmpegOptions, FfmpegSource, StreamInfo};
use crate::frame::TerminalDimensions;
use crate::glyph::{GlyphPalette, LuminanceQuantizer};
use crate::player::pacing::{is_valid_rate, FrameInterval, FALLBACK_FPS};
use crate::player::playback::PlaybackLoop;
use crate::player::state::{PlaybackError, PlaybackResult};
use crate::player::terminal::{InteractiveClock, TerminalGuard};

/// Everything [`play_file`] needs besides the path.
#[derive(Debug, Clone)]
pub struct PlayOptions {
    pub palette: GlyphPalette,
    /// Forced frame rate; overrides whatever the stream declares.
    pub fps: Option<f64>,
    /// Rate used when the stream declares none.
    pub fallback_fps: f64,
    /// Rows left free below the picture.
    pub reserve_rows: u16,
    /// Explicit picture size instead of the terminal size.
    pub size: Option<TerminalDimensions>,
    pub ffprobe: String,
    pub decoder: FfmpegOptions,
}

impl Default for PlayOptions {
    fn default() -> Self {
        Self {
            palette: GlyphPalette::standard(),
            fps: None,
            fallback_fps: FALLBACK_FPS,
            reserve_rows: 1,
            size: None,
            ffprobe: "ffprobe".to_string(),
            decoder: FfmpegOptions::default(),
        }
    }
}

/// Frame interval for a stream: forced rate, else declared average rate,
/// else the fallback.
pub fn effective_interval(info: &StreamInfo, fps: Option<f64>, fallback_fps: f64) -> FrameInterval {
    let forced = fps.filter(|rate| is_valid_rate(*rate));
    FrameInterval::from_rate(forced.or(info.avg_frame_rate), fallback_fps)
}

/// Picture size for this run.
///
/// An explicit size always wins. Without one, a terminal is queried and
/// anything else gets [`TerminalDimensions::FALLBACK`].
pub fn resolve_dimensions(
    size: Option<TerminalDimensions>,
    interactive: bool,
    reserve_rows: u16,
) -> Result<TerminalDimensions, PlaybackError> {
    match size {
        Some(dims) => Ok(dims),
        None if interactive => {
            TerminalDimensions::query(reserve_rows).ok_or(PlaybackError::NoTerminalSize)
        }
        None => Ok(TerminalDimensions::FALLBACK),
    }
}

/// Play `path` on stdout until it ends or the user quits.
///
/// When stdout is not a terminal the frames are still written, but raw mode
/// and key handling are skipped.
pub fn play_file(path: &Path, options: &PlayOptions) -> Result<PlaybackResult, PlaybackError> {
    let info = probe(&options.ffprobe, path)?;
    let interval = effective_interval(&info, options.fps, options.fallback_fps);

    let interactive = atty::is(atty::Stream::Stdout);
    let dims = resolve_dimensions(options.size, interactive, options.reserve_rows)?;
    tracing::info!(
        path = %path.display(),
        dims = %dims,
        fps = interval.fps(),
        interactive,
        "opening video"
    );

    let source = FfmpegSource::open(path, dims, &options.decoder)?;
    let quantizer = LuminanceQuantizer::new(options.palette.clone());
    let clock = InteractiveClock::new(interactive && atty::is(atty::Stream::Stdin))
        .map_err(PlaybackError::Terminal)?;

    let mut playback =
        PlaybackLoop::new(source, clock, io::stdout().lock(), dims, quantizer, interval);
    playback.prime()?;

    let _guard = if interactive {
        Some(TerminalGuard::acquire().map_err(PlaybackError::Terminal)?)
    } else {
        None
    };

    playback.run()
}
