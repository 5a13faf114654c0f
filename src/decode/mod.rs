//! Decode-and-scale service.
//!
//! Turns a video file into a sequence of grayscale frames already scaled to
//! the terminal grid. The player only depends on the [`FrameSource`] trait;
//! the shipped implementation drives the system `ffprobe` / `ffmpeg`
//! executables:
//!
//! - `probe`: stream discovery and declared frame rate via `ffprobe`
//! - `ffmpeg`: raw gray8 frames streamed from an `ffmpeg` child process

mod ffmpeg;
mod probe;

use std::path::PathBuf;

use crate::frame::ScaledFrameBuffer;

pub use ffmpeg::{FfmpegOptions, FfmpegSource};
pub use probe::{parse_probe_output, parse_rate, probe, StreamInfo};

/// Outcome of one decode attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decoded {
    /// A frame was written into the buffer.
    Frame,
    /// This attempt produced nothing displayable; try again.
    NoFrame,
    /// The source is exhausted.
    EndOfStream,
}

/// Errors from the decode-and-scale service.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("cannot open source {path}: {message}")]
    SourceUnavailable { path: PathBuf, message: String },

    #[error("no video stream found in {path}")]
    NoVideoStream { path: PathBuf },

    #[error("decoder '{program}' is not available: {source}")]
    DecoderUnavailable {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("decoder failed: {message}")]
    DecoderFailed { message: String },

    #[error("cannot scale to {width}x{height}")]
    ScalerUnavailable { width: usize, height: usize },

    #[error("failed to read decoded frame: {0}")]
    Read(#[from] std::io::Error),

    #[error("malformed probe output: {0}")]
    Probe(#[from] serde_json::Error),
}

/// A synchronous producer of scaled grayscale frames.
///
/// Implementations overwrite `buffer` in place; they never resize it.
pub trait FrameSource {
    /// Decode the next frame into `buffer`.
    fn next_frame(&mut self, buffer: &mut ScaledFrameBuffer) -> Result<Decoded, DecodeError>;
}

impl<S: FrameSource + ?Sized> FrameSource for Box<S> {
    fn next_frame(&mut self, buffer: &mut ScaledFrameBuffer) -> Result<Decoded, DecodeError> {
        (**self).next_frame(buffer)
    }
}
