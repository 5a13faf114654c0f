//! The playback loop.
//!
//! One iteration pulls a frame into the scaled buffer, draws it and waits for
//! the next frame slot. Attempts that yield no frame are skipped without
//! drawing or waiting, and without moving the pacer's reference.
//!
//! [`PlaybackLoop::prime`] decodes ahead to the first frame so a decoder
//! that fails outright is reported before the caller takes over the
//! terminal.

use std::io::Write;

use crate::decode::{Decoded, FrameSource};
use crate::frame::{ScaledFrameBuffer, TerminalDimensions};
use crate::glyph::LuminanceQuantizer;
use crate::player::pacing::{Clock, FrameInterval, FramePacer};
use crate::player::render::TerminalRenderer;
use crate::player::state::{
    PlaybackError, PlaybackPhase, PlaybackResult, PlaybackStats, StopReason,
};

/// Drives a [`FrameSource`] into a writer at the stream's frame rate.
///
/// The loop owns the only frame buffer. It is allocated in [`new`] and
/// overwritten in place by the source on every iteration.
///
/// [`new`]: PlaybackLoop::new
pub struct PlaybackLoop<S, C, W> {
    source: S,
    clock: C,
    out: W,
    buffer: ScaledFrameBuffer,
    quantizer: LuminanceQuantizer,
    renderer: TerminalRenderer,
    interval: FrameInterval,
    phase: PlaybackPhase,
    /// First decode result, pulled early by `prime`.
    pending: Option<Decoded>,
    primed_skips: u64,
}

impl<S, C, W> PlaybackLoop<S, C, W>
where
    S: FrameSource,
    C: Clock,
    W: Write,
{
    /// Allocate the frame buffer and renderer for `dims`.
    pub fn new(
        source: S,
        clock: C,
        out: W,
        dims: TerminalDimensions,
        quantizer: LuminanceQuantizer,
        interval: FrameInterval,
    ) -> Self {
        Self {
            source,
            clock,
            out,
            buffer: ScaledFrameBuffer::new(dims),
            quantizer,
            renderer: TerminalRenderer::with_capacity(dims.width as usize, dims.height as usize),
            interval,
            phase: PlaybackPhase::Starting,
            pending: None,
            primed_skips: 0,
        }
    }

    /// Decode up to the first frame (or the end of the stream) without
    /// drawing anything.
    ///
    /// A decoder error stops the loop here. Calling it again after success
    /// does nothing; [`run`] starts from the primed result.
    ///
    /// [`run`]: PlaybackLoop::run
    pub fn prime(&mut self) -> Result<(), PlaybackError> {
        if self.pending.is_some() {
            return Ok(());
        }
        loop {
            match self.source.next_frame(&mut self.buffer) {
                Ok(Decoded::NoFrame) => self.primed_skips += 1,
                Ok(decoded) => {
                    tracing::debug!(first = ?decoded, skipped = self.primed_skips, "decoder primed");
                    self.pending = Some(decoded);
                    return Ok(());
                }
                Err(e) => {
                    self.transition(PlaybackPhase::Stopped);
                    return Err(e.into());
                }
            }
        }
    }

    pub fn phase(&self) -> PlaybackPhase {
        self.phase
    }

    fn transition(&mut self, next: PlaybackPhase) {
        debug_assert!(
            self.phase.can_transition_to(next),
            "illegal playback transition {} -> {}",
            self.phase,
            next
        );
        tracing::info!(from = %self.phase, to = %next, "playback phase");
        self.phase = next;
    }

    /// Play until end of stream, cancellation or a fatal error.
    pub fn run(mut self) -> Result<PlaybackResult, PlaybackError> {
        self.transition(PlaybackPhase::Running);
        tracing::info!(
            width = self.buffer.width(),
            height = self.buffer.height(),
            fps = self.interval.fps(),
            "playback started"
        );

        let started = self.clock.now();
        let mut pacer = FramePacer::new(self.interval, started);
        let mut stats = PlaybackStats {
            frames_skipped: self.primed_skips,
            ..PlaybackStats::default()
        };

        let reason = loop {
            let attempt = match self.pending.take() {
                Some(decoded) => Ok(decoded),
                None => self.source.next_frame(&mut self.buffer),
            };
            match attempt {
                Ok(Decoded::Frame) => {}
                Ok(Decoded::NoFrame) => {
                    stats.frames_skipped += 1;
                    tracing::debug!(skipped = stats.frames_skipped, "no frame this attempt");
                    continue;
                }
                Ok(Decoded::EndOfStream) => break StopReason::EndOfStream,
                Err(e) => {
                    self.transition(PlaybackPhase::Stopped);
                    return Err(e.into());
                }
            }

            if let Err(e) = self
                .renderer
                .draw(&mut self.out, &self.buffer, &self.quantizer)
            {
                self.transition(PlaybackPhase::Stopped);
                return Err(PlaybackError::Output(e));
            }
            stats.frames_drawn += 1;

            let processing_end = self.clock.now();
            let tick = pacer.wait_for_next_frame(&mut self.clock, processing_end);
            stats.time_waited += tick.waited;
            if tick.cancelled {
                break StopReason::Cancelled;
            }
        };

        self.transition(PlaybackPhase::Draining);
        stats.late_frames = pacer.late_frames();
        stats.wall_time = self.clock.now().saturating_duration_since(started);
        if stats.late_frames > 0 {
            tracing::debug!(
                late = stats.late_frames,
                drawn = stats.frames_drawn,
                "some frames took longer than the frame interval"
            );
        }
        tracing::info!(reason = ?reason, summary = %stats.summary(), "playback stopped");
        self.transition(PlaybackPhase::Stopped);

        Ok(match reason {
            StopReason::EndOfStream => PlaybackResult::Finished(stats),
            StopReason::Cancelled => PlaybackResult::Interrupted(stats),
        })
    }
}
