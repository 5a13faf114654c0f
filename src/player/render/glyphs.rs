//! Full-frame glyph rendering.
//!
//! Every frame is a complete in-place overwrite: cursor home, then `height`
//! rows of exactly `width` glyphs, each row ended by `\r\n`. The screen is
//! never cleared between frames, so there is nothing for the eye to catch
//! between two redraws.

use std::io::{self, Write};

use crate::frame::ScaledFrameBuffer;
use crate::glyph::LuminanceQuantizer;

/// Moves the cursor to row 1, column 1.
pub const CURSOR_HOME: &str = "\x1b[H";

/// Row terminator. Raw mode disables output post-processing, so the
/// carriage return has to be explicit.
pub const ROW_TERMINATOR: &str = "\r\n";

/// Draws scaled frames as glyph grids.
///
/// The output string is kept between frames so steady-state drawing does not
/// allocate.
#[derive(Debug, Default)]
pub struct TerminalRenderer {
    output: String,
}

impl TerminalRenderer {
    /// Renderer with room for a `width` x `height` grid of ASCII glyphs.
    pub fn with_capacity(width: usize, height: usize) -> Self {
        Self {
            output: String::with_capacity(frame_capacity(width, height)),
        }
    }

    /// Compose the escape sequence and glyph rows for `buffer`.
    pub fn compose(&mut self, buffer: &ScaledFrameBuffer, quantizer: &LuminanceQuantizer) -> &str {
        self.output.clear();
        self.output.push_str(CURSOR_HOME);
        for row in buffer.rows() {
            for &sample in row {
                self.output.push(quantizer.glyph(sample));
            }
            self.output.push_str(ROW_TERMINATOR);
        }
        &self.output
    }

    /// Compose and write one frame with a single write, then flush.
    pub fn draw<W: Write>(
        &mut self,
        out: &mut W,
        buffer: &ScaledFrameBuffer,
        quantizer: &LuminanceQuantizer,
    ) -> io::Result<()> {
        self.compose(buffer, quantizer);
        out.write_all(self.output.as_bytes())?;
        out.flush()
    }
}

fn frame_capacity(width: usize, height: usize) -> usize {
    CURSOR_HOME.len() + height * (width + ROW_TERMINATOR.len())
}

/// Render `buffer` to a fresh string.
pub fn render_frame(buffer: &ScaledFrameBuffer, quantizer: &LuminanceQuantizer) -> String {
    let mut renderer = TerminalRenderer::with_capacity(buffer.width(), buffer.height());
    renderer.compose(buffer, quantizer).to_string()
}
