//! Terminal geometry and the scaled grayscale frame buffer.

use std::fmt;

/// Terminal size in character cells, captured once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalDimensions {
    pub width: u16,
    pub height: u16,
}

impl TerminalDimensions {
    /// Fallback used when no terminal size can be queried.
    pub const FALLBACK: Self = Self {
        width: 80,
        height: 24,
    };

    /// Build dimensions, rejecting zero-sized grids.
    pub fn new(width: u16, height: u16) -> Option<Self> {
        if width == 0 || height == 0 {
            None
        } else {
            Some(Self { width, height })
        }
    }

    /// Query the size of the terminal attached to stdout.
    ///
    /// The picture is `reserve_rows` rows shorter than the terminal: with the
    /// default of 1, a 24-row terminal yields a 23-row picture. The rows left
    /// free below it absorb the `\r\n` after the last picture row, which
    /// would otherwise scroll the screen by one line per frame. Returns
    /// `None` when stdout is not a terminal or the remaining area is empty.
    pub fn query(reserve_rows: u16) -> Option<Self> {
        let (terminal_size::Width(cols), terminal_size::Height(rows)) =
            terminal_size::terminal_size()?;
        Self::below_reserve(cols, rows, reserve_rows)
    }

    /// Picture grid for a `cols` x `rows` terminal with `reserve_rows` free.
    pub fn below_reserve(cols: u16, rows: u16, reserve_rows: u16) -> Option<Self> {
        Self::new(cols, rows.saturating_sub(reserve_rows))
    }

    /// Number of cells in the grid.
    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

impl fmt::Display for TerminalDimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Row-major 8-bit grayscale pixels sized to the terminal grid.
///
/// Allocated once before playback and overwritten in place for every frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaledFrameBuffer {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl ScaledFrameBuffer {
    /// Allocate a black buffer for `dims`.
    pub fn new(dims: TerminalDimensions) -> Self {
        Self {
            width: dims.width as usize,
            height: dims.height as usize,
            pixels: vec![0; dims.area()],
        }
    }

    /// Build a buffer from existing pixels. Returns `None` on a size mismatch.
    pub fn from_pixels(width: usize, height: usize, pixels: Vec<u8>) -> Option<Self> {
        if width == 0 || height == 0 || width.checked_mul(height)? != pixels.len() {
            return None;
        }
        Some(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Mutable access for the decoder. The length is fixed.
    pub fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    /// Iterate rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.pixels.chunks_exact(self.width.max(1))
    }

    /// Overwrite every pixel with `value`.
    pub fn fill(&mut self, value: u8) {
        self.pixels.fill(value);
    }
}
