//! Luminance quantization.
//!
//! Maps an 8-bit grayscale sample onto a palette index with
//! `floor(sample / 255 * (N - 1))`. The mapping is precomputed for all 256
//! samples when the quantizer is built.

use super::palette::GlyphPalette;

/// Quantizes grayscale samples to glyphs of a fixed palette.
#[derive(Debug, Clone)]
pub struct LuminanceQuantizer {
    palette: GlyphPalette,
    indices: [usize; 256],
}

/// Index of `sample` in a ramp of `len` glyphs.
///
/// Monotonic non-decreasing in `sample`; `0` maps to `0` and `255` maps to
/// `len - 1`.
#[inline]
pub fn quantize_index(sample: u8, len: usize) -> usize {
    let top = len.saturating_sub(1);
    let index = ((sample as f64 / 255.0) * top as f64).floor() as usize;
    index.min(top)
}

impl LuminanceQuantizer {
    /// Build the lookup table for `palette`.
    pub fn new(palette: GlyphPalette) -> Self {
        let len = palette.len();
        let mut indices = [0usize; 256];
        for (sample, slot) in indices.iter_mut().enumerate() {
            *slot = quantize_index(sample as u8, len);
        }
        Self { palette, indices }
    }

    /// Palette index for `sample`.
    #[inline]
    pub fn quantize(&self, sample: u8) -> usize {
        self.indices[sample as usize]
    }

    /// Glyph for `sample`.
    #[inline]
    pub fn glyph(&self, sample: u8) -> char {
        self.palette.glyphs()[self.quantize(sample)]
    }
}
