//! Glyph palettes and luminance quantization.
//!
//! - `palette`: ordered glyph ramps (built-in presets and custom ramps)
//! - `quantize`: maps 8-bit luminance samples onto palette indices

mod palette;
mod quantize;

pub use palette::{
    GlyphPalette, PaletteError, BLOCKS_RAMP, DETAILED_RAMP, MIN_GLYPHS, PRESETS, SIMPLE_RAMP,
    STANDARD_RAMP,
};
pub use quantize::{quantize_index, LuminanceQuantizer};
