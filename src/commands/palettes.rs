//! List the built-in palettes.

use anyhow::Result;

use glyphplay::glyph::{GlyphPalette, LuminanceQuantizer, PRESETS};

/// Width of the sample gradient printed next to each palette.
const SAMPLE_WIDTH: usize = 32;

/// A left-to-right black to white ramp rendered with `palette`.
pub fn gradient(palette: &GlyphPalette, width: usize) -> String {
    let quantizer = LuminanceQuantizer::new(palette.clone());
    let last = width.saturating_sub(1).max(1);
    (0..width)
        .map(|x| {
            let sample = (x * 255 / last).min(255) as u8;
            quantizer.glyph(sample)
        })
        .collect()
}

#[cfg(not(tarpaulin_include))]
pub fn handle() -> Result<()> {
    for (name, ramp, description) in PRESETS {
        let palette = GlyphPalette::new(ramp)?;
        println!("{:<10} {} ({} glyphs)", name, description, palette.len());
        println!("           [{}]", gradient(&palette, SAMPLE_WIDTH));
    }
    println!();
    println!("Any other string of at least two single-width glyphs is used as a literal ramp,");
    println!("darkest first, e.g. --palette ' .oO@'.");
    Ok(())
}
