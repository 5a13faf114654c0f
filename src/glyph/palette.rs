//! Glyph palettes.
//!
//! A palette is an ordered ramp of characters, emptiest first, densest last.
//! Palettes are validated once at construction and never change afterwards.

use std::fmt;

use unicode_width::UnicodeWidthChar;

/// The classic ramp: space through `@`.
pub const STANDARD_RAMP: &str = " .,:;i1tfLCG08@";

/// A short ten-step ramp that reads well on small terminals.
pub const SIMPLE_RAMP: &str = " .:-=+*#%@";

/// Unicode shade blocks.
pub const BLOCKS_RAMP: &str = " ░▒▓█";

/// A long ramp with fine gradations.
pub const DETAILED_RAMP: &str =
    " `.'^\",:;Il!i><~+_-?][}{1)(|\\/tfjrxnuvczXYUJCLQ0OZmwqpdbkhao*#MW&8%B@$";

/// Built-in presets as `(name, ramp, description)`.
pub const PRESETS: &[(&str, &str, &str)] = &[
    ("standard", STANDARD_RAMP, "Fifteen ASCII glyphs (default)"),
    ("simple", SIMPLE_RAMP, "Ten ASCII glyphs"),
    ("blocks", BLOCKS_RAMP, "Unicode shade blocks"),
    ("detailed", DETAILED_RAMP, "Seventy ASCII glyphs"),
];

/// Minimum number of glyphs a palette must hold.
pub const MIN_GLYPHS: usize = 2;

/// Errors raised while building a palette.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PaletteError {
    #[error("palette needs at least 2 glyphs, got {count}")]
    TooFewGlyphs { count: usize },

    #[error("palette glyph {glyph:?} at position {position} is a control character")]
    ControlGlyph { glyph: char, position: usize },

    #[error("palette glyph {glyph:?} at position {position} is not one terminal column wide")]
    WideGlyph { glyph: char, position: usize },
}

/// An ordered, immutable glyph ramp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphPalette {
    glyphs: Vec<char>,
}

impl GlyphPalette {
    /// Build a palette from a ramp string, emptiest glyph first.
    pub fn new(ramp: &str) -> Result<Self, PaletteError> {
        let glyphs: Vec<char> = ramp.chars().collect();
        if glyphs.len() < MIN_GLYPHS {
            return Err(PaletteError::TooFewGlyphs {
                count: glyphs.len(),
            });
        }

        for (position, &glyph) in glyphs.iter().enumerate() {
            if glyph.is_control() {
                return Err(PaletteError::ControlGlyph { glyph, position });
            }
            if glyph.width() != Some(1) {
                return Err(PaletteError::WideGlyph { glyph, position });
            }
        }

        Ok(Self { glyphs })
    }

    /// The default `standard` ramp.
    pub fn standard() -> Self {
        Self {
            glyphs: STANDARD_RAMP.chars().collect(),
        }
    }

    /// Look up a built-in preset by name (case-insensitive).
    pub fn preset(name: &str) -> Option<Self> {
        let name = name.trim();
        PRESETS
            .iter()
            .find(|(preset, _, _)| preset.eq_ignore_ascii_case(name))
            .map(|(_, ramp, _)| Self {
                glyphs: ramp.chars().collect(),
            })
    }

    /// Resolve a palette spec: a preset name, or else a literal ramp.
    pub fn resolve(spec: &str) -> Result<Self, PaletteError> {
        match Self::preset(spec) {
            Some(palette) => Ok(palette),
            None => Self::new(spec),
        }
    }

    /// The same glyphs in reverse order, for light-background terminals.
    pub fn inverted(&self) -> Self {
        let mut glyphs = self.glyphs.clone();
        glyphs.reverse();
        Self { glyphs }
    }

    /// Number of glyphs in the ramp.
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Never true for a validated palette.
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Glyph at `index`, if in range.
    pub fn glyph(&self, index: usize) -> Option<char> {
        self.glyphs.get(index).copied()
    }

    /// All glyphs, emptiest first.
    pub fn glyphs(&self) -> &[char] {
        &self.glyphs
    }
}

impl Default for GlyphPalette {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Display for GlyphPalette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for glyph in &self.glyphs {
            write!(f, "{}", glyph)?;
        }
        Ok(())
    }
}
