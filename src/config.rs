//! Configuration file handling.
//!
//! The configuration lives in a TOML file at `$GLYPHPLAY_CONFIG`, or
//! `glyphplay/config.toml` under the platform config directory. Every field
//! has a default, so a missing file or a partial file is fine.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::decode::FfmpegOptions;
use crate::glyph::{GlyphPalette, PaletteError};
use crate::player::pacing::{is_valid_rate, FALLBACK_FPS, MAX_FPS, MIN_FPS};
use crate::player::PlayOptions;

/// Environment variable that overrides the config file location.
pub const CONFIG_ENV: &str = "GLYPHPLAY_CONFIG";

/// Errors from loading, validating or saving the configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine the config directory")]
    NoConfigDir,

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid value for {field}: {message}")]
    Invalid {
        field: &'static str,
        message: String,
    },

    #[error("Invalid palette: {0}")]
    Palette(#[from] PaletteError),
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub playback: PlaybackConfig,
    pub decoder: DecoderConfig,
    pub logging: LoggingConfig,
}

/// `[playback]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Used when the stream declares no positive rate.
    pub fallback_fps: f64,
    /// Values above zero override the declared rate.
    pub fps: f64,
    /// Terminal rows kept free below the picture.
    pub reserve_rows: u16,
    /// Preset name or a literal glyph ramp.
    pub palette: String,
    /// Reverse the ramp for light-background terminals.
    pub invert: bool,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            fallback_fps: FALLBACK_FPS,
            fps: 0.0,
            reserve_rows: 1,
            palette: "standard".to_string(),
            invert: false,
        }
    }
}

/// `[decoder]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecoderConfig {
    pub ffmpeg: String,
    pub ffprobe: String,
    /// Passed to ffmpeg as `-sws_flags`.
    pub scaler: String,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            ffmpeg: "ffmpeg".to_string(),
            ffprobe: "ffprobe".to_string(),
            scaler: "bilinear".to_string(),
        }
    }
}

/// `[logging]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive when no environment filter is set.
    pub level: String,
    /// Log file path; empty means stderr.
    pub file: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            file: String::new(),
        }
    }
}

impl LoggingConfig {
    /// Configured log file, if any.
    pub fn file_path(&self) -> Option<PathBuf> {
        let trimmed = self.file.trim();
        (!trimmed.is_empty()).then(|| PathBuf::from(trimmed))
    }
}

impl Config {
    /// Location of the config file.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        if let Some(path) = std::env::var_os(CONFIG_ENV).filter(|p| !p.is_empty()) {
            return Ok(PathBuf::from(path));
        }
        dirs::config_dir()
            .map(|dir| dir.join("glyphplay").join("config.toml"))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Load from the default location, falling back to defaults when the
    /// file does not exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path()?;
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Load and validate the file at `path`.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Save to the default location.
    pub fn save(&self) -> Result<PathBuf, ConfigError> {
        let path = Self::config_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Write as TOML to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let write_err = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        fs::write(path, self.to_toml()?).map_err(write_err)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Reject values that cannot drive playback.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let playback = &self.playback;
        if !is_valid_rate(playback.fallback_fps) {
            return Err(ConfigError::Invalid {
                field: "playback.fallback_fps",
                message: format!(
                    "must be between {} and {}, got {}",
                    MIN_FPS, MAX_FPS, playback.fallback_fps
                ),
            });
        }
        if playback.fps != 0.0 && !is_valid_rate(playback.fps) {
            return Err(ConfigError::Invalid {
                field: "playback.fps",
                message: format!(
                    "must be 0 or between {} and {}, got {}",
                    MIN_FPS, MAX_FPS, playback.fps
                ),
            });
        }
        if self.decoder.ffmpeg.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "decoder.ffmpeg",
                message: "must not be empty".to_string(),
            });
        }
        if self.decoder.ffprobe.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "decoder.ffprobe",
                message: "must not be empty".to_string(),
            });
        }
        self.palette()?;
        Ok(())
    }

    /// The configured palette, inverted if requested.
    pub fn palette(&self) -> Result<GlyphPalette, ConfigError> {
        let palette = GlyphPalette::resolve(&self.playback.palette)?;
        Ok(if self.playback.invert {
            palette.inverted()
        } else {
            palette
        })
    }

    /// Playback options described by this configuration.
    pub fn play_options(&self) -> Result<PlayOptions, ConfigError> {
        Ok(PlayOptions {
            palette: self.palette()?,
            fps: Some(self.playback.fps).filter(|fps| *fps > 0.0),
            fallback_fps: self.playback.fallback_fps,
            reserve_rows: self.playback.reserve_rows,
            size: None,
            ffprobe: self.decoder.ffprobe.clone(),
            decoder: FfmpegOptions {
                program: self.decoder.ffmpeg.clone(),
                scaler: self.decoder.scaler.clone(),
            },
        })
    }
}
