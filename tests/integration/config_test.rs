//! Integration tests for configuration loading

use std::fs;

use tempfile::TempDir;

use glyphplay::config::{Config, ConfigError};
use glyphplay::player::pacing::FrameInterval;

#[test]
fn default_config_round_trips_through_toml() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    Config::default().save_to(&path).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.contains("[playback]"));
    assert!(text.contains("[decoder]"));
    assert!(text.contains("[logging]"));
    assert_eq!(Config::load_from(&path).unwrap(), Config::default());
}

#[test]
fn full_config_drives_play_options() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        r#"
[playback]
fallback_fps = 24.0
fps = 0.0
reserve_rows = 2
palette = " .oO@"
invert = false

[decoder]
ffmpeg = "/usr/local/bin/ffmpeg"
ffprobe = "/usr/local/bin/ffprobe"
scaler = "area"

[logging]
level = "debug"
file = "/tmp/glyphplay.log"
"#,
    )
    .unwrap();

    let config = Config::load_from(&path).unwrap();
    let options = config.play_options().unwrap();
    assert_eq!(options.palette.to_string(), " .oO@");
    assert_eq!(options.reserve_rows, 2);
    assert_eq!(options.decoder.scaler, "area");
    assert_eq!(options.ffprobe, "/usr/local/bin/ffprobe");

    let interval = FrameInterval::from_rate(None, options.fallback_fps);
    assert_eq!(interval.fps(), 24.0);
}

#[test]
fn unknown_keys_are_ignored() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[playback]\ncolour = true\n[extra]\nx = 1\n").unwrap();
    assert_eq!(Config::load_from(&path).unwrap(), Config::default());
}

#[test]
fn wrong_type_is_a_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[playback]\nreserve_rows = \"one\"\n").unwrap();
    assert!(matches!(
        Config::load_from(&path).unwrap_err(),
        ConfigError::Parse { .. }
    ));
}

#[test]
fn missing_file_is_a_read_error() {
    let dir = TempDir::new().unwrap();
    let err = Config::load_from(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
}
