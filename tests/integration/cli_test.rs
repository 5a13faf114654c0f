//! Integration tests for the glyphplay binary

use std::fs;

use predicates::prelude::*;
use tempfile::TempDir;

use super::helpers::glyphplay_cmd;

#[test]
fn help_lists_subcommands() {
    let dir = TempDir::new().unwrap();
    glyphplay_cmd(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("play"))
        .stdout(predicate::str::contains("probe"))
        .stdout(predicate::str::contains("palettes"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn version_reports_package_version() {
    let dir = TempDir::new().unwrap();
    glyphplay_cmd(dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn palettes_lists_presets() {
    let dir = TempDir::new().unwrap();
    glyphplay_cmd(dir.path())
        .arg("palettes")
        .assert()
        .success()
        .stdout(predicate::str::contains("standard"))
        .stdout(predicate::str::contains("simple"))
        .stdout(predicate::str::contains("blocks"))
        .stdout(predicate::str::contains("detailed"));
}

#[test]
fn config_path_follows_environment() {
    let dir = TempDir::new().unwrap();
    let expected = dir.path().join("config.toml");
    glyphplay_cmd(dir.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(expected.to_string_lossy().as_ref()));
}

#[test]
fn config_init_refuses_to_overwrite() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");

    glyphplay_cmd(dir.path())
        .args(["config", "init"])
        .assert()
        .success();
    assert!(fs::read_to_string(&path).unwrap().contains("[playback]"));

    glyphplay_cmd(dir.path())
        .args(["config", "init"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("already exists"));

    glyphplay_cmd(dir.path())
        .args(["config", "init", "--force"])
        .assert()
        .success();
}

#[test]
fn config_show_prints_defaults() {
    let dir = TempDir::new().unwrap();
    glyphplay_cmd(dir.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[playback]"))
        .stdout(predicate::str::contains("fallback_fps = 30.0"))
        .stdout(predicate::str::contains("[decoder]"));
}

#[test]
fn invalid_config_is_reported() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("config.toml"),
        "[playback]\nfallback_fps = -1.0\n",
    )
    .unwrap();

    glyphplay_cmd(dir.path())
        .args(["config", "show"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::starts_with("Error:"))
        .stderr(predicate::str::contains("playback.fallback_fps"));
}

#[test]
fn play_missing_file_fails_cleanly() {
    let dir = TempDir::new().unwrap();
    glyphplay_cmd(dir.path())
        .args(["play", "/definitely/not/here.mp4"])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("file not found"));
}

#[test]
fn play_rejects_tiny_frame_rate() {
    let dir = TempDir::new().unwrap();
    glyphplay_cmd(dir.path())
        .args(["play", "clip.mp4", "--fps", "1e-30"])
        .assert()
        .failure()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("between 0.01 and 1000"));
}

#[test]
fn tiny_configured_rate_is_reported() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("config.toml"), "[playback]\nfps = 1e-30\n").unwrap();

    glyphplay_cmd(dir.path())
        .args(["play", "clip.mp4"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("playback.fps"));
}

#[test]
fn play_rejects_bad_palette() {
    let dir = TempDir::new().unwrap();
    glyphplay_cmd(dir.path())
        .args(["play", "clip.mp4", "--palette", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid palette"));
}

#[test]
fn completions_are_generated() {
    let dir = TempDir::new().unwrap();
    glyphplay_cmd(dir.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("glyphplay"));
}

#[cfg(unix)]
mod with_fake_decoder {
    use super::*;
    use crate::helpers::FakeDecoder;

    #[test]
    fn play_writes_frames_to_a_pipe() {
        let fake = FakeDecoder::new("100/1", r"\000\377\377\000");
        glyphplay_cmd(fake.path())
            .arg("play")
            .arg(&fake.input)
            .args(["--width", "2", "--height", "1"])
            .assert()
            .success()
            .stdout("\x1b[H @\r\n\x1b[H@ \r\n")
            .stderr(predicate::str::contains("Finished: 2 frames drawn, 0 skipped"));
    }

    #[test]
    fn play_drops_truncated_trailing_frame() {
        let fake = FakeDecoder::new("100/1", r"\000\377\377");
        glyphplay_cmd(fake.path())
            .arg("play")
            .arg(&fake.input)
            .args(["--width", "2", "--height", "1", "--invert"])
            .assert()
            .success()
            .stdout("\x1b[H@ \r\n")
            .stderr(predicate::str::contains("1 frames drawn, 1 skipped"));
    }

    #[test]
    fn probe_reports_stream() {
        let fake = FakeDecoder::new("25/1", "");
        glyphplay_cmd(fake.path())
            .arg("probe")
            .arg(&fake.input)
            .assert()
            .success()
            .stdout(predicate::str::contains("Codec:        fake"))
            .stdout(predicate::str::contains("Size:         64x48"))
            .stdout(predicate::str::contains("25.000 fps, 40000.0 us per frame (declared)"));
    }

    #[test]
    fn probe_without_rate_uses_fallback() {
        let fake = FakeDecoder::new("0/0", "");
        glyphplay_cmd(fake.path())
            .arg("probe")
            .arg(&fake.input)
            .assert()
            .success()
            .stdout(predicate::str::contains("(fallback)"));
    }

    #[test]
    fn failing_decoder_stops_before_the_screen_is_touched() {
        let fake = FakeDecoder::with_ffmpeg(
            "25/1",
            "echo 'clip.mp4: Invalid data found when processing input' >&2\nexit 1",
        );
        glyphplay_cmd(fake.path())
            .arg("play")
            .arg(&fake.input)
            .args(["--width", "2", "--height", "1"])
            .assert()
            .failure()
            .code(1)
            .stdout(predicate::str::is_empty())
            .stderr(predicate::str::starts_with("Error:"))
            .stderr(predicate::str::contains(
                "Invalid data found when processing input",
            ))
            .stderr(predicate::str::contains("Finished:").not());
    }

    #[test]
    fn log_file_receives_playback_events() {
        let fake = FakeDecoder::new("100/1", r"\000\377");
        let log = fake.path().join("play.log");
        glyphplay_cmd(fake.path())
            .env("GLYPHPLAY_LOG", "glyphplay=info")
            .arg("play")
            .arg(&fake.input)
            .args(["--width", "2", "--height", "1", "--log-file"])
            .arg(&log)
            .assert()
            .success();

        let text = fs::read_to_string(&log).unwrap();
        assert!(text.contains("playback started"), "log was: {}", text);
        assert!(text.contains("playback stopped"), "log was: {}", text);
    }
}
