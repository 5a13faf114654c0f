//! End-to-end playback through the library with scripted sources

use std::path::Path;
use std::time::Duration;

use super::helpers::{split_frames, Attempt, ScriptedSource};
use glyphplay::glyph::{GlyphPalette, LuminanceQuantizer, STANDARD_RAMP};
use glyphplay::player::pacing::{FrameInterval, ManualClock};
use glyphplay::player::{PlaybackLoop, PlaybackResult};
use glyphplay::TerminalDimensions;

fn standard() -> LuminanceQuantizer {
    LuminanceQuantizer::new(GlyphPalette::new(STANDARD_RAMP).unwrap())
}

#[test]
fn two_by_one_frame_renders_space_and_at() {
    let clock = ManualClock::new();
    let source = ScriptedSource::new(vec![Attempt::Frame(vec![0, 255])], &clock, Duration::ZERO);
    let mut out = Vec::new();

    let result = PlaybackLoop::new(
        source,
        clock.clone(),
        &mut out,
        TerminalDimensions::new(2, 1).unwrap(),
        standard(),
        FrameInterval::default(),
    )
    .run()
    .unwrap();

    assert_eq!(result.stats().frames_drawn, 1);
    assert_eq!(String::from_utf8(out).unwrap(), "\x1b[H @\r\n");
}

#[test]
fn attempts_without_frames_are_skipped_in_order() {
    let clock = ManualClock::new();
    let frame = |v: u8| Attempt::Frame(vec![v; 6]);
    let source = ScriptedSource::new(
        vec![frame(0), Attempt::Skip, frame(128), Attempt::Skip, frame(255)],
        &clock,
        Duration::from_millis(2),
    );
    let mut out = Vec::new();

    let result = PlaybackLoop::new(
        source,
        clock.clone(),
        &mut out,
        TerminalDimensions::new(3, 2).unwrap(),
        standard(),
        FrameInterval::from_rate(Some(50.0), 30.0),
    )
    .run()
    .unwrap();

    let stats = result.stats();
    assert_eq!(stats.frames_drawn, 3);
    assert_eq!(stats.frames_skipped, 2);
    assert_eq!(
        split_frames(&out),
        vec!["   \r\n   \r\n", "ttt\r\nttt\r\n", "@@@\r\n@@@\r\n"]
    );
    // One wait per drawn frame, none for skipped attempts.
    assert_eq!(clock.sleep_count(), 3);
}

#[test]
fn playback_takes_frame_count_times_interval() {
    let clock = ManualClock::new();
    let frames = (0..25).map(|i| Attempt::Frame(vec![i as u8 * 10; 4])).collect();
    let source = ScriptedSource::new(frames, &clock, Duration::from_millis(5));
    let mut out = Vec::new();

    let result = PlaybackLoop::new(
        source,
        clock.clone(),
        &mut out,
        TerminalDimensions::new(2, 2).unwrap(),
        standard(),
        FrameInterval::from_rate(Some(25.0), 30.0),
    )
    .run()
    .unwrap();

    // 25 frames at 40ms each, plus the 5ms end-of-stream attempt.
    let stats = result.stats();
    assert_eq!(stats.frames_drawn, 25);
    assert_eq!(stats.late_frames, 0);
    assert_eq!(stats.wall_time, Duration::from_millis(1005));
    assert_eq!(stats.time_waited, Duration::from_millis(875));
}

#[test]
fn undeclared_rate_plays_at_thirty_fps() {
    let clock = ManualClock::new();
    let source = ScriptedSource::new(vec![Attempt::Frame(vec![0])], &clock, Duration::ZERO);
    let mut out = Vec::new();

    PlaybackLoop::new(
        source,
        clock.clone(),
        &mut out,
        TerminalDimensions::new(1, 1).unwrap(),
        standard(),
        FrameInterval::from_rate(Some(0.0), 30.0),
    )
    .run()
    .unwrap();

    let waited = clock.total_slept().as_secs_f64() * 1_000_000.0;
    assert!((waited - 1_000_000.0 / 30.0).abs() < 0.01, "waited {}us", waited);
}

#[test]
fn quit_during_wait_interrupts() {
    let clock = ManualClock::new();
    clock.cancel_on_sleep(1);
    let frames = vec![Attempt::Frame(vec![0]), Attempt::Frame(vec![255])];
    let source = ScriptedSource::new(frames, &clock, Duration::ZERO);
    let mut out = Vec::new();

    let result = PlaybackLoop::new(
        source,
        clock.clone(),
        &mut out,
        TerminalDimensions::new(1, 1).unwrap(),
        standard(),
        FrameInterval::default(),
    )
    .run()
    .unwrap();

    assert!(matches!(result, PlaybackResult::Interrupted(_)));
    assert_eq!(split_frames(&out), vec![" \r\n"]);
}

/// Needs a real `ffmpeg`/`ffprobe` on PATH.
#[test]
#[ignore]
fn real_ffmpeg_plays_generated_clip() {
    use glyphplay::decode::{probe, FfmpegOptions, FfmpegSource};

    let dir = tempfile::tempdir().unwrap();
    let clip = dir.path().join("gradient.mp4");
    let status = std::process::Command::new("ffmpeg")
        .args([
            "-v",
            "error",
            "-f",
            "lavfi",
            "-i",
            "testsrc=duration=1:size=160x120:rate=10",
            "-pix_fmt",
            "yuv420p",
        ])
        .arg(&clip)
        .status()
        .expect("ffmpeg should run");
    assert!(status.success());

    let info = probe("ffprobe", Path::new(&clip)).unwrap();
    assert_eq!(info.avg_frame_rate, Some(10.0));

    let dims = TerminalDimensions::new(16, 6).unwrap();
    let source = FfmpegSource::open(&clip, dims, &FfmpegOptions::default()).unwrap();
    let mut out = Vec::new();
    let result = PlaybackLoop::new(
        source,
        glyphplay::player::pacing::SystemClock,
        &mut out,
        dims,
        standard(),
        FrameInterval::from_rate(info.avg_frame_rate, 30.0),
    )
    .run()
    .unwrap();

    assert_eq!(result.stats().frames_drawn, 10);
    for frame in split_frames(&out) {
        let rows: Vec<&str> = frame.trim_end_matches("\r\n").split("\r\n").collect();
        assert_eq!(rows.len(), 6);
        assert!(rows.iter().all(|row| row.chars().count() == 16));
    }
}
