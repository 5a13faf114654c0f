//! Shared helpers for integration tests.

use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use assert_cmd::Command;
use tempfile::TempDir;

use glyphplay::decode::{DecodeError, Decoded, FrameSource};
use glyphplay::player::pacing::ManualClock;
use glyphplay::ScaledFrameBuffer;

/// One scripted decode attempt.
#[derive(Debug, Clone)]
pub enum Attempt {
    /// Fill the buffer with these pixels.
    Frame(Vec<u8>),
    /// Produce nothing displayable.
    Skip,
}

/// A frame source that replays attempts, charging `cost` of virtual time
/// for each one.
pub struct ScriptedSource {
    attempts: VecDeque<Attempt>,
    clock: ManualClock,
    cost: Duration,
    pub calls: usize,
}

impl ScriptedSource {
    pub fn new(attempts: Vec<Attempt>, clock: &ManualClock, cost: Duration) -> Self {
        Self {
            attempts: attempts.into(),
            clock: clock.clone(),
            cost,
            calls: 0,
        }
    }
}

impl FrameSource for ScriptedSource {
    fn next_frame(&mut self, buffer: &mut ScaledFrameBuffer) -> Result<Decoded, DecodeError> {
        self.calls += 1;
        self.clock.advance(self.cost);
        match self.attempts.pop_front() {
            Some(Attempt::Frame(pixels)) => {
                buffer.pixels_mut().copy_from_slice(&pixels);
                Ok(Decoded::Frame)
            }
            Some(Attempt::Skip) => Ok(Decoded::NoFrame),
            None => Ok(Decoded::EndOfStream),
        }
    }
}

/// Split written output into frames (without the cursor-home prefix).
pub fn split_frames(output: &[u8]) -> Vec<String> {
    String::from_utf8(output.to_vec())
        .expect("frames should be UTF-8")
        .split("\x1b[H")
        .filter(|frame| !frame.is_empty())
        .map(str::to_string)
        .collect()
}

/// Command for the glyphplay binary, isolated from the user's config.
pub fn glyphplay_cmd(config_dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_glyphplay"));
    cmd.env("GLYPHPLAY_CONFIG", config_dir.join("config.toml"))
        .env_remove("GLYPHPLAY_LOG")
        .env_remove("RUST_LOG");
    cmd
}

/// Write an executable shell script.
#[cfg(unix)]
pub fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

/// A temp dir holding stand-in `ffprobe`/`ffmpeg` scripts, a config file
/// pointing at them, and an (empty) input file.
#[cfg(unix)]
pub struct FakeDecoder {
    pub dir: TempDir,
    pub input: PathBuf,
}

#[cfg(unix)]
impl FakeDecoder {
    /// `rate` is the declared `avg_frame_rate`; `frames` is a `printf`
    /// format string producing the raw gray8 output.
    pub fn new(rate: &str, frames: &str) -> Self {
        Self::with_ffmpeg(rate, &format!("printf '{}'", frames))
    }

    /// Like [`FakeDecoder::new`] with an arbitrary shell body for `ffmpeg`.
    pub fn with_ffmpeg(rate: &str, ffmpeg_body: &str) -> Self {
        let dir = TempDir::new().unwrap();
        let probe_json = format!(
            r#"{{"streams":[{{"index":0,"codec_name":"fake","width":64,"height":48,"avg_frame_rate":"{}","r_frame_rate":"{}"}}]}}"#,
            rate, rate
        );
        let ffprobe = write_script(dir.path(), "ffprobe", &format!("echo '{}'", probe_json));
        let ffmpeg = write_script(dir.path(), "ffmpeg", ffmpeg_body);

        fs::write(
            dir.path().join("config.toml"),
            format!(
                "[decoder]\nffmpeg = \"{}\"\nffprobe = \"{}\"\n",
                ffmpeg.display(),
                ffprobe.display()
            ),
        )
        .unwrap();

        let input = dir.path().join("clip.mp4");
        fs::write(&input, b"").unwrap();
        Self { dir, input }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}
