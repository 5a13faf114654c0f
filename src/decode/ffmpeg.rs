//! Raw gray8 frames streamed from an `ffmpeg` child process.

use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;
use std::process::{Child, ChildStderr, ChildStdout, Command, Stdio};
use std::thread::{self, JoinHandle};

use super::{DecodeError, Decoded, FrameSource};
use crate::frame::{ScaledFrameBuffer, TerminalDimensions};

/// How to invoke `ffmpeg`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FfmpegOptions {
    /// Executable name or path.
    pub program: String,
    /// Value for `-sws_flags` (e.g. `bilinear`, `area`, `bicubic`).
    pub scaler: String,
}

impl Default for FfmpegOptions {
    fn default() -> Self {
        Self {
            program: "ffmpeg".to_string(),
            scaler: "bilinear".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StreamState {
    Streaming,
    /// A truncated trailing frame was seen; the next call ends the stream.
    Truncated,
    Finished,
}

/// Decodes the first video stream of a file into terminal-sized gray frames.
pub struct FfmpegSource {
    program: String,
    child: Child,
    stdout: ChildStdout,
    /// Collects ffmpeg's diagnostics off the screen.
    stderr: Option<JoinHandle<String>>,
    frame_len: usize,
    state: StreamState,
}

impl FfmpegSource {
    /// Spawn `ffmpeg` for `path`, scaling every frame to `dims`.
    pub fn open(
        path: &Path,
        dims: TerminalDimensions,
        options: &FfmpegOptions,
    ) -> Result<Self, DecodeError> {
        if dims.width == 0 || dims.height == 0 {
            return Err(DecodeError::ScalerUnavailable {
                width: dims.width as usize,
                height: dims.height as usize,
            });
        }

        let mut child = Command::new(&options.program)
            .arg("-nostdin")
            .arg("-hide_banner")
            .arg("-v")
            .arg("error")
            .arg("-i")
            .arg(path)
            .args(["-map", "0:v:0", "-an", "-sn"])
            .args(["-f", "rawvideo", "-pix_fmt", "gray"])
            .arg("-s")
            .arg(dims.to_string())
            .arg("-sws_flags")
            .arg(&options.scaler)
            .arg("-")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| DecodeError::DecoderUnavailable {
                program: options.program.clone(),
                source,
            })?;

        let stdout = match child.stdout.take() {
            Some(stdout) => stdout,
            None => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(DecodeError::DecoderFailed {
                    message: "failed to capture ffmpeg stdout".to_string(),
                });
            }
        };
        let stderr = child.stderr.take().map(collect_diagnostics);

        tracing::debug!(
            program = %options.program,
            path = %path.display(),
            size = %dims,
            scaler = %options.scaler,
            "spawned decoder"
        );

        Ok(Self {
            program: options.program.clone(),
            child,
            stdout,
            stderr,
            frame_len: dims.area(),
            state: StreamState::Streaming,
        })
    }

    /// Read until `buf` is full or the pipe hits EOF. Returns bytes read.
    fn fill(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.stdout.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(filled)
    }

    /// Reap the child and turn a failing exit status into an error.
    fn finish(&mut self) -> Result<Decoded, DecodeError> {
        self.state = StreamState::Finished;
        let status = self.child.wait()?;
        let diagnostics = self
            .stderr
            .take()
            .and_then(|handle| handle.join().ok())
            .unwrap_or_default();
        if status.success() {
            if !diagnostics.is_empty() {
                tracing::debug!(stderr = %diagnostics.trim_end(), "decoder diagnostics");
            }
            Ok(Decoded::EndOfStream)
        } else {
            let message = match first_line(&diagnostics) {
                Some(line) => format!("{} exited with {}: {}", self.program, status, line),
                None => format!("{} exited with {}", self.program, status),
            };
            Err(DecodeError::DecoderFailed { message })
        }
    }
}

/// Read the child's stderr to the end on a separate thread.
fn collect_diagnostics(stderr: ChildStderr) -> JoinHandle<String> {
    thread::spawn(move || {
        let mut text = String::new();
        let mut reader = BufReader::new(stderr);
        let mut line = String::new();
        loop {
            line.clear();
            match reader.read_line(&mut line) {
                Ok(0) | Err(_) => break,
                Ok(_) => text.push_str(&line),
            }
        }
        text
    })
}

fn first_line(text: &str) -> Option<&str> {
    text.lines().map(str::trim).find(|line| !line.is_empty())
}

impl FrameSource for FfmpegSource {
    fn next_frame(&mut self, buffer: &mut ScaledFrameBuffer) -> Result<Decoded, DecodeError> {
        match self.state {
            StreamState::Finished => return Ok(Decoded::EndOfStream),
            StreamState::Truncated => return self.finish(),
            StreamState::Streaming => {}
        }

        if buffer.pixels().len() != self.frame_len {
            return Err(DecodeError::ScalerUnavailable {
                width: buffer.width(),
                height: buffer.height(),
            });
        }

        let read = self.fill(buffer.pixels_mut())?;
        if read == self.frame_len {
            Ok(Decoded::Frame)
        } else if read == 0 {
            self.finish()
        } else {
            tracing::debug!(read, expected = self.frame_len, "dropping truncated frame");
            self.state = StreamState::Truncated;
            Ok(Decoded::NoFrame)
        }
    }
}

impl Drop for FfmpegSource {
    fn drop(&mut self) {
        if self.state != StreamState::Finished {
            let _ = self.child.kill();
            let _ = self.child.wait();
        }
    }
}
