//! Stream discovery via `ffprobe`.

use std::path::Path;
use std::process::Command;

use serde::Deserialize;

use super::DecodeError;

/// Properties of the first video stream of a source.
#[derive(Debug, Clone, PartialEq)]
pub struct StreamInfo {
    pub index: u32,
    pub codec: Option<String>,
    pub width: u32,
    pub height: u32,
    /// Declared average frame rate; `None` when missing or not positive.
    pub avg_frame_rate: Option<f64>,
    /// Container base rate, reported for diagnostics only.
    pub base_frame_rate: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct ProbeOutput {
    #[serde(default)]
    streams: Vec<ProbeStream>,
}

#[derive(Debug, Deserialize)]
struct ProbeStream {
    #[serde(default)]
    index: u32,
    codec_name: Option<String>,
    #[serde(default)]
    width: u32,
    #[serde(default)]
    height: u32,
    avg_frame_rate: Option<String>,
    r_frame_rate: Option<String>,
}

/// Parse an ffprobe rational such as `30000/1001` or a plain number.
///
/// Returns `None` for `0/0`, zero or negative rates, and anything unparsable.
pub fn parse_rate(value: &str) -> Option<f64> {
    let value = value.trim();
    let rate = match value.split_once('/') {
        Some((num, den)) => {
            let num: f64 = num.trim().parse().ok()?;
            let den: f64 = den.trim().parse().ok()?;
            if den == 0.0 {
                return None;
            }
            num / den
        }
        None => value.parse().ok()?,
    };
    (rate.is_finite() && rate > 0.0).then_some(rate)
}

/// Parse the JSON printed by `ffprobe -of json`.
pub fn parse_probe_output(path: &Path, json: &str) -> Result<StreamInfo, DecodeError> {
    let output: ProbeOutput = serde_json::from_str(json)?;
    let stream = output
        .streams
        .into_iter()
        .next()
        .ok_or_else(|| DecodeError::NoVideoStream {
            path: path.to_path_buf(),
        })?;

    Ok(StreamInfo {
        index: stream.index,
        codec: stream.codec_name,
        width: stream.width,
        height: stream.height,
        avg_frame_rate: stream.avg_frame_rate.as_deref().and_then(parse_rate),
        base_frame_rate: stream.r_frame_rate.as_deref().and_then(parse_rate),
    })
}

/// Probe the first video stream of `path` with `ffprobe`.
pub fn probe(ffprobe: &str, path: &Path) -> Result<StreamInfo, DecodeError> {
    if !path.exists() {
        return Err(DecodeError::SourceUnavailable {
            path: path.to_path_buf(),
            message: "file not found".to_string(),
        });
    }

    let output = Command::new(ffprobe)
        .args([
            "-v",
            "error",
            "-select_streams",
            "v:0",
            "-show_entries",
            "stream=index,codec_name,width,height,avg_frame_rate,r_frame_rate",
            "-of",
            "json",
        ])
        .arg(path)
        .output()
        .map_err(|source| DecodeError::DecoderUnavailable {
            program: ffprobe.to_string(),
            source,
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(DecodeError::SourceUnavailable {
            path: path.to_path_buf(),
            message: first_line_or(&stderr, "ffprobe exited with an error"),
        });
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let info = parse_probe_output(path, &stdout)?;
    tracing::debug!(
        path = %path.display(),
        codec = ?info.codec,
        width = info.width,
        height = info.height,
        avg_frame_rate = ?info.avg_frame_rate,
        "probed video stream"
    );
    Ok(info)
}

fn first_line_or(text: &str, fallback: &str) -> String {
    text.lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or(fallback)
        .to_string()
}
