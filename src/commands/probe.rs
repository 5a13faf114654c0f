//! Probe command handler

use std::path::Path;

use anyhow::{Context, Result};

use glyphplay::decode::{probe, StreamInfo};
use glyphplay::player::effective_interval;
use glyphplay::{Config, TerminalDimensions};

fn format_rate(rate: Option<f64>) -> String {
    match rate {
        Some(fps) => format!("{:.3} fps", fps),
        None => "not declared".to_string(),
    }
}

/// Human-readable report for a probed stream.
pub fn report(
    path: &Path,
    info: &StreamInfo,
    config: &Config,
    terminal: Option<TerminalDimensions>,
) -> String {
    let forced = Some(config.playback.fps).filter(|fps| *fps > 0.0);
    let interval = effective_interval(info, forced, config.playback.fallback_fps);
    let source = if forced.is_some() {
        "forced by config"
    } else if info.avg_frame_rate.is_some() {
        "declared"
    } else {
        "fallback"
    };
    let grid = terminal.unwrap_or(TerminalDimensions::FALLBACK);

    let mut out = String::new();
    out.push_str(&format!("File:         {}\n", path.display()));
    out.push_str(&format!("Stream:       #{}\n", info.index));
    out.push_str(&format!(
        "Codec:        {}\n",
        info.codec.as_deref().unwrap_or("unknown")
    ));
    out.push_str(&format!("Size:         {}x{}\n", info.width, info.height));
    out.push_str(&format!("Average rate: {}\n", format_rate(info.avg_frame_rate)));
    out.push_str(&format!("Base rate:    {}\n", format_rate(info.base_frame_rate)));
    out.push_str(&format!(
        "Playback:     {:.3} fps, {:.1} us per frame ({})\n",
        interval.fps(),
        interval.as_micros_f64(),
        source
    ));
    out.push_str(&format!("Glyph grid:   {}\n", grid));
    out
}

#[cfg(not(tarpaulin_include))]
pub fn handle(file: &Path, config: &Config) -> Result<()> {
    let info = probe(&config.decoder.ffprobe, file)
        .with_context(|| format!("Failed to probe {}", file.display()))?;
    let terminal = TerminalDimensions::query(config.playback.reserve_rows);
    print!("{}", report(file, &info, config, terminal));
    Ok(())
}
