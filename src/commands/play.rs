//! Play command handler

use anyhow::{Context, Result};

use glyphplay::cli::PlayArgs;
use glyphplay::{play_file, Config, GlyphPalette, PlayOptions, PlaybackResult, TerminalDimensions};

/// Merge command-line flags over the configuration.
pub fn build_options(
    args: &PlayArgs,
    config: &Config,
    terminal: Option<TerminalDimensions>,
) -> Result<PlayOptions> {
    let mut options = config.play_options().context("Invalid configuration")?;

    if let Some(spec) = &args.palette {
        let palette = GlyphPalette::resolve(spec)
            .with_context(|| format!("Invalid palette '{}'", spec))?;
        options.palette = if config.playback.invert {
            palette.inverted()
        } else {
            palette
        };
    }
    if args.invert && !config.playback.invert {
        options.palette = options.palette.inverted();
    }
    if args.fps.is_some() {
        options.fps = args.fps;
    }
    options.size = explicit_size(args, terminal);
    Ok(options)
}

/// Picture size when `--width` or `--height` is given. The missing side
/// comes from the terminal, or the 80x24 fallback.
pub fn explicit_size(
    args: &PlayArgs,
    terminal: Option<TerminalDimensions>,
) -> Option<TerminalDimensions> {
    if args.width.is_none() && args.height.is_none() {
        return None;
    }
    let base = terminal.unwrap_or(TerminalDimensions::FALLBACK);
    TerminalDimensions::new(
        args.width.unwrap_or(base.width),
        args.height.unwrap_or(base.height),
    )
}

#[cfg(not(tarpaulin_include))]
pub fn handle(args: &PlayArgs, config: &Config) -> Result<()> {
    let terminal = TerminalDimensions::query(config.playback.reserve_rows);
    let options = build_options(args, config, terminal)?;

    let result = play_file(&args.file, &options)
        .with_context(|| format!("Failed to play {}", args.file.display()))?;

    match &result {
        PlaybackResult::Finished(stats) => eprintln!("Finished: {}", stats.summary()),
        PlaybackResult::Interrupted(stats) => eprintln!("Stopped: {}", stats.summary()),
    }
    Ok(())
}
