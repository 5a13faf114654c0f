//! Config subcommands handler

use anyhow::{bail, Result};

use glyphplay::Config;

/// Show the effective configuration as TOML.
#[cfg(not(tarpaulin_include))]
pub fn handle_show(config: &Config) -> Result<()> {
    print!("{}", config.to_toml()?);
    Ok(())
}

/// Print where the config file is (or would be).
#[cfg(not(tarpaulin_include))]
pub fn handle_path() -> Result<()> {
    let path = Config::config_path()?;
    println!("{}", path.display());
    Ok(())
}

/// Write a config file holding the defaults.
///
/// Refuses to replace an existing file unless `force` is set.
#[cfg(not(tarpaulin_include))]
pub fn handle_init(force: bool) -> Result<()> {
    let path = Config::config_path()?;
    if path.exists() && !force {
        bail!(
            "Config file {} already exists (use --force to overwrite)",
            path.display()
        );
    }
    let path = Config::default().save()?;
    println!("Wrote default config to {}", path.display());
    Ok(())
}
