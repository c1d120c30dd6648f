use anyhow::{Context, Result};
use std::path::PathBuf;

/// Get the pkgcmd config directory
pub fn config_dir() -> Result<PathBuf> {
    Ok(dirs::config_dir()
        .context("Unable to determine user config directory")?
        .join("pkgcmd"))
}

/// Get the default config file path
pub fn config_file() -> Result<PathBuf> {
    Ok(config_dir()?.join("pkgcmd.toml"))
}
