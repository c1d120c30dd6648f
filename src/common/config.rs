//! User configuration stored in `pkgcmd.toml`.
//!
//! ```toml
//! # Read this file instead of /etc/os-release
//! os_release_path = "/etc/os-release"
//! # Skip detection entirely
//! family = "pacman"
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::common::distro::OS_RELEASE_PATH;
use crate::common::package::{Detector, PackageManager, create_manager};
use crate::common::paths;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// OS identification file consulted by detection.
    pub os_release_path: Option<PathBuf>,
    /// Package manager family to use without detecting.
    pub family: Option<String>,
}

impl Config {
    /// Load the config from `path`, or from the default location when `None`.
    ///
    /// A missing file yields the default config.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(path) => path.to_path_buf(),
            None => paths::config_file()?,
        };

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config {}", config_path.display()))?;

        Self::parse(&content)
            .with_context(|| format!("Failed to parse config {}", config_path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn os_release_path(&self) -> PathBuf {
        self.os_release_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(OS_RELEASE_PATH))
    }

    /// The pinned family, if one is configured.
    pub fn pinned_family(&self) -> Result<Option<PackageManager>> {
        self.family
            .as_deref()
            .map(|family| {
                create_manager(family)
                    .with_context(|| format!("Invalid family '{}' in config", family))
            })
            .transpose()
    }

    /// Build a detector reading the configured os-release file.
    pub fn detector(&self) -> Detector {
        Detector::new().with_os_release(self.os_release_path())
    }
}
