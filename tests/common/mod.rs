use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Scratch directory holding the os-release and config fixtures of one test.
pub struct TestEnvironment {
    temp_dir: TempDir,
}

impl TestEnvironment {
    pub fn new() -> Result<Self> {
        Ok(Self {
            temp_dir: tempfile::tempdir()?,
        })
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write an os-release file and return its path.
    pub fn write_os_release(&self, content: &str) -> Result<PathBuf> {
        let path = self.path().join("os-release");
        fs::write(&path, content)?;
        Ok(path)
    }

    /// Path of a config file that does not exist unless written.
    pub fn config_path(&self) -> PathBuf {
        self.path().join("pkgcmd.toml")
    }

    pub fn write_config(&self, content: &str) -> Result<PathBuf> {
        let path = self.config_path();
        fs::write(&path, content)?;
        Ok(path)
    }

    pub fn missing_os_release(&self) -> PathBuf {
        self.path().join("no-such-os-release")
    }
}
