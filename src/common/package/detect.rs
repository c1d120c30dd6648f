//! Package manager detection.
//!
//! Detection reads the os-release file first and falls back to probing `PATH`
//! for known package manager binaries. A successful result is memoized by the
//! [`Detector`] that produced it; failures are not, so the next call retries.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use super::manager::{PackageManager, create_manager};
use super::metrics::{Counter, MetricsSink, NoopMetrics};
use crate::common::distro::{OS_RELEASE_PATH, OsRelease};
use crate::error::{PackageError, Result};
use crate::ui::{self, Level};

/// Answers whether an executable can be found.
pub trait BinaryProbe: Send + Sync {
    fn exists(&self, binary: &str) -> bool;
}

/// Looks binaries up on the process `PATH`.
#[derive(Debug, Default, Clone, Copy)]
pub struct PathProbe;

impl BinaryProbe for PathProbe {
    fn exists(&self, binary: &str) -> bool {
        which::which(binary).is_ok()
    }
}

/// Detects the system package manager and caches the answer.
pub struct Detector {
    os_release: PathBuf,
    probe: Box<dyn BinaryProbe>,
    metrics: Arc<dyn MetricsSink>,
    cache: RwLock<Option<PackageManager>>,
    init: Mutex<()>,
}

impl Default for Detector {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Detector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Detector")
            .field("os_release", &self.os_release)
            .field("cached", &self.cached())
            .finish_non_exhaustive()
    }
}

impl Detector {
    pub fn new() -> Self {
        Self {
            os_release: PathBuf::from(OS_RELEASE_PATH),
            probe: Box::new(PathProbe),
            metrics: Arc::new(NoopMetrics),
            cache: RwLock::new(None),
            init: Mutex::new(()),
        }
    }

    pub fn with_os_release(mut self, path: impl Into<PathBuf>) -> Self {
        self.os_release = path.into();
        self
    }

    pub fn with_probe(mut self, probe: impl BinaryProbe + 'static) -> Self {
        self.probe = Box::new(probe);
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<dyn MetricsSink>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn os_release_path(&self) -> &Path {
        &self.os_release
    }

    /// The memoized package manager, if detection has already succeeded.
    pub fn cached(&self) -> Option<PackageManager> {
        *self.cache.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Forget the memoized result so the next [`Detector::detect`] runs again.
    ///
    /// Meant for tests; calling it while other threads detect is allowed but
    /// may cause one extra detection run.
    pub fn clear_cache(&self) {
        *self.cache.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Return the package manager for this system.
    ///
    /// Concurrent callers share a single detection run. Once a run succeeds,
    /// later calls only take a read lock.
    pub fn detect(&self) -> Result<PackageManager> {
        self.metrics.incr(Counter::DetectionCalls);

        if let Some(manager) = self.cached() {
            debug("detect.cache_hit", &format!("Using cached package manager {manager}"));
            return Ok(manager);
        }

        let _guard = self.init.lock().unwrap_or_else(PoisonError::into_inner);

        // Another caller may have finished while we waited for the guard.
        if let Some(manager) = self.cached() {
            return Ok(manager);
        }

        match self.resolve_family().and_then(|family| self.create(family)) {
            Ok(manager) => {
                *self.cache.write().unwrap_or_else(PoisonError::into_inner) = Some(manager);
                debug("detect.resolved", &format!("Detected package manager {manager}"));
                Ok(manager)
            }
            Err(err) => {
                self.metrics.incr(Counter::DetectionErrors);
                debug("detect.failed", &format!("Package manager detection failed: {err}"));
                Err(err)
            }
        }
    }

    /// Find the family name, from os-release first, then from `PATH`.
    fn resolve_family(&self) -> Result<&'static str> {
        if let Some(family) = self.family_from_os_release() {
            return Ok(family.name());
        }
        self.probe_family()
    }

    fn family_from_os_release(&self) -> Option<PackageManager> {
        self.metrics.incr(Counter::OsReleaseReads);
        debug(
            "detect.os_release",
            &format!("Reading {}", self.os_release.display()),
        );

        // An unreadable file is treated the same as a missing one.
        let release = match OsRelease::read(&self.os_release) {
            Ok(release) => release,
            Err(err) => {
                debug(
                    "detect.os_release_unreadable",
                    &format!("Cannot read {}: {}", self.os_release.display(), err),
                );
                return None;
            }
        };

        let family = release.family();
        if family.is_none() {
            debug(
                "detect.distro_unmatched",
                &format!(
                    "Distribution ID {:?} has no known package manager",
                    release.id.as_deref().unwrap_or("")
                ),
            );
        }
        family
    }

    fn probe_family(&self) -> Result<&'static str> {
        self.metrics.incr(Counter::FallbackProbes);

        // Order matters: the first binary found wins.
        PackageManager::ALL
            .iter()
            .find(|manager| {
                let found = self.probe.exists(manager.binary());
                debug(
                    "detect.probe",
                    &format!(
                        "Probing for {}: {}",
                        manager.binary(),
                        if found { "found" } else { "not found" }
                    ),
                );
                found
            })
            .map(|manager| manager.name())
            .ok_or(PackageError::NoManagerDetected)
    }

    fn create(&self, family: &str) -> Result<PackageManager> {
        let manager = create_manager(family)?;
        self.metrics.incr(Counter::ManagerCreations);
        Ok(manager)
    }
}

fn debug(code: &str, message: &str) {
    if ui::is_debug_enabled() {
        ui::emit(Level::Debug, code, message, None);
    }
}
