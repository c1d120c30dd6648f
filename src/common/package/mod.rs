//! Package manager abstraction for multi-distro support.
//!
//! This module turns abstract package operations into the literal shell
//! command text of one package manager. Nothing here executes a command.
//!
//! # Architecture
//!
//! - [`PackageManager`]: Closed enum of the supported families, each one a
//!   fixed table of command templates
//! - [`Detector`]: Picks the family for the running system and memoizes it
//! - [`validate`]: Allow-list check applied to every package name before it
//!   is placed into a command
//! - [`MetricsSink`]: Counters for detection activity
//!
//! # Example
//!
//! ```ignore
//! use pkgcmd::common::package::Detector;
//!
//! let detector = Detector::new();
//! let manager = detector.detect()?;
//! assert_eq!(manager.install(&["htop", "curl"])?, "sudo apt install -y htop curl");
//! ```

mod detect;
mod manager;
mod metrics;
mod validate;

pub use detect::{BinaryProbe, Detector, PathProbe};
pub use manager::{PRIVILEGE_PREFIX, PackageManager, create_manager};
pub use metrics::{AtomicMetrics, Counter, MetricsSink, MetricsSnapshot, NoopMetrics};
pub use validate::{validate, validate_name};
