//! Package manager command synthesis.
//!
//! Detects the distribution's package manager and produces the shell command
//! text for updating, upgrading, installing, removing and querying packages.

pub mod common;
pub mod error;
pub mod ui;

pub use common::package::{Detector, PackageManager, create_manager};
pub use error::{PackageError, Result};
