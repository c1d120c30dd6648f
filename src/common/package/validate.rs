//! Package name validation.
//!
//! Command strings are built by plain interpolation, so every name that ends up
//! in one must consist solely of characters a shell treats literally.

use crate::error::{PackageError, Result};

/// Returns true for the characters allowed in a package name.
///
/// `=` is accepted so version pins like `name=1.2.3` pass.
fn is_allowed(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_' | '+' | '=')
}

/// Validate a single package name.
pub fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(PackageError::EmptyPackageName);
    }

    if !name.chars().all(is_allowed) {
        return Err(PackageError::InvalidPackageName(name.to_string()));
    }

    Ok(())
}

/// Validate a list of package names, failing on the first offender.
pub fn validate<S: AsRef<str>>(names: &[S]) -> Result<()> {
    if names.is_empty() {
        return Err(PackageError::EmptyPackageList);
    }

    names.iter().try_for_each(|name| validate_name(name.as_ref()))
}
