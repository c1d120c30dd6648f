use thiserror::Error;

/// Errors produced while detecting a package manager or synthesising its commands.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PackageError {
    #[error("No packages specified")]
    NoPackages,

    #[error("Package list is empty")]
    EmptyPackageList,

    #[error("Package name is empty")]
    EmptyPackageName,

    #[error("Invalid character in package name: '{0}'")]
    InvalidPackageName(String),

    #[error("Package manager family name is empty")]
    EmptyFamilyName,

    #[error("Unsupported package manager family: '{0}'")]
    UnsupportedFamily(String),

    #[error("No supported package manager detected")]
    NoManagerDetected,
}

pub type Result<T> = std::result::Result<T, PackageError>;
