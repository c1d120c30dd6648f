//! Package manager enum and command synthesis.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::validate::{validate, validate_name};
use crate::error::{PackageError, Result};

/// Token placed in front of commands that need superuser rights.
pub const PRIVILEGE_PREFIX: &str = "sudo";

/// Supported package manager families.
///
/// Every variant is a fixed table of command templates. There is no instance
/// data, so values are `Copy` and can be shared freely between threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    /// APT - Debian/Ubuntu family
    Apt,
    /// APK - Alpine Linux
    Apk,
    /// DNF - Fedora/RHEL 8+ family
    Dnf,
    /// YUM - CentOS and older RHEL
    Yum,
    /// Pacman - Arch Linux family
    Pacman,
    /// Zypper - SUSE/openSUSE
    Zypper,
    /// Emerge - Gentoo (Portage)
    Emerge,
}

impl PackageManager {
    /// All families, in the order their binaries are probed on `PATH`.
    pub const ALL: [PackageManager; 7] = [
        Self::Apt,
        Self::Apk,
        Self::Dnf,
        Self::Yum,
        Self::Pacman,
        Self::Zypper,
        Self::Emerge,
    ];

    /// Lowercase identifier of this family, e.g. `"apt"`.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Apt => "apt",
            Self::Apk => "apk",
            Self::Dnf => "dnf",
            Self::Yum => "yum",
            Self::Pacman => "pacman",
            Self::Zypper => "zypper",
            Self::Emerge => "emerge",
        }
    }

    /// Executable whose presence on `PATH` identifies this family.
    pub fn binary(&self) -> &'static str {
        self.name()
    }

    /// Get a human-readable name for this package manager.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Apt => "APT",
            Self::Apk => "APK",
            Self::Dnf => "DNF",
            Self::Yum => "YUM",
            Self::Pacman => "Pacman",
            Self::Zypper => "Zypper",
            Self::Emerge => "Portage",
        }
    }

    /// Command that refreshes the package index.
    pub fn update(&self) -> Result<String> {
        let args = match self {
            Self::Apt => "apt update",
            Self::Apk => "apk update",
            Self::Dnf => "dnf check-update",
            Self::Yum => "yum check-update",
            Self::Pacman => "pacman -Sy",
            Self::Zypper => "zypper refresh",
            Self::Emerge => "emerge --sync",
        };
        Ok(format!("{PRIVILEGE_PREFIX} {args}"))
    }

    /// Command that upgrades the whole system without prompting.
    pub fn upgrade(&self) -> Result<String> {
        let args = match self {
            Self::Apt => "apt upgrade -y",
            Self::Apk => "apk upgrade",
            Self::Dnf => "dnf upgrade -y",
            Self::Yum => "yum update -y",
            Self::Pacman => "pacman -Syu --noconfirm",
            Self::Zypper => "zypper update -y",
            Self::Emerge => "emerge -uDN @world",
        };
        Ok(format!("{PRIVILEGE_PREFIX} {args}"))
    }

    /// Get the install command prefix for this package manager.
    ///
    /// Returns the privilege token and the base arguments that precede the
    /// package names.
    pub fn install_command(&self) -> (&'static str, &'static [&'static str]) {
        match self {
            Self::Apt => (PRIVILEGE_PREFIX, &["apt", "install", "-y"]),
            Self::Apk => (PRIVILEGE_PREFIX, &["apk", "add"]),
            Self::Dnf => (PRIVILEGE_PREFIX, &["dnf", "install", "-y"]),
            Self::Yum => (PRIVILEGE_PREFIX, &["yum", "install", "-y"]),
            Self::Pacman => (PRIVILEGE_PREFIX, &["pacman", "-S", "--noconfirm"]),
            Self::Zypper => (PRIVILEGE_PREFIX, &["zypper", "install", "-y"]),
            Self::Emerge => (PRIVILEGE_PREFIX, &["emerge"]),
        }
    }

    /// Get the remove command prefix for this package manager.
    pub fn remove_command(&self) -> (&'static str, &'static [&'static str]) {
        match self {
            Self::Apt => (PRIVILEGE_PREFIX, &["apt", "remove", "-y"]),
            Self::Apk => (PRIVILEGE_PREFIX, &["apk", "del"]),
            Self::Dnf => (PRIVILEGE_PREFIX, &["dnf", "remove", "-y"]),
            Self::Yum => (PRIVILEGE_PREFIX, &["yum", "remove", "-y"]),
            Self::Pacman => (PRIVILEGE_PREFIX, &["pacman", "-Rns", "--noconfirm"]),
            Self::Zypper => (PRIVILEGE_PREFIX, &["zypper", "remove", "-y"]),
            Self::Emerge => (PRIVILEGE_PREFIX, &["emerge", "-C"]),
        }
    }

    /// Command that installs `names`.
    pub fn install<S: AsRef<str>>(&self, names: &[S]) -> Result<String> {
        build_package_command(self.install_command(), names)
    }

    /// Command that removes `names`.
    pub fn remove<S: AsRef<str>>(&self, names: &[S]) -> Result<String> {
        build_package_command(self.remove_command(), names)
    }

    /// Query command that succeeds when `name` is installed.
    pub fn is_installed(&self, name: &str) -> Result<String> {
        validate_name(name)?;

        Ok(match self {
            Self::Apt => format!("dpkg -l {name}"),
            Self::Apk => format!("apk info -e {name}"),
            Self::Dnf => format!("dnf list installed {name}"),
            Self::Yum => format!("yum list installed {name}"),
            Self::Pacman => format!("pacman -Qi {name}"),
            Self::Zypper => format!("zypper se -i {name}"),
            Self::Emerge => format!("qlist -I {name}"),
        })
    }

    /// Pair of commands printing the installed version and the latest
    /// version known to the repository metadata, in that order.
    ///
    /// The second command reads the local index cache, so the two answers can
    /// disagree until the index is refreshed with [`PackageManager::update`].
    pub fn version_check(&self, name: &str) -> Result<(String, String)> {
        validate_name(name)?;

        Ok(match self {
            Self::Apt => (
                format!("dpkg -s {name} | grep Version"),
                format!("apt-cache policy {name} | grep Candidate"),
            ),
            Self::Apk => (
                format!("apk info -v {name}"),
                format!("apk search -x {name}"),
            ),
            Self::Dnf => (
                format!("dnf info {name} | grep Version"),
                format!("dnf --showduplicates list {name} | grep -v Installed | awk '{{print $2}}'"),
            ),
            Self::Yum => (
                format!("yum info {name} | grep Version"),
                format!("yum --showduplicates list {name} | grep -v Installed | awk '{{print $2}}'"),
            ),
            Self::Pacman => (
                format!("pacman -Qi {name} | grep Version"),
                format!("pacman -Si {name} | grep Version"),
            ),
            Self::Zypper => (
                format!("rpm -q --queryformat '%{{VERSION}}' {name}"),
                format!("zypper info {name} | grep Version"),
            ),
            Self::Emerge => (
                format!("qlist -Iv {name}"),
                format!("emerge -p {name} | grep ebuild"),
            ),
        })
    }
}

fn build_package_command<S: AsRef<str>>(
    (prefix, args): (&'static str, &'static [&'static str]),
    names: &[S],
) -> Result<String> {
    if names.is_empty() {
        return Err(PackageError::NoPackages);
    }
    validate(names)?;

    let mut parts: Vec<&str> = Vec::with_capacity(1 + args.len() + names.len());
    parts.push(prefix);
    parts.extend_from_slice(args);
    parts.extend(names.iter().map(|name| name.as_ref()));
    Ok(parts.join(" "))
}

/// Map a family name to its package manager.
pub fn create_manager(family: &str) -> Result<PackageManager> {
    if family.is_empty() {
        return Err(PackageError::EmptyFamilyName);
    }

    PackageManager::ALL
        .into_iter()
        .find(|manager| manager.name() == family)
        .ok_or_else(|| PackageError::UnsupportedFamily(family.to_string()))
}

impl FromStr for PackageManager {
    type Err = PackageError;

    fn from_str(s: &str) -> Result<Self> {
        create_manager(s)
    }
}

impl std::fmt::Display for PackageManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
