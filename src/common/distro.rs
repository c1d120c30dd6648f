use std::fs;
use std::io;
use std::path::Path;

use crate::common::package::PackageManager;

/// Default location of the OS identification file.
pub const OS_RELEASE_PATH: &str = "/etc/os-release";

/// Distribution IDs and the package manager family each one uses.
pub const DISTRO_FAMILIES: &[(&str, PackageManager)] = &[
    // Debian family
    ("ubuntu", PackageManager::Apt),
    ("debian", PackageManager::Apt),
    ("linuxmint", PackageManager::Apt),
    ("pop", PackageManager::Apt),
    ("raspbian", PackageManager::Apt),
    ("kali", PackageManager::Apt),
    ("elementary", PackageManager::Apt),
    // Alpine
    ("alpine", PackageManager::Apk),
    // RPM, dnf era
    ("fedora", PackageManager::Dnf),
    ("rhel", PackageManager::Dnf),
    ("rocky", PackageManager::Dnf),
    ("almalinux", PackageManager::Dnf),
    // RPM, yum era
    ("centos", PackageManager::Yum),
    ("amzn", PackageManager::Yum),
    ("ol", PackageManager::Yum),
    // Arch family
    ("arch", PackageManager::Pacman),
    ("manjaro", PackageManager::Pacman),
    ("endeavouros", PackageManager::Pacman),
    ("instantos", PackageManager::Pacman),
    ("artix", PackageManager::Pacman),
    // SUSE
    ("sles", PackageManager::Zypper),
    ("opensuse", PackageManager::Zypper),
    ("opensuse-leap", PackageManager::Zypper),
    ("opensuse-tumbleweed", PackageManager::Zypper),
    // Gentoo
    ("gentoo", PackageManager::Emerge),
];

/// Look up the package manager family for a distribution ID.
pub fn family_for_distro(id: &str) -> Option<PackageManager> {
    DISTRO_FAMILIES
        .iter()
        .find(|(distro, _)| *distro == id)
        .map(|(_, family)| *family)
}

/// The fields of an os-release file this crate cares about.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OsRelease {
    /// Value of the first `ID=` line, unquoted.
    pub id: Option<String>,
    /// Value of `PRETTY_NAME=`, unquoted.
    pub pretty_name: Option<String>,
}

impl OsRelease {
    /// Read and parse an os-release file.
    pub fn read(path: &Path) -> io::Result<Self> {
        fs::read_to_string(path).map(|content| Self::parse(&content))
    }

    /// Parse os-release content.
    pub fn parse(content: &str) -> Self {
        let mut release = Self::default();

        for line in content.lines() {
            if let Some(val) = line.strip_prefix("ID=") {
                if release.id.is_none() {
                    release.id = Some(unquote(val).to_string());
                }
            } else if let Some(val) = line.strip_prefix("PRETTY_NAME=")
                && release.pretty_name.is_none()
            {
                release.pretty_name = Some(unquote(val).to_string());
            }
        }

        release
    }

    /// Package manager family for this distribution, if it is a known one.
    pub fn family(&self) -> Option<PackageManager> {
        self.id.as_deref().and_then(family_for_distro)
    }
}

fn unquote(value: &str) -> &str {
    value.trim().trim_matches('"').trim_matches('\'')
}

impl std::fmt::Display for OsRelease {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.pretty_name, &self.id) {
            (Some(name), _) => write!(f, "{}", name),
            (None, Some(id)) => write!(f, "{}", id),
            (None, None) => write!(f, "Unknown"),
        }
    }
}
