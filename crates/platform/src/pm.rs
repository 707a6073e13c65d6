//! Package manager detection
//!
//! A pure detection function returns a tagged enum; callers select install
//! strategies from the variant instead of branching on OS strings.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::platform::Os;
use crate::resolve::find_in_path;

/// Supported system package managers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    Apt,
    Dnf,
    Pacman,
    Zypper,
    Homebrew,
    Winget,
    Chocolatey,
}

impl PackageManager {
    /// The binary this manager is invoked through
    pub const fn binary(&self) -> &'static str {
        match self {
            PackageManager::Apt => "apt-get",
            PackageManager::Dnf => "dnf",
            PackageManager::Pacman => "pacman",
            PackageManager::Zypper => "zypper",
            PackageManager::Homebrew => "brew",
            PackageManager::Winget => "winget",
            PackageManager::Chocolatey => "choco",
        }
    }

    /// Returns the manager name as shown to the operator
    pub const fn as_str(&self) -> &'static str {
        match self {
            PackageManager::Apt => "apt",
            PackageManager::Dnf => "dnf",
            PackageManager::Pacman => "pacman",
            PackageManager::Zypper => "zypper",
            PackageManager::Homebrew => "homebrew",
            PackageManager::Winget => "winget",
            PackageManager::Chocolatey => "chocolatey",
        }
    }

    /// Managers that can exist on the given OS, in detection preference order
    pub const fn candidates(os: Os) -> &'static [PackageManager] {
        match os {
            Os::Linux => &[
                PackageManager::Apt,
                PackageManager::Dnf,
                PackageManager::Pacman,
                PackageManager::Zypper,
            ],
            Os::Darwin => &[PackageManager::Homebrew],
            Os::Windows => &[PackageManager::Winget, PackageManager::Chocolatey],
        }
    }

    /// Detect the first package manager whose binary resolves on `PATH`
    pub fn detect(os: Os) -> Option<Self> {
        let found = Self::candidates(os)
            .iter()
            .copied()
            .find(|pm| find_in_path(pm.binary()).is_some());

        match found {
            Some(pm) => debug!(manager = %pm, "detected package manager"),
            None => debug!(os = %os, "no package manager found"),
        }

        found
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manager_names() {
        assert_eq!(PackageManager::Apt.as_str(), "apt");
        assert_eq!(PackageManager::Apt.binary(), "apt-get");
        assert_eq!(PackageManager::Homebrew.binary(), "brew");
        assert_eq!(PackageManager::Chocolatey.binary(), "choco");
    }

    #[test]
    fn test_candidates_match_os() {
        assert_eq!(PackageManager::candidates(Os::Darwin), &[PackageManager::Homebrew]);
        assert!(PackageManager::candidates(Os::Linux).contains(&PackageManager::Apt));
        assert!(!PackageManager::candidates(Os::Windows).contains(&PackageManager::Apt));
    }

    #[test]
    fn test_detect_does_not_panic() {
        // Result depends on the host; only exercise the path
        let _ = PackageManager::detect(Os::current());
    }
}
