//! OS family reported by the agent at connect time

use serde::{Deserialize, Serialize};

/// Operating system family of a managed host.
///
/// Families group distributions that share a native package manager and
/// service manager: `Debian` covers Debian and Ubuntu, `Redhat` covers
/// RHEL and CentOS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OsFamily {
    Debian,
    Redhat,
    Fedora,
    Macos,
    Freebsd,
}

impl std::fmt::Display for OsFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OsFamily::Debian => write!(f, "debian"),
            OsFamily::Redhat => write!(f, "redhat"),
            OsFamily::Fedora => write!(f, "fedora"),
            OsFamily::Macos => write!(f, "macos"),
            OsFamily::Freebsd => write!(f, "freebsd"),
        }
    }
}
