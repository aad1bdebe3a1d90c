//! Package provider selectors

use serde::{Deserialize, Serialize};

/// Package manager backend on the managed host.
///
/// The set is closed: the agent implements exactly these backends, and
/// the client validates a caller-chosen provider against the host's OS
/// family before any request is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PackageProvider {
    Apt,
    Dnf,
    Homebrew,
    Macports,
    Pkg,
    Ports,
    Yum,
}

impl std::fmt::Display for PackageProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PackageProvider::Apt => write!(f, "apt"),
            PackageProvider::Dnf => write!(f, "dnf"),
            PackageProvider::Homebrew => write!(f, "homebrew"),
            PackageProvider::Macports => write!(f, "macports"),
            PackageProvider::Pkg => write!(f, "pkg"),
            PackageProvider::Ports => write!(f, "ports"),
            PackageProvider::Yum => write!(f, "yum"),
        }
    }
}

impl std::str::FromStr for PackageProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "apt" => Ok(PackageProvider::Apt),
            "dnf" => Ok(PackageProvider::Dnf),
            "homebrew" => Ok(PackageProvider::Homebrew),
            "macports" => Ok(PackageProvider::Macports),
            "pkg" => Ok(PackageProvider::Pkg),
            "ports" => Ok(PackageProvider::Ports),
            "yum" => Ok(PackageProvider::Yum),
            other => Err(format!("unknown package provider: {other}")),
        }
    }
}
