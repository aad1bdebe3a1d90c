//! Provider registry: OS family to package backend
//!
//! Resolution is a static table lookup. Precedence: an explicit caller
//! choice is validated against the host's OS family and wins; otherwise
//! the family's default applies. Nothing here probes the host: which
//! backends actually exist is the agent's concern.

use hostwright_proto::{OsFamily, PackageProvider};

use crate::error::{PrimitiveError, Result};

/// Default package provider for an OS family.
#[must_use]
pub fn default_provider(os: OsFamily) -> PackageProvider {
    match os {
        OsFamily::Debian => PackageProvider::Apt,
        OsFamily::Redhat => PackageProvider::Yum,
        OsFamily::Fedora => PackageProvider::Dnf,
        OsFamily::Macos => PackageProvider::Homebrew,
        OsFamily::Freebsd => PackageProvider::Pkg,
    }
}

/// Check whether a provider can exist on an OS family at all.
#[must_use]
pub fn supported(provider: PackageProvider, os: OsFamily) -> bool {
    match os {
        OsFamily::Debian => matches!(provider, PackageProvider::Apt),
        OsFamily::Redhat => matches!(provider, PackageProvider::Yum | PackageProvider::Dnf),
        OsFamily::Fedora => matches!(provider, PackageProvider::Dnf | PackageProvider::Yum),
        OsFamily::Macos => matches!(
            provider,
            PackageProvider::Homebrew | PackageProvider::Macports
        ),
        OsFamily::Freebsd => matches!(provider, PackageProvider::Pkg | PackageProvider::Ports),
    }
}

/// Resolve the provider to use for a package operation.
///
/// # Errors
/// `PrimitiveError::UnsupportedProvider` when an explicit choice is
/// incompatible with the host's OS family. A mismatch fails rather
/// than falling back.
pub fn resolve(explicit: Option<PackageProvider>, os: OsFamily) -> Result<PackageProvider> {
    match explicit {
        Some(provider) if supported(provider, os) => Ok(provider),
        Some(provider) => Err(PrimitiveError::UnsupportedProvider { provider, os }),
        None => Ok(default_provider(os)),
    }
}
