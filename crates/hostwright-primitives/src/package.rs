//! The primitive for installing and removing packages on a managed host
//!
//! ```no_run
//! use hostwright_client::{Host, HostAddress};
//! use hostwright_primitives::Package;
//! use hostwright_proto::PackageProvider;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut host = Host::connect(HostAddress::from_file("nodes/web.toml")?).await?;
//!
//! // Default provider for the host's OS family.
//! let mut nginx = Package::new(&mut host, "nginx", None).await?;
//! if nginx.install(&mut host).await?.is_noop() {
//!     println!("nginx was already installed");
//! }
//!
//! // Or pin one explicitly.
//! let mut vim = Package::new(&mut host, "vim", Some(PackageProvider::Apt)).await?;
//! vim.install(&mut host).await?;
//! # Ok(())
//! # }
//! ```

use tracing::{debug, instrument};

use hostwright_client::Host;
use hostwright_proto::{PackageProvider, Payload, Request};

use crate::error::{PrimitiveError, Result};
use crate::outcome::ApplyOutcome;
use crate::provider;
use crate::reply;

/// A package on a managed host.
///
/// The provider is resolved once at construction (explicit choice
/// validated against the host's OS family, otherwise the family
/// default) and fixed for the lifetime of the value, as is the
/// installed state queried at the same time.
#[derive(Debug, Clone)]
pub struct Package {
    name: String,
    provider: PackageProvider,
    installed: bool,
}

impl Package {
    /// Create a new package, resolving its provider and querying
    /// whether it is currently installed.
    ///
    /// # Errors
    /// `PrimitiveError::UnsupportedProvider` when an explicit provider
    /// does not exist on the host's OS family; session errors from the
    /// installed-state query.
    #[instrument(skip(host, name, explicit), fields(host = %host.address().hostname))]
    pub async fn new(
        host: &mut Host,
        name: impl Into<String>,
        explicit: Option<PackageProvider>,
    ) -> Result<Package> {
        let provider = provider::resolve(explicit, host.os())?;
        let name = name.into();

        let payload = host
            .send(Request::PackageIsInstalled {
                name: name.clone(),
                provider,
            })
            .await?;
        let installed = reply::boolean(payload)?;

        debug!(package = %name, %provider, installed, "package resolved");

        Ok(Package {
            name,
            provider,
            installed,
        })
    }

    /// The package name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The provider fixed at construction.
    #[must_use]
    pub fn provider(&self) -> PackageProvider {
        self.provider
    }

    /// Installed state as of construction, updated by successful
    /// install/uninstall calls on this value.
    #[must_use]
    pub fn is_installed(&self) -> bool {
        self.installed
    }

    /// Install the package.
    ///
    /// Returns [`ApplyOutcome::NoOp`] without a round-trip when the
    /// package is already installed.
    pub async fn install(&mut self, host: &mut Host) -> Result<ApplyOutcome> {
        if self.installed {
            return Ok(ApplyOutcome::NoOp);
        }

        let payload = host
            .send(Request::PackageInstall {
                name: self.name.clone(),
                provider: self.provider,
            })
            .await?;

        match payload {
            Payload::Exec(outcome) => {
                if outcome.success() {
                    self.installed = true;
                }
                Ok(ApplyOutcome::Changed(outcome))
            }
            Payload::NoOp => {
                self.installed = true;
                Ok(ApplyOutcome::NoOp)
            }
            other => Err(PrimitiveError::unexpected("exec", &other)),
        }
    }

    /// Uninstall the package.
    ///
    /// Returns [`ApplyOutcome::NoOp`] without a round-trip when the
    /// package is already absent.
    pub async fn uninstall(&mut self, host: &mut Host) -> Result<ApplyOutcome> {
        if !self.installed {
            return Ok(ApplyOutcome::NoOp);
        }

        let payload = host
            .send(Request::PackageUninstall {
                name: self.name.clone(),
                provider: self.provider,
            })
            .await?;

        match payload {
            Payload::Exec(outcome) => {
                if outcome.success() {
                    self.installed = false;
                }
                Ok(ApplyOutcome::Changed(outcome))
            }
            Payload::NoOp => {
                self.installed = false;
                Ok(ApplyOutcome::NoOp)
            }
            other => Err(PrimitiveError::unexpected("exec", &other)),
        }
    }
}
