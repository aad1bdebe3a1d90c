//! Host addressing and node-definition files

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ClientError, Result};

/// Where a managed host's agent listens.
///
/// The control API and file transfer channels have their own ports. The
/// optional auth relay is a `host:port` string carried to the agent at
/// connect time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostAddress {
    /// Hostname or IP address
    pub hostname: String,
    /// Control API port
    pub api_port: u16,
    /// File transfer port
    pub transfer_port: u16,
    /// Optional auth relay, `host:port`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_relay: Option<String>,
}

impl HostAddress {
    /// Create a new address with no auth relay.
    pub fn new(hostname: impl Into<String>, api_port: u16, transfer_port: u16) -> Self {
        Self {
            hostname: hostname.into(),
            api_port,
            transfer_port,
            auth_relay: None,
        }
    }

    /// Set the auth relay address.
    #[must_use]
    pub fn with_auth_relay(mut self, relay: impl Into<String>) -> Self {
        self.auth_relay = Some(relay.into());
        self
    }

    /// Load an address from a TOML node-definition file.
    ///
    /// ```toml
    /// hostname = "web1.example.com"
    /// api_port = 7101
    /// transfer_port = 7102
    /// auth_relay = "auth.example.com:7103"   # optional
    /// ```
    ///
    /// # Errors
    /// Returns `ClientError::NodeRead` if the file cannot be read and
    /// `ClientError::NodeParse` if it is not a valid node definition.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ClientError::NodeRead {
            path: path.display().to_string(),
            source,
        })?;

        toml::from_str(&raw).map_err(|source| ClientError::NodeParse {
            path: path.display().to_string(),
            source,
        })
    }
}

impl std::fmt::Display for HostAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.hostname, self.api_port)
    }
}
