//! The primitive for managing directories on a managed host

use tracing::instrument;

use hostwright_client::Host;
use hostwright_proto::{FileOwner, Request};

use crate::error::Result;
use crate::reply;

/// Options for directory operations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryOptions {
    /// Apply create/delete to the whole tree. Defaults to off.
    pub recursive: bool,
}

impl DirectoryOptions {
    /// Turn on recursive create/delete.
    #[must_use]
    pub fn with_recursive(mut self) -> Self {
        self.recursive = true;
        self
    }
}

/// A directory on a managed host.
///
/// A reusable descriptor holding only the remote path; every operation
/// is a synchronous round-trip against the host passed to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directory {
    path: String,
}

impl Directory {
    /// Create a new directory descriptor.
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    /// The remote path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Check if the directory exists.
    pub async fn exists(&self, host: &mut Host) -> Result<bool> {
        let payload = host
            .send(Request::DirExists {
                path: self.path.clone(),
            })
            .await?;
        reply::boolean(payload)
    }

    /// Create the directory.
    #[instrument(skip(self, host, options), fields(path = %self.path))]
    pub async fn create(&self, host: &mut Host, options: &DirectoryOptions) -> Result<()> {
        let payload = host
            .send(Request::DirCreate {
                path: self.path.clone(),
                recursive: options.recursive,
            })
            .await?;
        reply::unit(payload)
    }

    /// Delete the directory.
    #[instrument(skip(self, host, options), fields(path = %self.path))]
    pub async fn delete(&self, host: &mut Host, options: &DirectoryOptions) -> Result<()> {
        let payload = host
            .send(Request::DirDelete {
                path: self.path.clone(),
                recursive: options.recursive,
            })
            .await?;
        reply::unit(payload)
    }

    /// Move the directory. On success the descriptor tracks the new
    /// path.
    pub async fn mv(&mut self, host: &mut Host, new_path: impl Into<String>) -> Result<()> {
        let new_path = new_path.into();
        let payload = host
            .send(Request::DirMove {
                path: self.path.clone(),
                new_path: new_path.clone(),
            })
            .await?;
        reply::unit(payload)?;
        self.path = new_path;
        Ok(())
    }

    /// Get the owning user and group.
    pub async fn get_owner(&self, host: &mut Host) -> Result<FileOwner> {
        let payload = host
            .send(Request::DirGetOwner {
                path: self.path.clone(),
            })
            .await?;
        reply::owner(payload)
    }

    /// Set the owning user and group.
    pub async fn set_owner(
        &self,
        host: &mut Host,
        user: impl Into<String>,
        group: impl Into<String>,
    ) -> Result<()> {
        let payload = host
            .send(Request::DirSetOwner {
                path: self.path.clone(),
                user: user.into(),
                group: group.into(),
            })
            .await?;
        reply::unit(payload)
    }

    /// Get the permissions mode.
    pub async fn get_mode(&self, host: &mut Host) -> Result<u16> {
        let payload = host
            .send(Request::DirGetMode {
                path: self.path.clone(),
            })
            .await?;
        reply::mode(payload)
    }

    /// Set the permissions mode.
    pub async fn set_mode(&self, host: &mut Host, mode: u16) -> Result<()> {
        let payload = host
            .send(Request::DirSetMode {
                path: self.path.clone(),
                mode,
            })
            .await?;
        reply::unit(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_default_to_non_recursive() {
        assert!(!DirectoryOptions::default().recursive);
        assert!(DirectoryOptions::default().with_recursive().recursive);
    }
}
