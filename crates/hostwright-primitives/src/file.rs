//! The primitive for managing files on a managed host
//!
//! # Uploading
//!
//! ```no_run
//! use hostwright_client::{Host, HostAddress};
//! use hostwright_primitives::{File, UploadOptions};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut host = Host::connect(HostAddress::from_file("nodes/web.toml")?).await?;
//!
//! // Upload nginx.conf. If the remote file already exists it is
//! // renamed to /etc/nginx/nginx.conf_bk before the new content is
//! // written.
//! let file = File::new("/etc/nginx/nginx.conf");
//! file.upload(
//!     &mut host,
//!     "conf/nginx.conf",
//!     &UploadOptions::default().with_backup_suffix("_bk"),
//! )
//! .await?;
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use tokio::fs;
use tracing::{info, instrument};

use hostwright_client::{Host, transfer};
use hostwright_proto::{FileOwner, Payload, Request};

use crate::error::{PrimitiveError, Result};
use crate::reply;

/// Options for file upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadOptions {
    /// Rename a pre-existing destination file to `<path><suffix>`
    /// before writing. Off by default: the destination is replaced.
    pub backup_suffix: Option<String>,
    /// Bytes per chunk on the transfer channel. Fixed for the duration
    /// of one upload. Defaults to [`transfer::DEFAULT_CHUNK_SIZE`].
    pub chunk_size: usize,
}

impl Default for UploadOptions {
    fn default() -> Self {
        Self {
            backup_suffix: None,
            chunk_size: transfer::DEFAULT_CHUNK_SIZE,
        }
    }
}

impl UploadOptions {
    /// Back up a pre-existing destination file under this suffix.
    #[must_use]
    pub fn with_backup_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.backup_suffix = Some(suffix.into());
        self
    }

    /// Use a custom chunk size.
    #[must_use]
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }
}

/// A file on a managed host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
    path: String,
}

impl File {
    /// Create a new file descriptor.
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    /// The remote path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Check if the file exists.
    pub async fn exists(&self, host: &mut Host) -> Result<bool> {
        let payload = host
            .send(Request::FileExists {
                path: self.path.clone(),
            })
            .await?;
        reply::boolean(payload)
    }

    /// Upload a local file to the managed host.
    ///
    /// The upload is reserved on the control channel (the agent
    /// performs the backup rename there, if requested, and refuses the
    /// whole upload if that rename fails), then streamed in fixed-size
    /// chunks over the transfer channel. The agent writes into a
    /// temporary file and renames into place only after the final
    /// chunk, so a failure mid-stream never leaves a half-written
    /// destination.
    ///
    /// # Errors
    /// `PrimitiveError::InvalidChunkSize` for a zero chunk size,
    /// `PrimitiveError::Io` if the local file cannot be read, and a
    /// single session error covering the whole upload otherwise.
    #[instrument(skip(self, host, local_path, options), fields(path = %self.path))]
    pub async fn upload(
        &self,
        host: &mut Host,
        local_path: impl AsRef<Path>,
        options: &UploadOptions,
    ) -> Result<()> {
        if options.chunk_size == 0 {
            return Err(PrimitiveError::InvalidChunkSize);
        }

        let mut source = fs::File::open(local_path.as_ref()).await?;
        let size = source.metadata().await?.len();
        let chunk_size = options.chunk_size as u64;
        let total_chunks = size.div_ceil(chunk_size);

        let payload = host
            .send(Request::FileUploadBegin {
                path: self.path.clone(),
                size,
                total_chunks,
                chunk_size,
                backup_suffix: options.backup_suffix.clone(),
            })
            .await?;
        let upload = match payload {
            Payload::UploadReady { upload } => upload,
            other => return Err(PrimitiveError::unexpected("upload_ready", &other)),
        };

        transfer::upload(host, upload, &mut source, options.chunk_size, total_chunks).await?;

        info!(bytes = size, chunks = total_chunks, "upload complete");
        Ok(())
    }

    /// Delete the file.
    pub async fn delete(&self, host: &mut Host) -> Result<()> {
        let payload = host
            .send(Request::FileDelete {
                path: self.path.clone(),
            })
            .await?;
        reply::unit(payload)
    }

    /// Move the file. On success the descriptor tracks the new path.
    pub async fn mv(&mut self, host: &mut Host, new_path: impl Into<String>) -> Result<()> {
        let new_path = new_path.into();
        let payload = host
            .send(Request::FileMove {
                path: self.path.clone(),
                new_path: new_path.clone(),
            })
            .await?;
        reply::unit(payload)?;
        self.path = new_path;
        Ok(())
    }

    /// Copy the file to another remote path.
    pub async fn copy(&self, host: &mut Host, new_path: impl Into<String>) -> Result<()> {
        let payload = host
            .send(Request::FileCopy {
                path: self.path.clone(),
                new_path: new_path.into(),
            })
            .await?;
        reply::unit(payload)
    }

    /// Get the owning user and group.
    pub async fn get_owner(&self, host: &mut Host) -> Result<FileOwner> {
        let payload = host
            .send(Request::FileGetOwner {
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
            .send(Request::FileSetOwner {
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
            .send(Request::FileGetMode {
                path: self.path.clone(),
            })
            .await?;
        reply::mode(payload)
    }

    /// Set the permissions mode.
    pub async fn set_mode(&self, host: &mut Host, mode: u16) -> Result<()> {
        let payload = host
            .send(Request::FileSetMode {
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
    fn upload_options_defaults() {
        let options = UploadOptions::default();
        assert_eq!(options.backup_suffix, None);
        assert_eq!(options.chunk_size, transfer::DEFAULT_CHUNK_SIZE);
    }

    #[test]
    fn upload_options_builders() {
        let options = UploadOptions::default()
            .with_backup_suffix("_bk")
            .with_chunk_size(4096);
        assert_eq!(options.backup_suffix.as_deref(), Some("_bk"));
        assert_eq!(options.chunk_size, 4096);
    }
}
