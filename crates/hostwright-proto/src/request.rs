//! Control-channel request types
//!
//! One request frame is answered by exactly one [`Response`] frame; the
//! channel alternates strictly. File chunk data never travels here; it
//! is carried by [`TransferFrame`] on the transfer channel after a
//! successful `FileUploadBegin`.
//!
//! [`Response`]: crate::response::Response
//! [`TransferFrame`]: crate::transfer::TransferFrame

use serde::{Deserialize, Serialize};

use crate::provider::PackageProvider;

/// An operation addressed to one managed host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Request {
    /// Run a shell command verbatim. No quoting or escaping is applied
    /// on either side.
    RunCommand { cmd: String },

    DirExists { path: String },
    DirCreate { path: String, recursive: bool },
    DirDelete { path: String, recursive: bool },
    DirMove { path: String, new_path: String },
    DirGetOwner { path: String },
    DirSetOwner { path: String, user: String, group: String },
    DirGetMode { path: String },
    DirSetMode { path: String, mode: u16 },

    FileExists { path: String },
    /// Reserve an upload. The agent performs the backup rename (when
    /// `backup_suffix` is set) before acking; a failed rename fails the
    /// request and no chunk may be sent.
    FileUploadBegin {
        path: String,
        size: u64,
        total_chunks: u64,
        chunk_size: u64,
        #[serde(skip_serializing_if = "Option::is_none")]
        backup_suffix: Option<String>,
    },
    FileDelete { path: String },
    FileMove { path: String, new_path: String },
    FileCopy { path: String, new_path: String },
    FileGetOwner { path: String },
    FileSetOwner { path: String, user: String, group: String },
    FileGetMode { path: String },
    FileSetMode { path: String, mode: u16 },

    PackageIsInstalled { name: String, provider: PackageProvider },
    PackageInstall { name: String, provider: PackageProvider },
    PackageUninstall { name: String, provider: PackageProvider },

    /// Pass `action` as a verb to the host's native service manager.
    ServiceAction { name: String, action: String },

    TelemetryLoad,
}
