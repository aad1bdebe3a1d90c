//! Error types for the primitive executors

use hostwright_client::ClientError;
use hostwright_proto::{OsFamily, PackageProvider, Payload};
use thiserror::Error;

/// Errors that can occur while encoding or executing a primitive
#[derive(Error, Debug)]
pub enum PrimitiveError {
    /// Session-level failure (connection, transport, agent error)
    #[error(transparent)]
    Client(#[from] ClientError),

    /// Service action not present in the map and no default configured
    #[error("unknown service action: {0}")]
    UnknownAction(String),

    /// Explicit provider is incompatible with the host's OS family
    #[error("provider {provider} is not supported on {os} hosts")]
    UnsupportedProvider {
        provider: PackageProvider,
        os: OsFamily,
    },

    /// Alias table entry points at another alias
    #[error("action alias {alias:?} points at another alias ({target:?})")]
    AliasChain { alias: String, target: String },

    /// Upload chunk size of zero
    #[error("upload chunk size must be at least 1")]
    InvalidChunkSize,

    /// Agent answered an operation with the wrong payload variant
    #[error("agent answered with {got} where {expected} was expected")]
    UnexpectedPayload {
        expected: &'static str,
        got: &'static str,
    },

    /// Local I/O failure, e.g. reading the upload source
    #[error("local I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PrimitiveError {
    pub(crate) fn unexpected(expected: &'static str, got: &Payload) -> Self {
        PrimitiveError::UnexpectedPayload {
            expected,
            got: payload_kind(got),
        }
    }
}

fn payload_kind(payload: &Payload) -> &'static str {
    match payload {
        Payload::Unit => "unit",
        Payload::Bool(_) => "bool",
        Payload::Exec(_) => "exec",
        Payload::Mode(_) => "mode",
        Payload::Owner(_) => "owner",
        Payload::Snapshot(_) => "snapshot",
        Payload::UploadReady { .. } => "upload_ready",
        Payload::NoOp => "no_op",
    }
}

/// Result type for primitive operations
pub type Result<T> = std::result::Result<T, PrimitiveError>;
