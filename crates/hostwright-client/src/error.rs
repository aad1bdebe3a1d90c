//! Error types for the hostwright client

use hostwright_proto::{FrameError, RemoteFailure};
use thiserror::Error;

/// Errors that can occur on a host session
#[derive(Error, Debug)]
pub enum ClientError {
    /// Channel could not be opened
    #[error("failed to connect to {addr}: {source}")]
    Connection {
        /// `host:port` of the channel that failed to open
        addr: String,
        source: std::io::Error,
    },

    /// Agent speaks an incompatible protocol revision
    #[error("agent speaks protocol v{agent}, this client speaks v{client}")]
    ProtocolMismatch {
        /// Version the agent announced
        agent: u32,
        /// Version this crate speaks
        client: u32,
    },

    /// Channel failed mid-operation
    #[error("transport failure: {0}")]
    Transport(#[source] std::io::Error),

    /// Structured failure reported by the agent. The session stays
    /// usable; retrying is the caller's decision.
    #[error("agent error: {0}")]
    Remote(RemoteFailure),

    /// Traffic on the channel did not decode as the expected message
    #[error("malformed traffic on channel: {0}")]
    Codec(#[source] serde_json::Error),

    /// A frame exceeded the protocol size limit
    #[error("frame of {0} bytes exceeds the protocol limit")]
    Oversize(usize),

    /// Operation attempted on a closed session
    #[error("session is closed")]
    Closed,

    /// Upload source could not be read
    #[error("failed reading upload source: {0}")]
    Source(#[source] std::io::Error),

    /// Node definition file could not be read
    #[error("failed to read node definition {path}: {source}")]
    NodeRead {
        path: String,
        source: std::io::Error,
    },

    /// Node definition file did not parse
    #[error("invalid node definition {path}: {source}")]
    NodeParse {
        path: String,
        source: toml::de::Error,
    },
}

impl From<FrameError> for ClientError {
    fn from(err: FrameError) -> Self {
        match err {
            FrameError::Io(e) => ClientError::Transport(e),
            FrameError::Codec(e) => ClientError::Codec(e),
            FrameError::Oversize { len } => ClientError::Oversize(len),
        }
    }
}

/// Result type for client operations
pub type Result<T> = std::result::Result<T, ClientError>;
