//! Control-channel response types

use serde::{Deserialize, Serialize};

use crate::telemetry::TelemetrySnapshot;

/// Agent's answer to one [`Request`](crate::request::Request).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Response {
    Ok {
        payload: Payload,
    },
    Error {
        detail: RemoteFailure,
    },
}

/// Successful outcome of an operation.
///
/// A closed union: callers match the variant they asked for and treat
/// anything else as a protocol violation. `NoOp` is distinct from every
/// success variant: it signals that the requested end state already
/// held and nothing was executed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Payload {
    /// Operation completed and carries nothing to report.
    Unit,
    /// Answer to an existence or predicate query.
    Bool(bool),
    /// Outcome of an executed command or provider action.
    Exec(ExecOutcome),
    /// Permissions mode bits.
    Mode(u16),
    /// Owning user and group.
    Owner(FileOwner),
    /// Point-in-time host facts.
    Snapshot(TelemetrySnapshot),
    /// Upload reserved; chunks for it may now be sent on the transfer
    /// channel.
    UploadReady { upload: u64 },
    /// The requested end state already held.
    NoOp,
}

/// Exit status and captured output of something the agent executed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecOutcome {
    /// Process exit code. Zero means the operation succeeded; nonzero
    /// means it ran and failed. Transport failures are never encoded
    /// here.
    pub exit_code: i32,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl ExecOutcome {
    /// Check if the remote process exited zero.
    #[must_use]
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// stdout decoded as UTF-8, lossily.
    #[must_use]
    pub fn stdout_lossy(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }

    /// stderr decoded as UTF-8, lossily.
    #[must_use]
    pub fn stderr_lossy(&self) -> String {
        String::from_utf8_lossy(&self.stderr).into_owned()
    }
}

/// Owner of a file or directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileOwner {
    pub user: String,
    pub group: String,
}

/// Structured failure reported by the agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteFailure {
    pub kind: RemoteFailureKind,
    pub message: String,
}

impl std::fmt::Display for RemoteFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

/// Classification of an agent-reported failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemoteFailureKind {
    PermissionDenied,
    NotFound,
    /// The pre-write backup rename failed; the upload was not started.
    BackupFailed,
    UnsupportedProvider,
    Other,
}

impl std::fmt::Display for RemoteFailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RemoteFailureKind::PermissionDenied => write!(f, "permission denied"),
            RemoteFailureKind::NotFound => write!(f, "not found"),
            RemoteFailureKind::BackupFailed => write!(f, "backup failed"),
            RemoteFailureKind::UnsupportedProvider => write!(f, "unsupported provider"),
            RemoteFailureKind::Other => write!(f, "remote failure"),
        }
    }
}
