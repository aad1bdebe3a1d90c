//! Transfer-channel frame types
//!
//! An upload is one ordered stream on the transfer channel: every chunk
//! of the file in index order, then an explicit [`TransferFrame::End`]
//! marker. The agent stages chunks in a temporary file and renames it
//! into place only after it has received and verified the terminator, so
//! a connection lost mid-stream leaves nothing at the destination path.
//! The agent answers with exactly one [`TransferReceipt`] per upload,
//! after the terminator; there are no per-chunk acknowledgements.

use serde::{Deserialize, Serialize};

use crate::response::RemoteFailure;

/// A frame sent by the client on the transfer channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "frame", rename_all = "snake_case")]
pub enum TransferFrame {
    /// One chunk of upload `upload`. Chunks are sent in strictly
    /// ascending `index` order; every chunk except the last carries
    /// exactly the chunk size negotiated at `FileUploadBegin`.
    Chunk {
        upload: u64,
        index: u64,
        data: Vec<u8>,
    },
    /// End-of-upload marker. `total_chunks` lets the agent verify the
    /// stream was complete before renaming into place.
    End { upload: u64, total_chunks: u64 },
}

/// The agent's verdict on a whole upload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TransferReceipt {
    Ok { upload: u64 },
    Error { upload: u64, detail: RemoteFailure },
}
