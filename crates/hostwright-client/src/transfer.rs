//! Chunked upload driver for the transfer channel
//!
//! Streams one reserved upload to the agent: every chunk in index
//! order, the end-of-upload marker, then exactly one receipt. Any
//! failure along the way surfaces as a single error for the whole
//! upload; there is no partial success.

use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::{debug, instrument};

use hostwright_proto::{TransferFrame, TransferReceipt, read_frame, write_frame};

use crate::error::{ClientError, Result};
use crate::session::Host;

/// Chunk size used when the caller does not pick one.
pub const DEFAULT_CHUNK_SIZE: usize = 1024;

/// Stream a reserved upload over the host's transfer channel.
///
/// `upload` is the id handed back by a successful `FileUploadBegin`.
/// The chunk size is fixed for the duration of the upload; every chunk
/// except the last carries exactly `chunk_size` bytes.
///
/// # Errors
/// `ClientError::Transport` if the channel fails mid-stream,
/// `ClientError::Remote` if the agent rejects the upload,
/// `ClientError::Source` if the local source cannot be read.
#[instrument(skip(host, source), fields(host = %host.address().hostname))]
pub async fn upload<S>(
    host: &mut Host,
    upload: u64,
    source: &mut S,
    chunk_size: usize,
    total_chunks: u64,
) -> Result<()>
where
    S: AsyncRead + Unpin,
{
    let stream = host.transfer_channel().await?;
    let mut buf = vec![0u8; chunk_size];

    for index in 0..total_chunks {
        let filled = fill(source, &mut buf).await.map_err(ClientError::Source)?;
        write_frame(
            stream,
            &TransferFrame::Chunk {
                upload,
                index,
                data: buf[..filled].to_vec(),
            },
        )
        .await?;
    }

    write_frame(
        stream,
        &TransferFrame::End {
            upload,
            total_chunks,
        },
    )
    .await?;

    debug!(chunks = total_chunks, "awaiting receipt");

    match read_frame::<_, TransferReceipt>(stream).await? {
        TransferReceipt::Ok { .. } => Ok(()),
        TransferReceipt::Error { detail, .. } => Err(ClientError::Remote(detail)),
    }
}

/// Read until `buf` is full or the source is exhausted.
async fn fill<S>(source: &mut S, buf: &mut [u8]) -> std::io::Result<usize>
where
    S: AsyncRead + Unpin,
{
    let mut filled = 0;
    while filled < buf.len() {
        let n = source.read(&mut buf[filled..]).await?;
        if n == 0 {
            break;
        }
        filled += n;
    }
    Ok(filled)
}
