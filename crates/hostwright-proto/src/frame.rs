//! Frame codec shared by the control and transfer channels
//!
//! Every message on either channel is one frame: a 4-byte big-endian
//! length prefix followed by a JSON document of exactly that many bytes.
//! Frames larger than [`MAX_FRAME_LEN`] are rejected locally before any
//! bytes are written, and on read before the body is allocated.

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

/// Upper bound on the encoded size of a single frame.
pub const MAX_FRAME_LEN: usize = 16 * 1024 * 1024;

/// Errors raised by the frame codec
#[derive(Error, Debug)]
pub enum FrameError {
    /// I/O failure on the underlying channel
    #[error("channel I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Frame body was not a valid encoding of the expected message
    #[error("malformed frame: {0}")]
    Codec(#[from] serde_json::Error),

    /// Frame exceeds [`MAX_FRAME_LEN`]
    #[error("frame of {len} bytes exceeds the {MAX_FRAME_LEN} byte limit")]
    Oversize {
        /// Declared or encoded frame length
        len: usize,
    },
}

/// Encode `message` and write it as a single frame.
///
/// # Errors
/// Returns `FrameError::Oversize` if the encoded body exceeds
/// [`MAX_FRAME_LEN`], or `FrameError::Io` if the write fails. Nothing is
/// written unless the whole frame fits.
pub async fn write_frame<W, T>(writer: &mut W, message: &T) -> Result<(), FrameError>
where
    W: AsyncWrite + Unpin,
    T: Serialize + ?Sized,
{
    let body = serde_json::to_vec(message)?;
    if body.len() > MAX_FRAME_LEN {
        return Err(FrameError::Oversize { len: body.len() });
    }

    #[allow(clippy::cast_possible_truncation)]
    writer.write_u32(body.len() as u32).await?;
    writer.write_all(&body).await?;
    writer.flush().await?;

    Ok(())
}

/// Read a single frame and decode it as `T`.
///
/// # Errors
/// Returns `FrameError::Oversize` if the length prefix exceeds
/// [`MAX_FRAME_LEN`] (the body is not read), `FrameError::Io` on a short
/// or failed read, or `FrameError::Codec` if the body does not decode.
pub async fn read_frame<R, T>(reader: &mut R) -> Result<T, FrameError>
where
    R: AsyncRead + Unpin,
    T: DeserializeOwned,
{
    let len = reader.read_u32().await? as usize;
    if len > MAX_FRAME_LEN {
        return Err(FrameError::Oversize { len });
    }

    let mut body = vec![0u8; len];
    reader.read_exact(&mut body).await?;

    Ok(serde_json::from_slice(&body)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::Request;

    #[tokio::test]
    async fn frame_roundtrip() {
        let (mut client, mut server) = tokio::io::duplex(4096);

        let sent = Request::RunCommand {
            cmd: "whoami".to_string(),
        };
        write_frame(&mut client, &sent).await.unwrap();

        let received: Request = read_frame(&mut server).await.unwrap();
        assert_eq!(received, sent);
    }

    #[tokio::test]
    async fn oversize_length_prefix_is_rejected_before_read() {
        let (mut client, mut server) = tokio::io::duplex(64);

        #[allow(clippy::cast_possible_truncation)]
        client.write_u32((MAX_FRAME_LEN + 1) as u32).await.unwrap();

        let err = read_frame::<_, Request>(&mut server).await.unwrap_err();
        assert!(matches!(err, FrameError::Oversize { .. }));
    }

    #[tokio::test]
    async fn truncated_body_is_an_io_error() {
        let (mut client, mut server) = tokio::io::duplex(64);

        client.write_u32(10).await.unwrap();
        client.write_all(b"abc").await.unwrap();
        drop(client);

        let err = read_frame::<_, Request>(&mut server).await.unwrap_err();
        assert!(matches!(err, FrameError::Io(_)));
    }
}
