use headpack::constants::FRAME_LENGTH_FIELD_SIZE;
use headpack::packer::{PackerDecodeError, PackerError};
use std::io;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

/// Reads exactly one frame, length prefix included, into `buf`.
///
/// `buf` is cleared first. A declared body length above `max_frame_size` is
/// rejected before any of the body is read. Returns the frame length.
pub async fn read_frame<R>(
    reader: &mut R,
    buf: &mut Vec<u8>,
    max_frame_size: usize,
) -> Result<usize, PackerError>
where
    R: AsyncRead + Unpin,
{
    let mut prefix = [0u8; FRAME_LENGTH_FIELD_SIZE];
    reader.read_exact(&mut prefix).await.inspect_err(log_io)?;
    let declared = u16::from_le_bytes(prefix) as usize;

    if declared > max_frame_size {
        tracing::warn!(
            "Rejecting incoming frame of {} bytes, max is {}",
            declared,
            max_frame_size
        );
        return Err(PackerDecodeError::FrameTooLarge {
            max: max_frame_size,
            actual: declared,
        }
        .into());
    }

    buf.clear();
    buf.extend_from_slice(&prefix);
    buf.resize(FRAME_LENGTH_FIELD_SIZE + declared, 0);
    reader
        .read_exact(&mut buf[FRAME_LENGTH_FIELD_SIZE..])
        .await
        .inspect_err(log_io)?;

    Ok(buf.len())
}

/// Writes a complete frame and flushes the writer.
pub async fn write_frame<W>(writer: &mut W, frame: &[u8]) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    writer.write_all(frame).await.inspect_err(log_io)?;
    writer.flush().await.inspect_err(log_io)
}

pub(crate) fn log_io(err: &io::Error) {
    tracing::warn!("Frame transport I/O failed: {}", err);
}
