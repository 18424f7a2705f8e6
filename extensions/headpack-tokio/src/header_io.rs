use crate::frame_io::{read_frame, write_frame};
use headpack::header::{Header, HeaderError};
use headpack::packer::{Packer, PackerError};

/// Encodes `header` and writes it as one frame. Returns the frame length.
///
/// Nothing is written if the header does not encode.
pub async fn send_header<W>(
    writer: &mut W,
    packer: &mut Packer,
    header: &Header,
) -> Result<usize, HeaderError>
where
    W: tokio::io::AsyncWrite + Unpin,
{
    let frame = header.flush(packer)?;
    write_frame(writer, &frame)
        .await
        .map_err(|e| HeaderError::Flush(PackerError::Io(e)))?;
    Ok(frame.len())
}

/// Reads one frame into `buf` and parses it into `header`.
///
/// `buf` is only scratch space; pass a pooled buffer to avoid allocating
/// per call.
pub async fn recv_header<R>(
    reader: &mut R,
    packer: &Packer,
    header: &mut Header,
    buf: &mut Vec<u8>,
) -> Result<(), HeaderError>
where
    R: tokio::io::AsyncRead + Unpin,
{
    read_frame(reader, buf, packer.max_frame_size())
        .await
        .map_err(HeaderError::Parse)?;
    header.parse(buf, packer)
}
