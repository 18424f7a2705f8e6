use crate::frame_io::{log_io, write_frame};
use headpack::constants::{DUMP_HEADER_SIZE, MAX_DUMP_ENTRIES_SIZE};
use headpack::packer::{Packer, PackerDecodeError, PackerError};
use std::io;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite};

/// Sends the packer's dictionary dump so the peer can decode our frames.
pub async fn send_dictionary<W>(writer: &mut W, packer: &Packer) -> io::Result<usize>
where
    W: AsyncWrite + Unpin,
{
    let dump = packer.dump();
    write_frame(writer, &dump).await?;
    tracing::debug!(
        "Sent dictionary with {} entries ({} bytes)",
        packer.dictionary().len(),
        dump.len()
    );
    Ok(dump.len())
}

/// Receives a dictionary dump and loads it into `packer`.
///
/// The packer is left unchanged if the dump is malformed.
pub async fn recv_dictionary<R>(reader: &mut R, packer: &mut Packer) -> Result<(), PackerError>
where
    R: AsyncRead + Unpin,
{
    let mut header = [0u8; DUMP_HEADER_SIZE];
    reader.read_exact(&mut header).await.inspect_err(log_io)?;

    let [_, _, l0, l1, l2, l3] = header;
    let entries_len = u32::from_le_bytes([l0, l1, l2, l3]) as usize;
    if entries_len > MAX_DUMP_ENTRIES_SIZE {
        tracing::warn!("Rejecting dictionary dump of {} bytes", entries_len);
        return Err(PackerDecodeError::InvalidDump("entries section too large").into());
    }

    let mut dump = Vec::with_capacity(DUMP_HEADER_SIZE + entries_len);
    dump.extend_from_slice(&header);
    dump.resize(DUMP_HEADER_SIZE + entries_len, 0);
    reader
        .read_exact(&mut dump[DUMP_HEADER_SIZE..])
        .await
        .inspect_err(log_io)?;

    packer.load(&dump)?;
    tracing::debug!(
        "Received dictionary with {} entries, max frame size {}",
        packer.dictionary().len(),
        packer.max_frame_size()
    );
    Ok(())
}
