use crate::constants::{DUMP_HEADER_SIZE, MAX_DUMP_ENTRIES_SIZE};
use crate::dictionary::{Dictionary, HeaderField};
use crate::entropy::EntropyCoder;
use crate::packer::frame_cursor::FrameCursor;
use crate::packer::literal::write_literal;
use crate::packer::packer_struct::{validate_dictionary, validate_max_frame_size};
use crate::packer::{Packer, PackerDecodeError, PackerError};
use std::io::{Read, Write};
use std::sync::Arc;

impl Packer {
    /// Serializes the maximum frame size and every dictionary entry, in
    /// index order, so a peer can [`Packer::load`] an identical setup.
    ///
    /// Layout: `u16` LE max frame size, `u32` LE length of the entries
    /// section, then one literal name and one literal value per entry. Name
    /// only entries carry an empty value literal.
    pub fn dump(&self) -> Vec<u8> {
        let coder: &dyn EntropyCoder = &*self.coder;
        let mut entries =
            Vec::with_capacity(self.dictionary.content_size() + 2 * self.dictionary.len());
        for field in self.dictionary.iter() {
            write_literal(coder, &mut entries, &field.name);
            write_literal(coder, &mut entries, &field.value);
        }

        let mut out = Vec::with_capacity(DUMP_HEADER_SIZE + entries.len());
        // Max frame size is validated to fit into a u16.
        out.extend_from_slice(&(self.max_frame_size as u16).to_le_bytes());
        out.extend_from_slice(&(entries.len() as u32).to_le_bytes());
        out.extend_from_slice(&entries);
        out
    }

    pub fn dump_to<W: Write>(&self, writer: &mut W) -> Result<usize, PackerError> {
        let dump = self.dump();
        writer.write_all(&dump)?;
        Ok(dump.len())
    }

    /// Replaces the maximum frame size and dictionary with those of a dump.
    ///
    /// The packer is only changed if the whole dump is valid. Packers that
    /// shared the previous dictionary keep using it.
    pub fn load(&mut self, dump: &[u8]) -> Result<(), PackerError> {
        let (header, entries) = dump
            .split_first_chunk::<DUMP_HEADER_SIZE>()
            .ok_or(PackerDecodeError::InvalidDump("truncated header"))?;
        let (max_frame_size, entries_len) = parse_dump_header(header)?;

        if entries_len != entries.len() {
            return Err(PackerDecodeError::InvalidDump("entries length mismatch").into());
        }
        self.load_entries(max_frame_size, entries)
    }

    /// Reads exactly one dump from `reader` and loads it.
    pub fn load_from<R: Read>(&mut self, reader: &mut R) -> Result<(), PackerError> {
        let mut header = [0u8; DUMP_HEADER_SIZE];
        reader.read_exact(&mut header)?;
        let (max_frame_size, entries_len) = parse_dump_header(&header)?;

        let mut entries = vec![0u8; entries_len];
        reader.read_exact(&mut entries)?;
        self.load_entries(max_frame_size, &entries)
    }

    fn load_entries(&mut self, max_frame_size: usize, entries: &[u8]) -> Result<(), PackerError> {
        let coder: &dyn EntropyCoder = &*self.coder;
        let mut cursor = FrameCursor::new(entries);
        let mut fields = Vec::new();

        while !cursor.is_empty() {
            let name = cursor.read_literal(coder)?;
            if name.is_empty() {
                return Err(PackerDecodeError::InvalidDump("entry with empty name").into());
            }
            let value = cursor.read_literal(coder)?;
            fields.push(HeaderField::new(name.into_owned(), value.into_owned()));
        }

        let dictionary = Dictionary::from_fields(fields);
        validate_dictionary(&dictionary)?;

        tracing::debug!(
            "Loaded dictionary with {} entries, max frame size {}",
            dictionary.len(),
            max_frame_size
        );

        self.max_frame_size = max_frame_size;
        self.dictionary = Arc::new(dictionary);
        self.scratch.clear();
        Ok(())
    }
}

fn parse_dump_header(header: &[u8; DUMP_HEADER_SIZE]) -> Result<(usize, usize), PackerError> {
    let [m0, m1, l0, l1, l2, l3] = *header;
    let max_frame_size = u16::from_le_bytes([m0, m1]) as usize;
    let entries_len = u32::from_le_bytes([l0, l1, l2, l3]) as usize;

    validate_max_frame_size(max_frame_size)?;
    if entries_len > MAX_DUMP_ENTRIES_SIZE {
        return Err(PackerDecodeError::InvalidDump("entries section too large").into());
    }
    Ok((max_frame_size, entries_len))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packer::PackerConfigError;

    #[test]
    fn dump_of_empty_packer_is_just_a_header() {
        let packer = Packer::new();
        assert_eq!(packer.dump(), vec![0x00, 0x20, 0, 0, 0, 0]);
    }

    #[test]
    fn rejects_invalid_headers() {
        let mut packer = Packer::new();
        assert!(matches!(
            packer.load(&[0x00, 0x20, 0]),
            Err(PackerError::Decode(PackerDecodeError::InvalidDump(_)))
        ));
        assert!(matches!(
            packer.load(&[10, 0, 0, 0, 0, 0]),
            Err(PackerError::Config(PackerConfigError::InvalidMaxFrameSize(10)))
        ));
        assert!(matches!(
            packer.load(&[0x00, 0x20, 5, 0, 0, 0, 0]),
            Err(PackerError::Decode(PackerDecodeError::InvalidDump(_)))
        ));
    }

    #[test]
    fn failed_load_keeps_previous_state() {
        let mut packer = Packer::builder().name("keep").build().unwrap();
        // One entry whose name literal is empty.
        let dump = [0x00, 0x01, 2, 0, 0, 0, 0, 0];
        assert!(packer.load(&dump).is_err());
        assert_eq!(packer.dictionary().len(), 1);
        assert_eq!(packer.max_frame_size(), crate::constants::DEFAULT_MAX_FRAME_SIZE);
    }
}
