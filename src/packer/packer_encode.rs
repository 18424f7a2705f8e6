use crate::constants::FRAME_LENGTH_FIELD_SIZE;
use crate::dictionary::{IndexLookup, normalize_name};
use crate::entropy::EntropyCoder;
use crate::packer::literal::write_literal;
use crate::packer::{FieldKind, Packer, PackerEncodeError, PackerError};
use crate::varint::encode_varint;
use std::io::Write;

impl Packer {
    /// Encodes `fields`, in order, into a new frame.
    ///
    /// Names match the dictionary case-insensitively. Each field becomes a
    /// dictionary reference where possible and a literal otherwise; literal
    /// names are sent as given.
    pub fn encode<I, N, V>(&mut self, fields: I) -> Result<Vec<u8>, PackerEncodeError>
    where
        I: IntoIterator<Item = (N, V)>,
        N: AsRef<[u8]>,
        V: AsRef<[u8]>,
    {
        let mut frame = Vec::new();
        self.encode_into(fields, &mut frame)?;
        Ok(frame)
    }

    /// Appends one complete frame to `out` and returns its length, prefix
    /// included. On error `out` is left untouched.
    pub fn encode_into<I, N, V>(
        &mut self,
        fields: I,
        out: &mut Vec<u8>,
    ) -> Result<usize, PackerEncodeError>
    where
        I: IntoIterator<Item = (N, V)>,
        N: AsRef<[u8]>,
        V: AsRef<[u8]>,
    {
        let Packer {
            max_frame_size,
            dictionary,
            coder,
            scratch,
        } = self;
        let max_frame_size = *max_frame_size;
        let coder: &dyn EntropyCoder = &**coder;

        scratch.clear();

        for (position, (name, value)) in fields.into_iter().enumerate() {
            let (name, value) = (name.as_ref(), value.as_ref());
            if name.is_empty() {
                scratch.clear();
                return Err(PackerEncodeError::EmptyName { position });
            }
            if value.is_empty() {
                scratch.clear();
                return Err(PackerEncodeError::EmptyValue { position });
            }

            match dictionary.index(&normalize_name(name), value) {
                IndexLookup::Pair { pair_index, .. } => {
                    scratch.push(FieldKind::Indexed as u8);
                    encode_varint(pair_index as u64, scratch);
                }
                IndexLookup::Name { name_index } => {
                    scratch.push(FieldKind::NameReference as u8);
                    encode_varint(name_index as u64, scratch);
                    write_literal(coder, scratch, value);
                }
                IndexLookup::Miss => {
                    scratch.push(FieldKind::Literal as u8);
                    write_literal(coder, scratch, name);
                    write_literal(coder, scratch, value);
                }
            }

            if scratch.len() > max_frame_size {
                let actual = scratch.len();
                scratch.clear();
                return Err(PackerEncodeError::FrameTooLarge {
                    max: max_frame_size,
                    actual,
                });
            }
        }

        let body_len = scratch.len();
        out.reserve(FRAME_LENGTH_FIELD_SIZE + body_len);
        // `body_len <= max_frame_size <= u16::MAX`
        out.extend_from_slice(&(body_len as u16).to_le_bytes());
        out.extend_from_slice(scratch);
        scratch.clear();

        tracing::trace!("Encoded frame with {} body bytes", body_len);

        Ok(FRAME_LENGTH_FIELD_SIZE + body_len)
    }

    /// Encodes `fields` and writes the frame to `writer` in one piece.
    /// Nothing is written if encoding fails.
    pub fn pack_to<W, I, N, V>(&mut self, writer: &mut W, fields: I) -> Result<usize, PackerError>
    where
        W: Write,
        I: IntoIterator<Item = (N, V)>,
        N: AsRef<[u8]>,
        V: AsRef<[u8]>,
    {
        let frame = self.encode(fields)?;
        writer.write_all(&frame)?;
        Ok(frame.len())
    }
}
