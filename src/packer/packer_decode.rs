use crate::constants::FRAME_LENGTH_FIELD_SIZE;
use crate::entropy::EntropyCoder;
use crate::packer::frame_cursor::FrameCursor;
use crate::packer::{FieldKind, FieldSink, FieldView, Packer, PackerDecodeError, PackerError};
use std::borrow::Cow;
use std::io::Read;

impl Packer {
    /// Decodes one frame, length prefix included.
    ///
    /// The returned views borrow from `frame` and from the dictionary. The
    /// whole frame is validated before anything is returned; a malformed
    /// frame yields an error and no fields.
    pub fn decode<'a>(&'a self, frame: &'a [u8]) -> Result<Vec<FieldView<'a>>, PackerDecodeError> {
        let body = self.check_frame(frame)?;
        self.decode_body(body)
    }

    /// Decodes a frame body whose length prefix was already consumed.
    pub fn decode_body<'a>(
        &'a self,
        body: &'a [u8],
    ) -> Result<Vec<FieldView<'a>>, PackerDecodeError> {
        if body.len() > self.max_frame_size {
            return Err(PackerDecodeError::FrameTooLarge {
                max: self.max_frame_size,
                actual: body.len(),
            });
        }

        let coder: &dyn EntropyCoder = &*self.coder;
        let mut cursor = FrameCursor::new(body);
        let mut fields = Vec::new();

        while let Some(tag) = cursor.next_byte() {
            let offset = cursor.offset() - 1;
            let kind = FieldKind::try_from(tag)
                .map_err(|tag| PackerDecodeError::UnknownFieldKind { tag, offset })?;

            let field = match kind {
                FieldKind::Indexed => {
                    let index = cursor.read_varint()?;
                    let (name, value) = self
                        .dictionary_entry(index)
                        .filter(|(_, value)| !value.is_empty())
                        .ok_or(PackerDecodeError::UnknownPairIndex(index))?;
                    FieldView {
                        name: Cow::Borrowed(name),
                        value: Cow::Borrowed(value),
                    }
                }
                FieldKind::NameReference => {
                    let index = cursor.read_varint()?;
                    let (name, _) = self
                        .dictionary_entry(index)
                        .filter(|(_, value)| value.is_empty())
                        .ok_or(PackerDecodeError::UnknownNameIndex(index))?;
                    let value = read_non_empty_literal(&mut cursor, coder)?;
                    FieldView {
                        name: Cow::Borrowed(name),
                        value,
                    }
                }
                FieldKind::Literal => {
                    let name = read_non_empty_literal(&mut cursor, coder)?;
                    let value = read_non_empty_literal(&mut cursor, coder)?;
                    FieldView { name, value }
                }
            };
            fields.push(field);
        }

        Ok(fields)
    }

    /// Decodes one frame and hands its fields to `sink`, in order.
    ///
    /// The sink sees nothing unless the whole frame decodes.
    pub fn decode_into<S>(&self, frame: &[u8], sink: &mut S) -> Result<usize, S::Error>
    where
        S: FieldSink,
        S::Error: From<PackerDecodeError>,
    {
        let fields = self.decode(frame)?;
        for field in &fields {
            sink.set_field(&field.name, &field.value)?;
        }
        Ok(fields.len())
    }

    /// Reads exactly one frame from `reader` into the packer's scratch
    /// buffer and decodes it.
    ///
    /// The declared length is checked against the maximum frame size
    /// before the body is read. The views borrow the packer until dropped.
    pub fn unpack_from<R: Read>(
        &mut self,
        reader: &mut R,
    ) -> Result<Vec<FieldView<'_>>, PackerError> {
        let mut prefix = [0u8; FRAME_LENGTH_FIELD_SIZE];
        reader.read_exact(&mut prefix)?;
        let declared = u16::from_le_bytes(prefix) as usize;

        if declared > self.max_frame_size {
            tracing::warn!(
                "Rejecting incoming frame of {} bytes, max is {}",
                declared,
                self.max_frame_size
            );
            return Err(PackerDecodeError::FrameTooLarge {
                max: self.max_frame_size,
                actual: declared,
            }
            .into());
        }

        self.scratch.clear();
        self.scratch.resize(declared, 0);
        reader.read_exact(&mut self.scratch)?;

        let this: &Self = self;
        this.decode_body(&this.scratch).map_err(|err| {
            tracing::warn!("Rejecting malformed frame: {}", err);
            PackerError::Decode(err)
        })
    }

    fn check_frame<'a>(&self, frame: &'a [u8]) -> Result<&'a [u8], PackerDecodeError> {
        let (prefix, body) = frame
            .split_first_chunk::<FRAME_LENGTH_FIELD_SIZE>()
            .ok_or(PackerDecodeError::MissingLengthPrefix)?;
        let declared = u16::from_le_bytes(*prefix) as usize;

        if declared > self.max_frame_size {
            return Err(PackerDecodeError::FrameTooLarge {
                max: self.max_frame_size,
                actual: declared,
            });
        }
        if declared != body.len() {
            return Err(PackerDecodeError::LengthMismatch {
                declared,
                available: body.len(),
            });
        }
        Ok(body)
    }

    fn dictionary_entry(&self, index: u64) -> Option<(&[u8], &[u8])> {
        let index = usize::try_from(index).ok()?;
        self.dictionary.get(index)
    }
}

fn read_non_empty_literal<'a>(
    cursor: &mut FrameCursor<'a>,
    coder: &dyn EntropyCoder,
) -> Result<Cow<'a, [u8]>, PackerDecodeError> {
    let offset = cursor.offset();
    let literal = cursor.read_literal(coder)?;
    if literal.is_empty() {
        return Err(PackerDecodeError::EmptyLiteral { offset });
    }
    Ok(literal)
}
