use crate::constants::LITERAL_ENTROPY_FLAG;
use crate::entropy::EntropyCoder;
use crate::packer::PackerDecodeError;
use crate::varint::{VarIntError, decode_varint};
use std::borrow::Cow;

/// Forward-only reader over a frame body or dump section.
pub(crate) struct FrameCursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> FrameCursor<'a> {
    pub(crate) fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    pub(crate) fn offset(&self) -> usize {
        self.pos
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.pos >= self.buf.len()
    }

    fn remaining(&self) -> usize {
        self.buf.len().saturating_sub(self.pos)
    }

    /// Next byte, or `None` at the end of the buffer.
    pub(crate) fn next_byte(&mut self) -> Option<u8> {
        let byte = *self.buf.get(self.pos)?;
        self.pos += 1;
        Some(byte)
    }

    pub(crate) fn read_varint(&mut self) -> Result<u64, PackerDecodeError> {
        let offset = self.pos;
        let rest = self.buf.get(self.pos..).unwrap_or_default();
        match decode_varint(rest) {
            Ok((value, consumed)) => {
                self.pos += consumed;
                Ok(value)
            }
            Err(VarIntError::UnexpectedEof) => Err(PackerDecodeError::TruncatedField { offset }),
            Err(VarIntError::Overflow) => Err(PackerDecodeError::VarIntOverflow { offset }),
        }
    }

    /// Reads one literal, undoing entropy coding when its prefix says so.
    pub(crate) fn read_literal(
        &mut self,
        coder: &dyn EntropyCoder,
    ) -> Result<Cow<'a, [u8]>, PackerDecodeError> {
        let offset = self.pos;
        let prefix = self.read_varint()?;
        let claimed = prefix >> 1;
        let remaining = self.remaining();

        if claimed > remaining as u64 {
            return Err(PackerDecodeError::TruncatedLiteral { claimed, remaining });
        }

        let start = self.pos;
        let end = start + claimed as usize;
        let payload = &self.buf[start..end];
        self.pos = end;

        if prefix & LITERAL_ENTROPY_FLAG == 0 {
            return Ok(Cow::Borrowed(payload));
        }

        let mut decoded = Vec::with_capacity(payload.len() * 8 / 5 + 1);
        coder
            .decode(payload, &mut decoded)
            .map_err(|_| PackerDecodeError::InvalidEntropyCoding { offset })?;
        Ok(Cow::Owned(decoded))
    }
}
