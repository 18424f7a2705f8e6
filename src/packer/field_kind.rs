use crate::constants::{FIELD_TAG_INDEXED, FIELD_TAG_LITERAL, FIELD_TAG_NAME_REFERENCE};
use std::convert::TryFrom;

/// The tag byte leading every field encoding of a frame.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Literal name, literal value.
    Literal = FIELD_TAG_LITERAL,

    /// Name referenced by dictionary index, literal value.
    NameReference = FIELD_TAG_NAME_REFERENCE,

    /// The whole pair referenced by dictionary index.
    Indexed = FIELD_TAG_INDEXED,
}

impl TryFrom<u8> for FieldKind {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            FIELD_TAG_LITERAL => Ok(FieldKind::Literal),
            FIELD_TAG_NAME_REFERENCE => Ok(FieldKind::NameReference),
            FIELD_TAG_INDEXED => Ok(FieldKind::Indexed),
            other => Err(other),
        }
    }
}
