use crate::packer::{PackerDecodeError, PackerEncodeError, PackerError};
use std::fmt;

#[derive(Debug)]
pub enum HeaderError {
    /// An `agent` value lacks the id/device separator.
    InvalidAgent,

    /// A `forwarded` value has a hop without exactly three parts.
    InvalidForwarded,

    /// A `content-length` value is not exactly one varint.
    InvalidContentLength,

    /// A structured attribute part contains one of its separators.
    ReservedSeparator { attribute: &'static str, separator: u8 },

    /// The frame could not be read or decoded.
    Parse(PackerError),

    /// The header could not be encoded or written.
    Flush(PackerError),
}

impl fmt::Display for HeaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeaderError::InvalidAgent => f.write_str("malformed agent value"),
            HeaderError::InvalidForwarded => f.write_str("malformed forwarded value"),
            HeaderError::InvalidContentLength => f.write_str("malformed content-length value"),
            HeaderError::ReservedSeparator {
                attribute,
                separator,
            } => write!(
                f,
                "{} must not contain the separator {:?}",
                attribute, *separator as char
            ),
            HeaderError::Parse(e) => write!(f, "header parse failed: {}", e),
            HeaderError::Flush(e) => write!(f, "header flush failed: {}", e),
        }
    }
}

impl std::error::Error for HeaderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HeaderError::Parse(e) | HeaderError::Flush(e) => Some(e),
            _ => None,
        }
    }
}

impl From<PackerDecodeError> for HeaderError {
    fn from(e: PackerDecodeError) -> Self {
        HeaderError::Parse(PackerError::Decode(e))
    }
}

impl From<PackerEncodeError> for HeaderError {
    fn from(e: PackerEncodeError) -> Self {
        HeaderError::Flush(PackerError::Encode(e))
    }
}
