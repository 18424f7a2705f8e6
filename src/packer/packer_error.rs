use std::fmt;
use std::io;

/// Rejected packer configuration, reported by the constructor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackerConfigError {
    /// The maximum frame size lies outside `64..=65535`.
    InvalidMaxFrameSize(usize),

    /// A field registration had a blank name.
    EmptyFieldName,

    /// Registered names and values exceed the dictionary content limit.
    DictionaryTooLarge { max: usize, actual: usize },
}

impl fmt::Display for PackerConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PackerConfigError::InvalidMaxFrameSize(n) => {
                write!(f, "max frame size {} is outside of 64..=65535", n)
            }
            PackerConfigError::EmptyFieldName => f.write_str("field registration with empty name"),
            PackerConfigError::DictionaryTooLarge { max, actual } => write!(
                f,
                "dictionary content of {} bytes exceeds the limit of {}",
                actual, max
            ),
        }
    }
}

impl std::error::Error for PackerConfigError {}

/// A field sequence the packer refuses to encode. Nothing was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackerEncodeError {
    /// The field at `position` has an empty name.
    EmptyName { position: usize },

    /// The field at `position` has an empty value.
    EmptyValue { position: usize },

    /// The encoded body grew past the configured maximum. `actual` is the
    /// body length at the field that crossed the limit.
    FrameTooLarge { max: usize, actual: usize },
}

impl fmt::Display for PackerEncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PackerEncodeError::EmptyName { position } => {
                write!(f, "field {} has an empty name", position)
            }
            PackerEncodeError::EmptyValue { position } => {
                write!(f, "field {} has an empty value", position)
            }
            PackerEncodeError::FrameTooLarge { max, actual } => write!(
                f,
                "encoded frame of at least {} bytes exceeds the maximum of {}",
                actual, max
            ),
        }
    }
}

impl std::error::Error for PackerEncodeError {}

/// A frame (or dictionary dump) the packer could not decode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackerDecodeError {
    /// Fewer than two bytes, so not even the length prefix is present.
    MissingLengthPrefix,

    /// The declared body length differs from the bytes supplied.
    LengthMismatch { declared: usize, available: usize },

    /// The declared body length exceeds the configured maximum.
    FrameTooLarge { max: usize, actual: usize },

    /// A tag byte names no known field kind.
    UnknownFieldKind { tag: u8, offset: usize },

    /// A name reference points at no name-only dictionary entry.
    UnknownNameIndex(u64),

    /// A pair reference points at no (name, value) dictionary entry.
    UnknownPairIndex(u64),

    /// The frame ended inside a field.
    TruncatedField { offset: usize },

    /// A literal claims more bytes than remain in the frame.
    TruncatedLiteral { claimed: u64, remaining: usize },

    /// A decoded literal name or value is empty.
    EmptyLiteral { offset: usize },

    /// An index or length does not fit into 64 bits.
    VarIntOverflow { offset: usize },

    /// An entropy coded literal failed to decode.
    InvalidEntropyCoding { offset: usize },

    /// A dictionary dump is malformed.
    InvalidDump(&'static str),
}

impl fmt::Display for PackerDecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PackerDecodeError::MissingLengthPrefix => f.write_str("frame length prefix missing"),
            PackerDecodeError::LengthMismatch {
                declared,
                available,
            } => write!(
                f,
                "frame declares {} bytes but {} are available",
                declared, available
            ),
            PackerDecodeError::FrameTooLarge { max, actual } => write!(
                f,
                "frame of {} bytes exceeds the maximum of {}",
                actual, max
            ),
            PackerDecodeError::UnknownFieldKind { tag, offset } => {
                write!(f, "unknown field kind {:#04x} at offset {}", tag, offset)
            }
            PackerDecodeError::UnknownNameIndex(i) => {
                write!(f, "no dictionary name at index {}", i)
            }
            PackerDecodeError::UnknownPairIndex(i) => {
                write!(f, "no dictionary field at index {}", i)
            }
            PackerDecodeError::TruncatedField { offset } => {
                write!(f, "frame ends inside the field at offset {}", offset)
            }
            PackerDecodeError::TruncatedLiteral { claimed, remaining } => write!(
                f,
                "literal claims {} bytes but only {} remain",
                claimed, remaining
            ),
            PackerDecodeError::EmptyLiteral { offset } => {
                write!(f, "empty literal at offset {}", offset)
            }
            PackerDecodeError::VarIntOverflow { offset } => {
                write!(f, "varint overflow at offset {}", offset)
            }
            PackerDecodeError::InvalidEntropyCoding { offset } => {
                write!(f, "invalid entropy coded literal at offset {}", offset)
            }
            PackerDecodeError::InvalidDump(reason) => {
                write!(f, "invalid dictionary dump: {}", reason)
            }
        }
    }
}

impl std::error::Error for PackerDecodeError {}

/// Errors of the stream-oriented packer operations.
#[derive(Debug)]
pub enum PackerError {
    Config(PackerConfigError),
    Encode(PackerEncodeError),
    Decode(PackerDecodeError),
    /// The underlying reader or writer failed. An `UnexpectedEof` here means
    /// the stream ended before a complete frame arrived.
    Io(io::Error),
}

impl fmt::Display for PackerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PackerError::Config(e) => write!(f, "packer configuration error: {}", e),
            PackerError::Encode(e) => write!(f, "pack failed: {}", e),
            PackerError::Decode(e) => write!(f, "unpack failed: {}", e),
            PackerError::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for PackerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PackerError::Config(e) => Some(e),
            PackerError::Encode(e) => Some(e),
            PackerError::Decode(e) => Some(e),
            PackerError::Io(e) => Some(e),
        }
    }
}

impl From<PackerConfigError> for PackerError {
    fn from(e: PackerConfigError) -> Self {
        PackerError::Config(e)
    }
}

impl From<PackerEncodeError> for PackerError {
    fn from(e: PackerEncodeError) -> Self {
        PackerError::Encode(e)
    }
}

impl From<PackerDecodeError> for PackerError {
    fn from(e: PackerDecodeError) -> Self {
        PackerError::Decode(e)
    }
}

impl From<io::Error> for PackerError {
    fn from(e: io::Error) -> Self {
        PackerError::Io(e)
    }
}
