use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarIntError {
    /// The accumulated value does not fit into a `u64`.
    Overflow,

    /// The input ended before the final (non-continued) byte. More data may
    /// complete it, so this is not a corruption on its own.
    UnexpectedEof,
}

impl fmt::Display for VarIntError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VarIntError::Overflow => f.write_str("varint integer overflow"),
            VarIntError::UnexpectedEof => f.write_str("varint ended before its last byte"),
        }
    }
}

impl std::error::Error for VarIntError {}
