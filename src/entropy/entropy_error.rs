use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntropyDecodeError {
    /// A bit sequence matched no code.
    InvalidCode,

    /// The trailing bits were longer than 7 or were not all ones.
    InvalidPadding,

    /// The end-of-string symbol appeared inside the coded data.
    EosInStream,
}

impl fmt::Display for EntropyDecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntropyDecodeError::InvalidCode => f.write_str("invalid entropy code"),
            EntropyDecodeError::InvalidPadding => f.write_str("invalid entropy coding padding"),
            EntropyDecodeError::EosInStream => {
                f.write_str("end-of-string symbol inside entropy coded data")
            }
        }
    }
}

impl std::error::Error for EntropyDecodeError {}
