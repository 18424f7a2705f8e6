mod varint_codec;
mod varint_error;

pub use varint_codec::{decode_varint, encode_varint, encoded_varint, varint_len};
pub use varint_error::VarIntError;
