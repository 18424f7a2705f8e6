use crate::constants::{VARINT_MAX_LEN, VARINT_MAX_SHIFT};
use crate::varint::VarIntError;

const CONTINUATION_BIT: u8 = 0x80;
const VALUE_MASK: u8 = 0x7f;

/// Appends the varint encoding of `n` to `buf`, returning the number of
/// bytes written.
///
/// Each byte carries 7 value bits, least significant group first, with the
/// high bit set on every byte except the last. Values below 128 take a
/// single byte.
#[inline]
pub fn encode_varint(mut n: u64, buf: &mut Vec<u8>) -> usize {
    let start = buf.len();
    while n >= u64::from(CONTINUATION_BIT) {
        buf.push(CONTINUATION_BIT | (n as u8 & VALUE_MASK));
        n >>= 7;
    }
    buf.push(n as u8);
    buf.len() - start
}

/// Returns the varint encoding of `n` as a fresh vector.
pub fn encoded_varint(n: u64) -> Vec<u8> {
    let mut buf = Vec::with_capacity(varint_len(n));
    encode_varint(n, &mut buf);
    buf
}

/// Number of bytes `encode_varint` emits for `n`.
#[inline]
pub fn varint_len(n: u64) -> usize {
    let bits = (u64::BITS - n.leading_zeros()).max(1) as usize;
    bits.div_ceil(7).min(VARINT_MAX_LEN)
}

/// Decodes a varint from the start of `bytes`.
///
/// Returns the value and the number of bytes consumed. Trailing bytes after
/// the varint are left untouched.
pub fn decode_varint(bytes: &[u8]) -> Result<(u64, usize), VarIntError> {
    let mut value: u64 = 0;
    let mut shift: u32 = 0;

    for (i, &byte) in bytes.iter().enumerate() {
        let group = u64::from(byte & VALUE_MASK);

        // Only a single bit of the tenth byte still fits into 64 bits.
        if shift == VARINT_MAX_SHIFT && (group > 1 || byte & CONTINUATION_BIT != 0) {
            return Err(VarIntError::Overflow);
        }

        value |= group << shift;

        if byte & CONTINUATION_BIT == 0 {
            return Ok((value, i + 1));
        }

        shift += 7;
    }

    Err(VarIntError::UnexpectedEof)
}
