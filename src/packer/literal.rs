use crate::constants::LITERAL_ENTROPY_FLAG;
use crate::entropy::EntropyCoder;
use crate::varint::encode_varint;

/// Appends a literal: a varint prefix of `(length << 1) | flag` followed by
/// the payload, entropy coded when that is strictly shorter.
pub(crate) fn write_literal(coder: &dyn EntropyCoder, buf: &mut Vec<u8>, payload: &[u8]) {
    let raw_len = payload.len() as u64;
    let coded_len = if raw_len == 0 {
        raw_len
    } else {
        coder.encoded_len(payload)
    };

    if coded_len < raw_len {
        encode_varint((coded_len << 1) | LITERAL_ENTROPY_FLAG, buf);
        let start = buf.len();
        coder.encode(payload, buf);
        debug_assert_eq!((buf.len() - start) as u64, coded_len);
    } else {
        encode_varint(raw_len << 1, buf);
        buf.extend_from_slice(payload);
    }
}
