use crate::entropy::EntropyDecodeError;
use std::fmt;

/// A lossless byte-string coder applied to literal field names and values.
///
/// Coders carry no framing of their own: the packer records whether a
/// literal was coded in the literal's length prefix and only invokes
/// `decode` for payloads it marked that way.
pub trait EntropyCoder: fmt::Debug + Send + Sync {
    /// Length in bytes that `encode` would produce for `src`. Must be cheap,
    /// the packer calls it for every literal to decide whether coding pays off.
    fn encoded_len(&self, src: &[u8]) -> u64;

    /// Appends the coded form of `src` to `dst`.
    fn encode(&self, src: &[u8], dst: &mut Vec<u8>);

    /// Appends the decoded form of `src` to `dst`.
    ///
    /// On error `dst` may hold a partial result; callers discard it.
    fn decode(&self, src: &[u8], dst: &mut Vec<u8>) -> Result<(), EntropyDecodeError>;
}
