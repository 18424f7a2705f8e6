use crate::entropy::{EntropyCoder, EntropyDecodeError};

/// A coder whose output is never shorter than its input.
///
/// Installing it on a packer turns entropy coding off: every literal is sent
/// raw because the coded form never wins the size comparison.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughCoder;

impl EntropyCoder for PassthroughCoder {
    fn encoded_len(&self, src: &[u8]) -> u64 {
        src.len() as u64
    }

    fn encode(&self, src: &[u8], dst: &mut Vec<u8>) {
        dst.extend_from_slice(src);
    }

    fn decode(&self, src: &[u8], dst: &mut Vec<u8>) -> Result<(), EntropyDecodeError> {
        dst.extend_from_slice(src);
        Ok(())
    }
}
