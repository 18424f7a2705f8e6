use crate::entropy::huffman_table::{EOS_SYMBOL, HUFFMAN_CODES};
use crate::entropy::{EntropyCoder, EntropyDecodeError};
use once_cell::sync::Lazy;

/// Marks a child slot of the decode tree as a leaf holding a symbol.
const LEAF: u16 = 0x8000;

/// Child slot value meaning "no node". The root is never anyone's child.
const EMPTY: u16 = 0;

/// Binary decode tree for the static code, built once per process.
///
/// Every node stores its two children (bit 0, bit 1). A child is either an
/// index into `nodes` or `LEAF | symbol`.
struct DecodeTree {
    nodes: Vec<[u16; 2]>,
}

static DECODE_TREE: Lazy<DecodeTree> = Lazy::new(DecodeTree::build);

impl DecodeTree {
    fn build() -> Self {
        let mut nodes: Vec<[u16; 2]> = vec![[EMPTY; 2]];

        for (symbol, &(code, len)) in HUFFMAN_CODES.iter().enumerate() {
            let mut node = 0usize;

            for shift in (0..len).rev() {
                let bit = ((code >> shift) & 1) as usize;

                if shift == 0 {
                    nodes[node][bit] = LEAF | symbol as u16;
                    break;
                }

                node = match nodes[node][bit] {
                    EMPTY => {
                        nodes.push([EMPTY; 2]);
                        let next = nodes.len() - 1;
                        nodes[node][bit] = next as u16;
                        next
                    }
                    next => next as usize,
                };
            }
        }

        Self { nodes }
    }
}

/// The HPACK static Huffman code.
///
/// Tuned for ASCII header text: lower-case letters, digits and common
/// punctuation take 5 to 6 bits, so typical names and tokens shrink by
/// roughly a quarter. Arbitrary binary data usually grows, in which case the
/// packer keeps the raw bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct HuffmanCoder;

impl EntropyCoder for HuffmanCoder {
    fn encoded_len(&self, src: &[u8]) -> u64 {
        let bits: u64 = src
            .iter()
            .map(|&byte| u64::from(HUFFMAN_CODES[byte as usize].1))
            .sum();
        bits.div_ceil(8)
    }

    fn encode(&self, src: &[u8], dst: &mut Vec<u8>) {
        let mut acc: u64 = 0;
        let mut pending: u32 = 0;

        for &byte in src {
            let (code, len) = HUFFMAN_CODES[byte as usize];
            acc = (acc << len) | u64::from(code);
            pending += u32::from(len);

            while pending >= 8 {
                pending -= 8;
                dst.push((acc >> pending) as u8);
            }
            acc &= (1u64 << pending) - 1;
        }

        if pending > 0 {
            // Pad with the most significant bits of EOS, which are all ones.
            dst.push(((acc << (8 - pending)) as u8) | (0xff >> pending));
        }
    }

    fn decode(&self, src: &[u8], dst: &mut Vec<u8>) -> Result<(), EntropyDecodeError> {
        let tree = &*DECODE_TREE;
        let mut node = 0usize;
        let mut depth = 0u32;
        let mut all_ones = true;

        for &byte in src {
            for shift in (0..8).rev() {
                let bit = (byte >> shift) & 1;
                depth += 1;
                all_ones &= bit == 1;

                match tree.nodes[node][bit as usize] {
                    EMPTY => return Err(EntropyDecodeError::InvalidCode),
                    child if child & LEAF != 0 => {
                        let symbol = child & !LEAF;
                        if symbol == EOS_SYMBOL {
                            return Err(EntropyDecodeError::EosInStream);
                        }
                        dst.push(symbol as u8);
                        node = 0;
                        depth = 0;
                        all_ones = true;
                    }
                    child => node = child as usize,
                }
            }
        }

        if depth > 7 || !all_ones {
            return Err(EntropyDecodeError::InvalidPadding);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(src: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        HuffmanCoder.encode(src, &mut out);
        out
    }

    fn decode(src: &[u8]) -> Result<Vec<u8>, EntropyDecodeError> {
        let mut out = Vec::new();
        HuffmanCoder.decode(src, &mut out).map(|_| out)
    }

    #[test]
    fn encodes_rfc7541_vectors() {
        assert_eq!(
            encode(b"www.example.com"),
            [
                0xf1, 0xe3, 0xc2, 0xe5, 0xf2, 0x3a, 0x6b, 0xa0, 0xab, 0x90, 0xf4, 0xff
            ]
        );
        assert_eq!(encode(b"no-cache"), [0xa8, 0xeb, 0x10, 0x64, 0x9c, 0xbf]);
        assert_eq!(
            encode(b"custom-key"),
            [0x25, 0xa8, 0x49, 0xe9, 0x5b, 0xa9, 0x7d, 0x7f]
        );
        assert_eq!(
            encode(b"custom-value"),
            [0x25, 0xa8, 0x49, 0xe9, 0x5b, 0xb8, 0xe8, 0xb4, 0xbf]
        );
    }

    #[test]
    fn decodes_rfc7541_vectors() {
        assert_eq!(
            decode(&[0xf1, 0xe3, 0xc2, 0xe5, 0xf2, 0x3a, 0x6b, 0xa0, 0xab, 0x90, 0xf4, 0xff]),
            Ok(b"www.example.com".to_vec())
        );
        assert_eq!(
            decode(&[0xa8, 0xeb, 0x10, 0x64, 0x9c, 0xbf]),
            Ok(b"no-cache".to_vec())
        );
    }

    #[test]
    fn encoded_len_matches_output() {
        let samples: [&[u8]; 5] = [b"", b"a", b"content-type", b"\x00\x01\xff", b"snappy"];
        for sample in samples {
            assert_eq!(
                HuffmanCoder.encoded_len(sample),
                encode(sample).len() as u64,
                "sample {:?}",
                sample
            );
        }
    }

    #[test]
    fn every_byte_value_survives() {
        let all: Vec<u8> = (0..=255u8).collect();
        assert_eq!(decode(&encode(&all)), Ok(all));
    }

    #[test]
    fn empty_input_is_empty_output() {
        assert!(encode(b"").is_empty());
        assert_eq!(decode(&[]), Ok(Vec::new()));
    }

    #[test]
    fn rejects_zero_padding() {
        // 'a' is 00011; padding with zeros instead of ones.
        assert_eq!(decode(&[0x18]), Err(EntropyDecodeError::InvalidPadding));
    }

    #[test]
    fn rejects_overlong_padding() {
        // A whole byte of ones after a complete symbol.
        let mut coded = encode(b"e");
        coded.push(0xff);
        assert!(decode(&coded).is_err());
    }

    #[test]
    fn rejects_eos_in_stream() {
        // 30 one bits form EOS; pad the remaining two bits with ones.
        assert_eq!(
            decode(&[0xff, 0xff, 0xff, 0xff]),
            Err(EntropyDecodeError::EosInStream)
        );
    }
}
