mod entropy_coder;
mod entropy_error;
mod huffman_coder;
mod huffman_table;
mod passthrough_coder;

pub use entropy_coder::EntropyCoder;
pub use entropy_error::EntropyDecodeError;
pub use huffman_coder::HuffmanCoder;
pub use passthrough_coder::PassthroughCoder;
