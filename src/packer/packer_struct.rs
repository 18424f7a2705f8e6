use crate::constants::{
    DEFAULT_MAX_FRAME_SIZE, MAX_DICTIONARY_CONTENT_SIZE, MAX_MAX_FRAME_SIZE, MIN_MAX_FRAME_SIZE,
};
use crate::dictionary::Dictionary;
use crate::entropy::{EntropyCoder, HuffmanCoder};
use crate::packer::{PackerBuilder, PackerConfigError};
use std::sync::Arc;

/// Encodes ordered (name, value) sequences into size-bounded frames and
/// decodes them back.
///
/// A packer owns a scratch buffer and therefore serves one encode or decode
/// at a time; it is `Send` but calls need `&mut self` where the scratch
/// buffer is involved. The dictionary is shared: any number of packers can
/// hold the same `Arc<Dictionary>`, see [`Packer::share`] and
/// [`crate::packer::PackerPool`].
///
/// Both peers must use the same dictionary, maximum frame size and entropy
/// coder. [`Packer::dump`] and [`Packer::load`] move the first two between
/// processes.
#[derive(Debug)]
pub struct Packer {
    pub(crate) max_frame_size: usize,
    pub(crate) dictionary: Arc<Dictionary>,
    pub(crate) coder: Arc<dyn EntropyCoder>,
    pub(crate) scratch: Vec<u8>,
}

impl Default for Packer {
    fn default() -> Self {
        Self::new()
    }
}

impl Packer {
    /// A packer with an empty dictionary, the default maximum frame size and
    /// Huffman coding of literals.
    pub fn new() -> Self {
        Self {
            max_frame_size: DEFAULT_MAX_FRAME_SIZE,
            dictionary: Arc::new(Dictionary::new()),
            coder: Arc::new(HuffmanCoder),
            scratch: Vec::new(),
        }
    }

    pub fn builder() -> PackerBuilder {
        PackerBuilder::new()
    }

    /// A packer over an already built, possibly shared, dictionary.
    pub fn with_dictionary(
        max_frame_size: usize,
        dictionary: Arc<Dictionary>,
    ) -> Result<Self, PackerConfigError> {
        validate_max_frame_size(max_frame_size)?;
        validate_dictionary(&dictionary)?;
        Ok(Self {
            max_frame_size,
            dictionary,
            coder: Arc::new(HuffmanCoder),
            scratch: Vec::new(),
        })
    }

    /// Replaces the literal coder. Peers must agree on it.
    pub fn with_entropy_coder(mut self, coder: Arc<dyn EntropyCoder>) -> Self {
        self.coder = coder;
        self
    }

    /// A second packer over the same dictionary and settings, with its own
    /// scratch buffer.
    pub fn share(&self) -> Self {
        Self {
            max_frame_size: self.max_frame_size,
            dictionary: Arc::clone(&self.dictionary),
            coder: Arc::clone(&self.coder),
            scratch: Vec::new(),
        }
    }

    pub fn max_frame_size(&self) -> usize {
        self.max_frame_size
    }

    pub fn dictionary(&self) -> &Arc<Dictionary> {
        &self.dictionary
    }

    pub fn entropy_coder(&self) -> &Arc<dyn EntropyCoder> {
        &self.coder
    }

    /// Clears the dictionary and the scratch buffer, keeping the buffer's
    /// capacity. A dictionary still shared with other packers is left
    /// intact for them; this packer just lets go of it.
    pub fn reset(&mut self) {
        match Arc::get_mut(&mut self.dictionary) {
            Some(dictionary) => dictionary.reset(),
            None => self.dictionary = Arc::new(Dictionary::new()),
        }
        self.scratch.clear();
    }

    pub(crate) fn install(
        &mut self,
        max_frame_size: usize,
        dictionary: Arc<Dictionary>,
        coder: Arc<dyn EntropyCoder>,
    ) {
        self.max_frame_size = max_frame_size;
        self.dictionary = dictionary;
        self.coder = coder;
    }
}

pub(crate) fn validate_max_frame_size(n: usize) -> Result<(), PackerConfigError> {
    if !(MIN_MAX_FRAME_SIZE..=MAX_MAX_FRAME_SIZE).contains(&n) {
        return Err(PackerConfigError::InvalidMaxFrameSize(n));
    }
    Ok(())
}

pub(crate) fn validate_dictionary(dictionary: &Dictionary) -> Result<(), PackerConfigError> {
    let actual = dictionary.content_size();
    if actual > MAX_DICTIONARY_CONTENT_SIZE {
        return Err(PackerConfigError::DictionaryTooLarge {
            max: MAX_DICTIONARY_CONTENT_SIZE,
            actual,
        });
    }
    Ok(())
}
