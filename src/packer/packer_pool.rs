use crate::constants::{DEFAULT_MAX_FRAME_SIZE, DEFAULT_POOL_IDLE_CAPACITY};
use crate::dictionary::Dictionary;
use crate::entropy::{EntropyCoder, HuffmanCoder};
use crate::packer::packer_struct::{validate_dictionary, validate_max_frame_size};
use crate::packer::{Packer, PackerConfigError};
use crate::utils::FreeList;
use std::sync::Arc;

/// Hands out packers that all share one dictionary.
///
/// `acquire` never blocks: a fresh packer is built when no idle one is
/// left. `release` resets the packer before parking it, so nothing of one
/// call is visible to the next.
#[derive(Debug)]
pub struct PackerPool {
    free: FreeList<Packer>,
    max_frame_size: usize,
    dictionary: Arc<Dictionary>,
    coder: Arc<dyn EntropyCoder>,
}

impl Default for PackerPool {
    fn default() -> Self {
        Self {
            free: FreeList::new(DEFAULT_POOL_IDLE_CAPACITY),
            max_frame_size: DEFAULT_MAX_FRAME_SIZE,
            dictionary: Arc::new(Dictionary::new()),
            coder: Arc::new(HuffmanCoder),
        }
    }
}

impl PackerPool {
    pub fn new(
        max_frame_size: usize,
        dictionary: Arc<Dictionary>,
    ) -> Result<Self, PackerConfigError> {
        validate_max_frame_size(max_frame_size)?;
        validate_dictionary(&dictionary)?;
        Ok(Self {
            max_frame_size,
            dictionary,
            ..Self::default()
        })
    }

    /// A pool handing out packers configured like `template`.
    pub fn from_packer(template: &Packer) -> Self {
        Self {
            max_frame_size: template.max_frame_size,
            dictionary: Arc::clone(&template.dictionary),
            coder: Arc::clone(&template.coder),
            ..Self::default()
        }
    }

    pub fn with_idle_capacity(mut self, max_idle: usize) -> Self {
        self.free = FreeList::new(max_idle);
        self
    }

    pub fn acquire(&self) -> Packer {
        let mut packer = self.free.pop().unwrap_or_default();
        packer.install(
            self.max_frame_size,
            Arc::clone(&self.dictionary),
            Arc::clone(&self.coder),
        );
        packer
    }

    pub fn release(&self, mut packer: Packer) {
        packer.reset();
        if !self.free.push(packer) {
            tracing::trace!("Packer pool full, dropping released packer");
        }
    }

    pub fn idle_len(&self) -> usize {
        self.free.idle_len()
    }

    pub fn dictionary(&self) -> &Arc<Dictionary> {
        &self.dictionary
    }
}
