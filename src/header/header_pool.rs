use crate::constants::DEFAULT_POOL_IDLE_CAPACITY;
use crate::header::Header;
use crate::utils::FreeList;

/// Reusable headers, one per in-flight call.
#[derive(Debug)]
pub struct HeaderPool {
    free: FreeList<Header>,
}

impl Default for HeaderPool {
    fn default() -> Self {
        Self::new(DEFAULT_POOL_IDLE_CAPACITY)
    }
}

impl HeaderPool {
    pub fn new(max_idle: usize) -> Self {
        Self {
            free: FreeList::new(max_idle),
        }
    }

    /// An empty header. Never blocks.
    pub fn acquire(&self) -> Header {
        self.free.pop().unwrap_or_default()
    }

    /// Resets `header` and keeps it for a later call.
    pub fn release(&self, mut header: Header) {
        header.reset();
        if !self.free.push(header) {
            tracing::trace!("Header pool full, dropping released header");
        }
    }

    pub fn idle_len(&self) -> usize {
        self.free.idle_len()
    }
}
