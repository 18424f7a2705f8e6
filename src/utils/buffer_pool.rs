use crate::constants::{DEFAULT_POOL_IDLE_CAPACITY, MAX_POOLED_BUFFER_CAPACITY};
use crate::utils::FreeList;

/// Reusable byte buffers for frame I/O.
///
/// `borrow` hands out an empty buffer with at least the requested
/// capacity, `give_back` clears it and keeps it for the next caller, and
/// `discard` drops a buffer that should not be reused (for example one that
/// held rejected input).
#[derive(Debug)]
pub struct BufferPool {
    free: FreeList<Vec<u8>>,
    max_buffer_capacity: usize,
}

impl Default for BufferPool {
    fn default() -> Self {
        Self::new(DEFAULT_POOL_IDLE_CAPACITY, MAX_POOLED_BUFFER_CAPACITY)
    }
}

impl BufferPool {
    pub fn new(max_idle: usize, max_buffer_capacity: usize) -> Self {
        Self {
            free: FreeList::new(max_idle),
            max_buffer_capacity,
        }
    }

    pub fn borrow(&self, min_capacity: usize) -> Vec<u8> {
        let mut buf = self.free.pop().unwrap_or_default();
        buf.reserve(min_capacity);
        buf
    }

    /// Returns a buffer to the pool. Buffers that grew beyond the pool's
    /// capacity limit are dropped.
    pub fn give_back(&self, mut buf: Vec<u8>) {
        if buf.capacity() > self.max_buffer_capacity {
            return;
        }
        buf.clear();
        self.free.push(buf);
    }

    pub fn discard(&self, buf: Vec<u8>) {
        drop(buf);
    }

    pub fn idle_len(&self) -> usize {
        self.free.idle_len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn returned_buffers_come_back_empty() {
        let pool = BufferPool::default();
        let mut buf = pool.borrow(16);
        assert!(buf.capacity() >= 16);
        buf.extend_from_slice(b"leftover");
        pool.give_back(buf);

        let buf = pool.borrow(0);
        assert!(buf.is_empty());
        assert!(buf.capacity() >= 16);
    }

    #[test]
    fn oversized_and_discarded_buffers_are_not_kept() {
        let pool = BufferPool::new(4, 32);
        pool.give_back(Vec::with_capacity(64));
        assert_eq!(pool.idle_len(), 0);

        let buf = pool.borrow(8);
        pool.discard(buf);
        assert_eq!(pool.idle_len(), 0);
    }
}
