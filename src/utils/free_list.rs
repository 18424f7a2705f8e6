use std::sync::{Mutex, PoisonError};

/// A bounded stack of idle instances shared by the pools of this crate.
///
/// Ownership moves out on `pop` and back in on `push`; nothing is ever
/// handed out twice. Once `max_idle` instances are parked, further pushes
/// drop the instance instead.
#[derive(Debug)]
pub struct FreeList<T> {
    idle: Mutex<Vec<T>>,
    max_idle: usize,
}

impl<T> FreeList<T> {
    pub fn new(max_idle: usize) -> Self {
        Self {
            idle: Mutex::new(Vec::new()),
            max_idle,
        }
    }

    /// Takes an idle instance, if any. Never blocks on an empty list.
    pub fn pop(&self) -> Option<T> {
        self.idle
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop()
    }

    /// Parks `item` for reuse. Returns `false` if the list was full and the
    /// item was dropped.
    pub fn push(&self, item: T) -> bool {
        let mut idle = self.idle.lock().unwrap_or_else(PoisonError::into_inner);
        if idle.len() >= self.max_idle {
            return false;
        }
        idle.push(item);
        true
    }

    /// Number of parked instances.
    pub fn idle_len(&self) -> usize {
        self.idle
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn max_idle(&self) -> usize {
        self.max_idle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_what_was_pushed() {
        let list = FreeList::new(4);
        assert_eq!(list.pop(), None::<u32>);
        assert!(list.push(7));
        assert_eq!(list.idle_len(), 1);
        assert_eq!(list.pop(), Some(7));
        assert_eq!(list.idle_len(), 0);
    }

    #[test]
    fn drops_beyond_capacity() {
        let list = FreeList::new(1);
        assert_eq!(list.max_idle(), 1);
        assert!(list.push(1));
        assert!(!list.push(2));
        assert_eq!(list.idle_len(), 1);
    }
}
