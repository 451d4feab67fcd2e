//! Bounded deque for buffering events with FIFO eviction

use std::collections::VecDeque;

/// A fixed-capacity deque that evicts the oldest item when full
#[derive(Clone, Debug)]
pub struct BoundedDeque<T> {
    cap: usize,
    buf: VecDeque<T>,
}

impl<T> BoundedDeque<T> {
    /// Create a new bounded deque; capacity 0 makes push a no-op
    pub fn new(cap: usize) -> Self {
        Self {
            cap,
            buf: VecDeque::with_capacity(cap.min(1024)),
        }
    }

    /// Push a new value, evicting the oldest if at capacity
    pub fn push(&mut self, value: T) {
        if self.cap == 0 {
            return;
        }
        if self.buf.len() == self.cap {
            self.buf.pop_front();
        }
        self.buf.push_back(value);
    }

    /// Remove and yield all items, oldest first
    pub fn drain(&mut self) -> impl Iterator<Item = T> + '_ {
        self.buf.drain(..)
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eviction_keeps_newest() {
        let mut deque = BoundedDeque::new(3);
        for i in 1..=4 {
            deque.push(i);
        }
        assert_eq!(deque.drain().collect::<Vec<_>>(), vec![2, 3, 4]);
    }

    #[test]
    fn test_zero_capacity() {
        let mut deque = BoundedDeque::new(0);
        deque.push(1);
        assert!(deque.is_empty());
    }
}
