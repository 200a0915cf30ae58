use crate::core::log::Log;
use crate::stores::traits::LogStore;
use std::collections::VecDeque;

/// In-memory store keeping the newest `capacity` logs.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    entries: VecDeque<Log>,
    capacity: usize,
}

impl MemoryStore {
    /// Creates a store. A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity.min(1024)),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub(crate) fn push(&mut self, log: Log) -> Option<Log> {
        let evicted = if self.entries.len() >= self.capacity {
            self.entries.pop_front()
        } else {
            None
        };
        self.entries.push_back(log);
        evicted
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new(1000)
    }
}

impl LogStore for MemoryStore {
    fn add(&mut self, log: Log) {
        self.push(log);
    }

    fn logs(&self) -> Vec<Log> {
        self.entries.iter().cloned().collect()
    }

    fn clear(&mut self) {
        self.entries.clear();
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
