use std::collections::VecDeque;
use crate::models::action::LoggedAction;

pub const DEFAULT_CAPACITY: usize = 10;

/// Fixed-capacity, newest-first history of completed actions.
#[derive(Debug, Clone)]
pub struct ActionLog {
    entries: VecDeque<LoggedAction>,
    capacity: usize,
}

impl Default for ActionLog {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl ActionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Pushes to the front. Returns the oldest entry if it had to make room.
    pub fn push(&mut self, action: LoggedAction) -> Option<LoggedAction> {
        self.entries.push_front(action);
        if self.entries.len() > self.capacity {
            self.entries.pop_back()
        } else {
            None
        }
    }

    pub fn pop_newest(&mut self) -> Option<LoggedAction> {
        self.entries.pop_front()
    }

    pub fn peek_newest(&self) -> Option<&LoggedAction> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Newest first.
    pub fn iter(&self) -> impl Iterator<Item = &LoggedAction> {
        self.entries.iter()
    }

    pub fn snapshot(&self) -> Vec<LoggedAction> {
        self.entries.iter().cloned().collect()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
