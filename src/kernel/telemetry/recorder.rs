use super::event::ActionLogEntry;
use super::metrics::{compute_snapshot, ActionLogSnapshot};
use crate::intent::types::IntentCategory;
use std::collections::VecDeque;

pub const DEFAULT_CAPACITY: usize = 50;

/// Bounded ring buffer of recent outcomes. The oldest entry is evicted first.
#[derive(Debug)]
pub struct ActionLog {
    buffer: VecDeque<ActionLogEntry>,
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
            buffer: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn record(&mut self, entry: ActionLogEntry) {
        if self.buffer.len() >= self.capacity {
            self.buffer.pop_front();
        }
        self.buffer.push_back(entry);
    }

    pub fn append(&mut self, description: impl Into<String>, success: bool, category: Option<IntentCategory>) {
        self.record(ActionLogEntry::new(description, success, category));
    }

    pub fn entries(&self) -> impl Iterator<Item = &ActionLogEntry> {
        self.buffer.iter()
    }

    pub fn last(&self) -> Option<&ActionLogEntry> {
        self.buffer.back()
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn snapshot(&self) -> ActionLogSnapshot {
        compute_snapshot(&self.buffer)
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }
}
