//! Played-entry history
//!
//! Bounded record of what the session already played, for "previous
//! track" navigation. A ring buffer that discards oldest entries.

use crate::types::QueueEntry;
use std::collections::VecDeque;

/// Default number of played entries retained
const DEFAULT_MAX_SIZE: usize = 50;

/// Bounded playback history (most recent = back)
#[derive(Debug)]
pub struct History {
    entries: VecDeque<QueueEntry>,
    max_size: usize,
}

impl History {
    /// Create history with a maximum size
    pub fn new(max_size: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(max_size),
            max_size,
        }
    }

    /// Add a played entry; the oldest is discarded when full
    pub fn push(&mut self, entry: QueueEntry) {
        if self.entries.len() >= self.max_size {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    /// Pop the most recently played entry
    pub fn pop(&mut self) -> Option<QueueEntry> {
        self.entries.pop_back()
    }

    /// All played entries, oldest first
    pub fn entries(&self) -> impl Iterator<Item = &QueueEntry> {
        self.entries.iter()
    }

    /// Number of retained entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing has been played
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Forget all played entries
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SIZE)
    }
}
