//! Session queue
//!
//! Ordered upcoming entries for a session. Advancing takes the first
//! `Ready` entry; entries still buffering (or failed) keep their position
//! so a later-ready entry is not lost or reordered.

use crate::types::{EntryStatus, QueueEntry};
use vinyl_core::types::EntryId;

/// Ordered upcoming entries
#[derive(Debug, Default)]
pub struct SessionQueue {
    entries: Vec<QueueEntry>,
}

impl SessionQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry to the end of the queue
    pub fn push(&mut self, entry: QueueEntry) {
        self.entries.push(entry);
    }

    /// Put an entry back at the front (for "previous track")
    pub fn push_front(&mut self, entry: QueueEntry) {
        self.entries.insert(0, entry);
    }

    /// Remove and return the first `Ready` entry
    ///
    /// Non-ready entries ahead of it are skipped over in place.
    pub fn pop_first_ready(&mut self) -> Option<QueueEntry> {
        let position = self
            .entries
            .iter()
            .position(|entry| entry.status == EntryStatus::Ready)?;
        Some(self.entries.remove(position))
    }

    /// Remove the entry with `entry_id`
    pub fn remove(&mut self, entry_id: &EntryId) -> Option<QueueEntry> {
        let position = self.entries.iter().position(|entry| &entry.id == entry_id)?;
        Some(self.entries.remove(position))
    }

    /// Entry lookup by id
    pub fn get(&self, entry_id: &EntryId) -> Option<&QueueEntry> {
        self.entries.iter().find(|entry| &entry.id == entry_id)
    }

    /// Mutable entry lookup by id
    pub fn get_mut(&mut self, entry_id: &EntryId) -> Option<&mut QueueEntry> {
        self.entries.iter_mut().find(|entry| &entry.id == entry_id)
    }

    /// All entries in queue order
    pub fn entries(&self) -> &[QueueEntry] {
        &self.entries
    }

    /// Number of queued entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the queue is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
