//! Track voting
//!
//! One vote per listener per entry. A second vote from the same listener
//! on the same entry is rejected, never toggled or replaced.

use std::collections::HashMap;
use vinyl_core::types::{EntryId, ListenerId};

use crate::error::{Result, SessionError};
use crate::types::{VoteDirection, VoteTally};

/// Vote records for all entries in a session
#[derive(Debug, Default)]
pub struct VoteEngine {
    /// entry -> listener -> vote direction
    votes: HashMap<EntryId, HashMap<ListenerId, VoteDirection>>,
}

impl VoteEngine {
    /// Create an engine with no recorded votes
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a vote
    ///
    /// Fails with [`SessionError::AlreadyVoted`] if this listener already
    /// voted on this entry, leaving the prior vote intact.
    pub fn cast(
        &mut self,
        entry_id: &EntryId,
        listener: &ListenerId,
        direction: VoteDirection,
    ) -> Result<()> {
        let entry_votes = self.votes.entry(entry_id.clone()).or_default();
        if entry_votes.contains_key(listener) {
            return Err(SessionError::AlreadyVoted);
        }
        entry_votes.insert(listener.clone(), direction);
        Ok(())
    }

    /// Aggregate counts for an entry
    pub fn tally(&self, entry_id: &EntryId) -> VoteTally {
        let mut tally = VoteTally::default();
        if let Some(entry_votes) = self.votes.get(entry_id) {
            for direction in entry_votes.values() {
                match direction {
                    VoteDirection::Up => tally.up += 1,
                    VoteDirection::Down => tally.down += 1,
                }
            }
        }
        tally
    }

    /// The vote a listener cast on an entry, if any
    pub fn vote_of(&self, entry_id: &EntryId, listener: &ListenerId) -> Option<VoteDirection> {
        self.votes.get(entry_id)?.get(listener).copied()
    }

    /// Drop all records for an entry that left the queue
    pub fn forget_entry(&mut self, entry_id: &EntryId) {
        self.votes.remove(entry_id);
    }

    /// Drop every record
    pub fn clear(&mut self) {
        self.votes.clear();
    }
}
