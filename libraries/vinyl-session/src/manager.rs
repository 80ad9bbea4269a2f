//! Session manager - collaborative playback orchestration
//!
//! Owns the authoritative "now playing" pointer for a live session and
//! composes the queue, vote engine, skip policy, and cooldown policy
//! behind one mutation API. The owning view drives [`SessionManager::tick`]
//! on its scheduler and drains events after each call.

use std::collections::HashSet;
use std::rc::Rc;
use std::time::Duration;
use tracing::debug;

use vinyl_core::clock::{Clock, SystemClock};
use vinyl_core::types::{EntryId, ListenerId, Track};
use vinyl_playback::{PlaybackState, ProgressConfig, ProgressSimulator, TickOutcome};

use crate::{
    cooldown::TrackCooldownPolicy,
    error::{Result, SessionError},
    events::{SessionEvent, SkipReason},
    history::History,
    queue::SessionQueue,
    skip::SkipThresholdPolicy,
    types::{EntryStatus, QueueEntry, QueuePermission, SessionConfig, VoteDirection, VoteTally},
    vote::VoteEngine,
};

/// Collaborative playback surface for one session
///
/// All mutations are synchronous with the calling event. Per-track state
/// (votes, skip votes) resets on every advance; the cooldown map lives for
/// the whole session.
pub struct SessionManager {
    // Configuration
    config: SessionConfig,
    host: ListenerId,
    listener_count: u32,
    followers: HashSet<ListenerId>,

    // Now playing + queue + history
    current: Option<QueueEntry>,
    queue: SessionQueue,
    history: History,

    // Policies
    votes: VoteEngine,
    skip_policy: SkipThresholdPolicy,
    cooldown: TrackCooldownPolicy,
    skip_votes: HashSet<ListenerId>,

    // Simulated transport
    progress: ProgressSimulator,
    clock: Rc<dyn Clock>,

    // Event queue for UI synchronization
    pending_events: Vec<SessionEvent>,
}

impl SessionManager {
    /// Create a session with the system clock
    pub fn new(config: SessionConfig, host: ListenerId) -> Self {
        Self::with_clock(config, host, Rc::new(SystemClock::new()))
    }

    /// Create a session with an injected clock
    pub fn with_clock(config: SessionConfig, host: ListenerId, clock: Rc<dyn Clock>) -> Self {
        let skip_policy = SkipThresholdPolicy::from_percent(config.auto_skip_threshold);
        Self {
            config,
            host,
            listener_count: 1,
            followers: HashSet::new(),
            current: None,
            queue: SessionQueue::new(),
            history: History::default(),
            votes: VoteEngine::new(),
            skip_policy,
            cooldown: TrackCooldownPolicy::new(),
            skip_votes: HashSet::new(),
            progress: ProgressSimulator::default(),
            clock,
            pending_events: Vec::new(),
        }
    }

    /// Override the progress cadence
    pub fn with_progress_config(mut self, config: ProgressConfig) -> Self {
        self.progress = ProgressSimulator::new(config);
        self
    }

    // ===== Queue Mutation =====

    /// Queue a track for the session
    ///
    /// Rejected with [`SessionError::PermissionDenied`] when the config
    /// restricts queue adds, or [`SessionError::CooldownActive`] when the
    /// submitter added too recently. A successful add resets the
    /// submitter's cooldown timer.
    pub fn add_track(&mut self, track: Track, submitter: &ListenerId) -> Result<EntryId> {
        self.check_queue_permission(submitter)?;

        let now = self.clock.now();
        let cooldown = Duration::from_secs(self.config.cooldown_seconds);
        self.cooldown.check(submitter, cooldown, now)?;

        let entry = QueueEntry::new(track, submitter.clone(), now);
        let entry_id = entry.id.clone();
        debug!(entry_id = %entry_id, submitter = %submitter, "track queued");
        self.emit(SessionEvent::EntryAdded {
            entry_id: entry_id.clone(),
            track_id: entry.track.id.clone(),
            submitted_by: submitter.clone(),
        });
        self.queue.push(entry);
        self.cooldown.record(submitter, now);
        Ok(entry_id)
    }

    fn check_queue_permission(&self, submitter: &ListenerId) -> Result<()> {
        if submitter == &self.host {
            return Ok(());
        }
        match self.config.queue_permission {
            QueuePermission::Anyone => Ok(()),
            QueuePermission::Followers if self.followers.contains(submitter) => Ok(()),
            QueuePermission::Followers => Err(SessionError::PermissionDenied(
                "only followers can add tracks".to_string(),
            )),
            QueuePermission::HostOnly => Err(SessionError::PermissionDenied(
                "only the host can add tracks".to_string(),
            )),
        }
    }

    /// Remove an entry from the session
    ///
    /// Host or original submitter only. Removing the current entry
    /// advances playback; the removed entry does not enter history.
    pub fn remove_entry(&mut self, entry_id: &EntryId, requester: &ListenerId) -> Result<QueueEntry> {
        if self.current.as_ref().is_some_and(|entry| &entry.id == entry_id) {
            let removed = self
                .current
                .take()
                .ok_or_else(|| SessionError::EntryNotFound(entry_id.clone()))?;
            if requester != &self.host && requester != &removed.submitted_by {
                self.current = Some(removed);
                return Err(SessionError::PermissionDenied(
                    "only the host or the submitter can remove a track".to_string(),
                ));
            }

            self.votes.forget_entry(&removed.id);
            self.skip_votes.clear();
            self.emit(SessionEvent::EntryRemoved {
                entry_id: removed.id.clone(),
            });
            if self.advance().is_err() {
                self.progress.stop();
                self.emit(SessionEvent::QueueExhausted);
            }
            return Ok(removed);
        }

        let entry = self
            .queue
            .get(entry_id)
            .ok_or_else(|| SessionError::EntryNotFound(entry_id.clone()))?;
        if requester != &self.host && requester != &entry.submitted_by {
            return Err(SessionError::PermissionDenied(
                "only the host or the submitter can remove a track".to_string(),
            ));
        }

        let removed = self
            .queue
            .remove(entry_id)
            .ok_or_else(|| SessionError::EntryNotFound(entry_id.clone()))?;
        self.votes.forget_entry(entry_id);
        self.emit(SessionEvent::EntryRemoved {
            entry_id: removed.id.clone(),
        });
        Ok(removed)
    }

    /// Update an entry's readiness (from the track resolution service)
    pub fn set_entry_status(&mut self, entry_id: &EntryId, status: EntryStatus) -> Result<()> {
        if let Some(entry) = self.queue.get_mut(entry_id) {
            entry.status = status;
            return Ok(());
        }
        if let Some(entry) = self.current.as_mut() {
            if &entry.id == entry_id {
                entry.status = status;
                return Ok(());
            }
        }
        Err(SessionError::EntryNotFound(entry_id.clone()))
    }

    // ===== Advance =====

    /// Move the pointer to the next ready entry
    ///
    /// The previous current entry goes to history; per-track vote and
    /// skip-vote state resets. With no ready entry this is a no-op
    /// returning [`SessionError::QueueExhausted`] - history untouched,
    /// caller re-polls once the queue refills.
    pub fn advance(&mut self) -> Result<()> {
        let next = self
            .queue
            .pop_first_ready()
            .ok_or(SessionError::QueueExhausted)?;

        self.finish_current();

        let entry_id = next.id.clone();
        let track_id = next.track.id.clone();
        self.current = Some(next);
        self.progress.restart();
        self.emit(SessionEvent::TrackChanged { entry_id, track_id });
        Ok(())
    }

    /// Retire the current entry to history and reset per-track state
    fn finish_current(&mut self) {
        if let Some(previous) = self.current.take() {
            self.votes.forget_entry(&previous.id);
            self.history.push(previous);
        }
        self.skip_votes.clear();
    }

    /// Return to the most recently played entry
    ///
    /// The interrupted current entry goes back to the front of the queue
    /// with a clean vote slate.
    pub fn previous(&mut self) -> Result<()> {
        let mut restored = self.history.pop().ok_or(SessionError::HistoryEmpty)?;

        if let Some(mut current) = self.current.take() {
            self.votes.forget_entry(&current.id);
            current.votes = VoteTally::default();
            self.queue.push_front(current);
        }
        self.skip_votes.clear();

        restored.votes = VoteTally::default();
        let entry_id = restored.id.clone();
        let track_id = restored.track.id.clone();
        self.current = Some(restored);
        self.progress.restart();
        self.emit(SessionEvent::TrackChanged { entry_id, track_id });
        Ok(())
    }

    // ===== Voting =====

    /// Vote on an entry
    ///
    /// One vote per listener per entry. If the vote pushes the current
    /// entry's downvotes over the skip threshold, playback advances as a
    /// side effect.
    pub fn vote(
        &mut self,
        entry_id: &EntryId,
        listener: &ListenerId,
        direction: VoteDirection,
    ) -> Result<()> {
        let is_current = self.current.as_ref().is_some_and(|entry| &entry.id == entry_id);
        if !is_current && self.queue.get(entry_id).is_none() {
            return Err(SessionError::EntryNotFound(entry_id.clone()));
        }

        self.votes.cast(entry_id, listener, direction)?;
        let tally = self.votes.tally(entry_id);

        if is_current {
            if let Some(entry) = self.current.as_mut() {
                entry.votes = tally;
            }
        } else if let Some(entry) = self.queue.get_mut(entry_id) {
            entry.votes = tally;
        }

        self.emit(SessionEvent::VoteRecorded {
            entry_id: entry_id.clone(),
            tally,
        });

        if is_current && self.skip_policy.should_skip(tally.down, self.listener_count) {
            self.skip_current(SkipReason::Downvotes);
        }
        Ok(())
    }

    /// Cast an explicit skip vote against the current track
    ///
    /// One skip vote per listener per track; the tally resets on every
    /// advance. Reaching the listener quorum advances playback.
    pub fn skip_vote(&mut self, listener: &ListenerId) -> Result<()> {
        if self.current.is_none() {
            return Err(SessionError::NothingPlaying);
        }
        if !self.skip_votes.insert(listener.clone()) {
            return Err(SessionError::AlreadyVoted);
        }

        let count = self.skip_votes.len() as u32;
        let threshold = self.skip_policy.threshold(self.listener_count);
        self.emit(SessionEvent::SkipVoteRecorded { count, threshold });

        if count >= threshold {
            self.skip_current(SkipReason::SkipVotes);
        }
        Ok(())
    }

    /// Force-advance past the current entry after a threshold crossing
    fn skip_current(&mut self, reason: SkipReason) {
        let Some(entry_id) = self.current.as_ref().map(|entry| entry.id.clone()) else {
            return;
        };

        let has_ready = self
            .queue
            .entries()
            .iter()
            .any(|entry| entry.status == EntryStatus::Ready);
        if has_ready {
            debug!(entry_id = %entry_id, ?reason, "auto-skipping current track");
            self.emit(SessionEvent::TrackSkipped { entry_id, reason });
            let _ = self.advance();
        } else {
            // Nowhere to go; the track plays out (advance is a no-op when
            // the queue is exhausted)
            self.emit(SessionEvent::QueueExhausted);
        }
    }

    // ===== Listeners =====

    /// Update the live listener count
    ///
    /// Skip thresholds are derived from this count, so the current track
    /// is re-evaluated immediately - a shrinking room can trigger a skip.
    pub fn set_listener_count(&mut self, count: u32) {
        if self.listener_count == count {
            return;
        }
        self.listener_count = count;
        self.emit(SessionEvent::ListenerCountChanged { count });
        self.reevaluate_current();
    }

    fn reevaluate_current(&mut self) {
        if self.current.is_none() {
            return;
        }
        let skip_count = self.skip_votes.len() as u32;
        let downvotes = self
            .current
            .as_ref()
            .map_or(0, |entry| self.votes.tally(&entry.id).down);

        if self.skip_policy.should_skip(skip_count, self.listener_count) {
            self.skip_current(SkipReason::SkipVotes);
        } else if self.skip_policy.should_skip(downvotes, self.listener_count) {
            self.skip_current(SkipReason::Downvotes);
        }
    }

    /// Mark a listener as a follower of the host
    pub fn add_follower(&mut self, listener: ListenerId) {
        self.followers.insert(listener);
    }

    /// Unmark a follower
    pub fn remove_follower(&mut self, listener: &ListenerId) {
        self.followers.remove(listener);
    }

    // ===== Transport =====

    /// Start or resume session playback
    pub fn play(&mut self) -> Result<()> {
        if self.current.is_none() {
            return self.advance();
        }
        match self.progress.state() {
            PlaybackState::Paused => self.progress.resume(),
            PlaybackState::Stopped => self.progress.restart(),
            PlaybackState::Playing => {}
        }
        Ok(())
    }

    /// Pause session playback, freezing progress
    pub fn pause(&mut self) {
        self.progress.pause();
    }

    /// Drive simulated playback one tick
    ///
    /// Saturation advances to the next ready entry; an exhausted queue
    /// halts at 100 with the finished track still current until the
    /// caller re-polls [`SessionManager::advance`].
    pub fn tick(&mut self) -> TickOutcome {
        let outcome = self.progress.tick();

        if outcome == TickOutcome::Saturated && self.advance().is_err() {
            debug!("queue exhausted, halting at end of track");
            self.progress.halt();
            self.emit(SessionEvent::QueueExhausted);
        }

        outcome
    }

    // ===== State Queries =====

    /// The entry currently playing
    pub fn current_entry(&self) -> Option<&QueueEntry> {
        self.current.as_ref()
    }

    /// Upcoming entries in queue order
    pub fn upcoming(&self) -> &[QueueEntry] {
        self.queue.entries()
    }

    /// Played entries, oldest first
    pub fn played(&self) -> impl Iterator<Item = &QueueEntry> {
        self.history.entries()
    }

    /// Live listener count
    pub fn listener_count(&self) -> u32 {
        self.listener_count
    }

    /// Skip votes against the current track
    pub fn skip_vote_count(&self) -> u32 {
        self.skip_votes.len() as u32
    }

    /// Skip votes required at the current listener count
    pub fn skip_threshold(&self) -> u32 {
        self.skip_policy.threshold(self.listener_count)
    }

    /// Session configuration
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Session host
    pub fn host(&self) -> &ListenerId {
        &self.host
    }

    /// Transport state
    pub fn state(&self) -> PlaybackState {
        self.progress.state()
    }

    /// Simulated position of the current track, 0-100
    pub fn progress(&self) -> f32 {
        self.progress.progress()
    }

    // ===== Events =====

    /// Drain queued events
    pub fn take_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.pending_events)
    }

    fn emit(&mut self, event: SessionEvent) {
        self.pending_events.push(event);
    }
}
