//! Crate player - solo playback orchestration
//!
//! Coordinates the playing crate, index navigation, shuffle planning, and
//! progress simulation. The player holds no timer and no storage handle:
//! the owning view schedules [`CratePlayer::tick`] and persists
//! [`PlayerSnapshot`] after mutations.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use vinyl_core::types::{format_seconds, Crate, Track};

use crate::{
    error::{PlayerError, Result},
    events::PlayerEvent,
    progress::{PlaybackState, ProgressConfig, ProgressSimulator, TickOutcome},
    shuffle::ShufflePlanner,
};

/// Solo playback surface over a single crate
///
/// Navigation wraps in both directions; shuffled playback repeats one
/// permutation per loop. Progress saturation auto-advances, or pins at 100
/// when the crate has nothing left to play.
pub struct CratePlayer {
    // State
    playing_crate: Option<Crate>,
    current_index: usize,
    minimized: bool,

    // Shuffle plan (None = sequential)
    shuffle: Option<ShufflePlanner>,

    // Simulated transport
    progress: ProgressSimulator,

    // Event queue for UI synchronization
    pending_events: Vec<PlayerEvent>,
}

impl CratePlayer {
    /// Create an idle player
    pub fn new(config: ProgressConfig) -> Self {
        Self {
            playing_crate: None,
            current_index: 0,
            minimized: false,
            shuffle: None,
            progress: ProgressSimulator::new(config),
            pending_events: Vec::new(),
        }
    }

    // ===== Playback Control =====

    /// Start playing `record_crate` from `start_index`
    ///
    /// Replaces any previously playing crate; shuffle resets to sequential.
    pub fn play_crate(&mut self, record_crate: Crate, start_index: usize) -> Result<()> {
        if record_crate.is_empty() {
            return Err(PlayerError::EmptyCrate);
        }
        if start_index >= record_crate.len() {
            return Err(PlayerError::IndexOutOfBounds(start_index));
        }

        debug!(crate_id = %record_crate.id, start_index, "starting crate playback");
        self.emit(PlayerEvent::CrateOpened {
            crate_id: record_crate.id.clone(),
        });

        self.playing_crate = Some(record_crate);
        self.current_index = start_index;
        self.shuffle = None;
        self.progress.start();

        self.emit_track_changed();
        self.emit_state_changed();
        Ok(())
    }

    /// Start or resume playback
    pub fn play(&mut self) -> Result<()> {
        if self.playing_crate.is_none() {
            return Err(PlayerError::NoCrateLoaded);
        }

        match self.progress.state() {
            PlaybackState::Paused => self.progress.resume(),
            PlaybackState::Stopped => self.progress.start(),
            PlaybackState::Playing => return Ok(()),
        }

        self.emit_state_changed();
        Ok(())
    }

    /// Pause playback, freezing progress
    pub fn pause(&mut self) {
        if self.progress.state() == PlaybackState::Playing {
            self.progress.pause();
            self.emit_state_changed();
        }
    }

    /// Toggle between playing and paused
    pub fn toggle(&mut self) -> Result<()> {
        if self.progress.state() == PlaybackState::Playing {
            self.pause();
            Ok(())
        } else {
            self.play()
        }
    }

    /// Skip to the next track (wraps at the end of the crate)
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Result<usize> {
        let index = self.step(true)?;
        self.after_manual_step();
        Ok(index)
    }

    /// Go back to the previous track (wraps at the start)
    pub fn previous(&mut self) -> Result<usize> {
        let index = self.step(false)?;
        self.after_manual_step();
        Ok(index)
    }

    /// Advance one slot in play order
    fn step(&mut self, forward: bool) -> Result<usize> {
        let record_crate = self
            .playing_crate
            .as_ref()
            .ok_or(PlayerError::NoCrateLoaded)?;
        if record_crate.is_empty() {
            return Err(PlayerError::EndOfCrate);
        }

        let len = record_crate.len();
        let index = match self.shuffle.as_mut() {
            Some(planner) => {
                let stepped = if forward {
                    planner.next()
                } else {
                    planner.previous()
                };
                stepped.ok_or(PlayerError::EndOfCrate)?
            }
            None if forward => (self.current_index + 1) % len,
            None => (self.current_index + len - 1) % len,
        };

        self.current_index = index;
        Ok(index)
    }

    /// Manual navigation restarts the new track; a stopped player stays
    /// stopped at position 0.
    fn after_manual_step(&mut self) {
        if self.progress.state() == PlaybackState::Stopped {
            self.progress.stop();
        } else {
            self.progress.restart();
        }
        self.emit_track_changed();
    }

    // ===== Shuffle =====

    /// Enable or disable shuffled playback
    ///
    /// Activation plans a fresh permutation with the current track kept
    /// first; deactivation resumes sequential indexing from the current
    /// track.
    pub fn set_shuffle(&mut self, enabled: bool) {
        if enabled == self.shuffle.is_some() {
            return;
        }

        if enabled {
            let len = self.playing_crate.as_ref().map_or(0, |c| c.len());
            self.shuffle = Some(ShufflePlanner::plan_from(len, self.current_index));
        } else {
            self.shuffle = None;
        }

        self.emit(PlayerEvent::ShuffleChanged { enabled });
    }

    /// Check if shuffle is active
    pub fn is_shuffled(&self) -> bool {
        self.shuffle.is_some()
    }

    // ===== Tick =====

    /// Drive simulated playback one tick
    ///
    /// Saturation advances to the next track in play order; an empty crate
    /// halts with progress pinned at 100.
    pub fn tick(&mut self) -> TickOutcome {
        let outcome = self.progress.tick();

        if outcome == TickOutcome::Saturated {
            match self.step(true) {
                Ok(_) => {
                    self.progress.restart();
                    self.emit_track_changed();
                }
                Err(_) => {
                    debug!("crate exhausted, halting at end");
                    self.progress.halt();
                    self.emit(PlayerEvent::CrateEnded);
                    self.emit_state_changed();
                }
            }
        }

        outcome
    }

    // ===== Minimize / Close =====

    /// Minimize or restore the player chrome
    pub fn set_minimized(&mut self, minimized: bool) {
        if self.minimized != minimized {
            self.minimized = minimized;
            self.emit(PlayerEvent::MinimizedChanged { minimized });
        }
    }

    /// Check if the player is minimized
    pub fn is_minimized(&self) -> bool {
        self.minimized
    }

    /// Close the player, clearing all state
    pub fn close(&mut self) {
        self.playing_crate = None;
        self.current_index = 0;
        self.shuffle = None;
        self.minimized = false;
        self.progress.stop();
        self.emit(PlayerEvent::Closed);
    }

    // ===== State Queries =====

    /// Currently playing track
    pub fn current_track(&self) -> Option<&Track> {
        self.playing_crate
            .as_ref()
            .and_then(|c| c.track_at(self.current_index))
    }

    /// Index of the current track within the crate
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// The crate being played
    pub fn playing_crate(&self) -> Option<&Crate> {
        self.playing_crate.as_ref()
    }

    /// Transport state
    pub fn state(&self) -> PlaybackState {
        self.progress.state()
    }

    /// Simulated position, 0-100
    pub fn progress(&self) -> f32 {
        self.progress.progress()
    }

    /// Elapsed time display for the current position
    ///
    /// A missing track or malformed duration formats as `"0:00"`.
    pub fn position_label(&self) -> String {
        let total = self
            .current_track()
            .map_or(0, |track| track.duration_seconds());
        let elapsed = (total as f64 * f64::from(self.progress.progress()) / 100.0) as u64;
        format_seconds(elapsed)
    }

    /// Duration display for the current track (`"0:00"` when malformed)
    pub fn duration_label(&self) -> String {
        let total = self
            .current_track()
            .map_or(0, |track| track.duration_seconds());
        format_seconds(total)
    }

    // ===== Events =====

    /// Drain queued events
    pub fn take_events(&mut self) -> Vec<PlayerEvent> {
        std::mem::take(&mut self.pending_events)
    }

    fn emit(&mut self, event: PlayerEvent) {
        self.pending_events.push(event);
    }

    fn emit_state_changed(&mut self) {
        let state = self.progress.state();
        self.emit(PlayerEvent::StateChanged { state });
    }

    fn emit_track_changed(&mut self) {
        if let Some(track) = self.current_track() {
            let track_id = track.id.clone();
            let index = self.current_index;
            self.emit(PlayerEvent::TrackChanged { track_id, index });
        }
    }

    // ===== Persistence =====

    /// Capture the persistable player state
    pub fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            current_track: self.current_track().cloned(),
            is_playing: self.progress.is_playing(),
            playing_crate: self.playing_crate.clone(),
            current_track_index: self.current_index,
            is_shuffled: self.shuffle.is_some(),
            shuffled_indices: self
                .shuffle
                .as_ref()
                .map(|p| p.order().to_vec())
                .unwrap_or_default(),
            is_player_minimized: self.minimized,
        }
    }

    /// Rebuild a player from a persisted snapshot
    ///
    /// Any individually corrupt part degrades to its safe default: an
    /// out-of-range index clamps, an invalid permutation is replanned, a
    /// missing crate yields an idle player. Progress itself is not
    /// persisted; a snapshot that was playing resumes from the start of
    /// its track.
    pub fn restore(snapshot: PlayerSnapshot, config: ProgressConfig) -> Self {
        let mut player = Self::new(config);
        player.minimized = snapshot.is_player_minimized;

        let Some(record_crate) = snapshot.playing_crate else {
            return player;
        };
        if record_crate.is_empty() {
            return player;
        }

        let len = record_crate.len();
        let index = snapshot.current_track_index.min(len - 1);

        let shuffle = if snapshot.is_shuffled {
            match ShufflePlanner::restore(snapshot.shuffled_indices, 0) {
                Some(mut planner) if planner.len() == len => {
                    planner.seek_to_index(index);
                    Some(planner)
                }
                _ => {
                    warn!("persisted shuffle order invalid, replanning");
                    Some(ShufflePlanner::plan_from(len, index))
                }
            }
        } else {
            None
        };

        player.playing_crate = Some(record_crate);
        player.current_index = index;
        player.shuffle = shuffle;
        if snapshot.is_playing {
            player.progress.start();
        }
        player
    }
}

impl Default for CratePlayer {
    fn default() -> Self {
        Self::new(ProgressConfig::default())
    }
}

/// Persisted crate-player state
///
/// Field names match the platform's historical storage keys so current
/// snapshots and the legacy per-key layout decode through the same path.
/// Every field defaults independently; one corrupt field never blocks the
/// others.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerSnapshot {
    /// Track under the playback pointer
    #[serde(rename = "currentTrack")]
    pub current_track: Option<Track>,

    /// Whether playback was active
    #[serde(rename = "isPlaying")]
    pub is_playing: bool,

    /// Crate being played
    #[serde(rename = "playingCrate")]
    pub playing_crate: Option<Crate>,

    /// Index of the current track within the crate
    #[serde(rename = "currentTrackIndex")]
    pub current_track_index: usize,

    /// Whether shuffle was active
    #[serde(rename = "isShuffled")]
    pub is_shuffled: bool,

    /// Shuffle permutation (empty when not shuffled)
    #[serde(rename = "shuffledIndices")]
    pub shuffled_indices: Vec<usize>,

    /// Whether the player chrome was minimized
    #[serde(rename = "isPlayerMinimized")]
    pub is_player_minimized: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use vinyl_core::types::{Crate, ListenerId, SourcePlatform};

    fn test_crate(track_count: usize) -> Crate {
        let mut record_crate = Crate::new(ListenerId::new("owner"), "Test Crate");
        for i in 0..track_count {
            record_crate.add_track(Track::new(
                format!("Track {}", i),
                "Artist",
                "3:00",
                SourcePlatform::SoundCloud,
            ));
        }
        record_crate
    }

    #[test]
    fn play_crate_starts_at_index() {
        let mut player = CratePlayer::default();
        player.play_crate(test_crate(3), 1).unwrap();

        assert_eq!(player.current_index(), 1);
        assert_eq!(player.state(), PlaybackState::Playing);
        assert_eq!(player.current_track().unwrap().title, "Track 1");
    }

    #[test]
    fn play_crate_rejects_bad_input() {
        let mut player = CratePlayer::default();
        assert!(matches!(
            player.play_crate(test_crate(0), 0),
            Err(PlayerError::EmptyCrate)
        ));
        assert!(matches!(
            player.play_crate(test_crate(2), 5),
            Err(PlayerError::IndexOutOfBounds(5))
        ));
    }

    #[test]
    fn play_without_crate_fails() {
        let mut player = CratePlayer::default();
        assert!(matches!(player.play(), Err(PlayerError::NoCrateLoaded)));
    }

    #[test]
    fn sequential_navigation_wraps() {
        let mut player = CratePlayer::default();
        player.play_crate(test_crate(3), 2).unwrap();

        assert_eq!(player.next().unwrap(), 0);
        assert_eq!(player.previous().unwrap(), 2);
        assert_eq!(player.previous().unwrap(), 1);
    }

    #[test]
    fn shuffle_keeps_current_track() {
        let mut player = CratePlayer::default();
        player.play_crate(test_crate(5), 2).unwrap();

        player.set_shuffle(true);
        assert!(player.is_shuffled());
        assert_eq!(player.current_index(), 2);
        assert_eq!(player.current_track().unwrap().title, "Track 2");
    }

    #[test]
    fn shuffle_off_resumes_sequential_from_current() {
        let mut player = CratePlayer::default();
        player.play_crate(test_crate(5), 0).unwrap();
        player.set_shuffle(true);
        let landed = player.next().unwrap();

        player.set_shuffle(false);
        assert_eq!(player.next().unwrap(), (landed + 1) % 5);
    }

    #[test]
    fn tick_auto_advances_and_loops() {
        let mut player = CratePlayer::default();
        player.play_crate(test_crate(2), 0).unwrap();

        // Run a full track's worth of ticks
        while player.tick() != TickOutcome::Saturated {}
        assert_eq!(player.current_index(), 1);
        assert!(player.state() == PlaybackState::Playing);
        assert_eq!(player.progress(), 0.0);

        while player.tick() != TickOutcome::Saturated {}
        assert_eq!(player.current_index(), 0); // wrapped
    }

    #[test]
    fn pause_freezes_progress_across_toggle() {
        let mut player = CratePlayer::default();
        player.play_crate(test_crate(1), 0).unwrap();
        player.tick();
        player.tick();
        let frozen = player.progress();

        player.pause();
        assert_eq!(player.tick(), TickOutcome::Idle);
        assert_eq!(player.progress(), frozen);

        player.toggle().unwrap();
        player.tick();
        assert!(player.progress() > frozen);
    }

    #[test]
    fn position_label_handles_malformed_duration() {
        let mut record_crate = Crate::new(ListenerId::new("owner"), "Broken");
        record_crate.add_track(Track::new(
            "No Duration",
            "Artist",
            "??",
            SourcePlatform::YouTube,
        ));

        let mut player = CratePlayer::default();
        player.play_crate(record_crate, 0).unwrap();
        for _ in 0..50 {
            player.tick();
        }

        assert_eq!(player.position_label(), "0:00");
        assert_eq!(player.duration_label(), "0:00");
    }

    #[test]
    fn close_clears_state() {
        let mut player = CratePlayer::default();
        player.play_crate(test_crate(3), 1).unwrap();
        player.set_minimized(true);
        player.close();

        assert!(player.playing_crate().is_none());
        assert!(player.current_track().is_none());
        assert!(!player.is_minimized());
        assert_eq!(player.state(), PlaybackState::Stopped);

        let snapshot = player.snapshot();
        assert_eq!(snapshot, PlayerSnapshot::default());
    }

    #[test]
    fn snapshot_restore_round_trip() {
        let mut player = CratePlayer::default();
        player.play_crate(test_crate(4), 2).unwrap();
        player.set_shuffle(true);
        player.set_minimized(true);

        let snapshot = player.snapshot();
        let restored = CratePlayer::restore(snapshot.clone(), ProgressConfig::default());

        assert_eq!(restored.snapshot(), snapshot);
        assert_eq!(restored.current_index(), 2);
        assert!(restored.is_shuffled());
        assert!(restored.is_minimized());
        assert_eq!(restored.state(), PlaybackState::Playing);
    }

    #[test]
    fn restore_clamps_out_of_range_index() {
        let mut player = CratePlayer::default();
        player.play_crate(test_crate(3), 0).unwrap();

        let mut snapshot = player.snapshot();
        snapshot.current_track_index = 99;

        let restored = CratePlayer::restore(snapshot, ProgressConfig::default());
        assert_eq!(restored.current_index(), 2);
    }

    #[test]
    fn restore_replans_invalid_shuffle_order() {
        let mut player = CratePlayer::default();
        player.play_crate(test_crate(3), 1).unwrap();
        player.set_shuffle(true);

        let mut snapshot = player.snapshot();
        snapshot.shuffled_indices = vec![0, 0, 7];

        let restored = CratePlayer::restore(snapshot, ProgressConfig::default());
        assert!(restored.is_shuffled());
        assert_eq!(restored.current_index(), 1);
    }

    #[test]
    fn events_reported_in_order() {
        let mut player = CratePlayer::default();
        player.play_crate(test_crate(2), 0).unwrap();
        let events = player.take_events();

        assert!(matches!(events[0], PlayerEvent::CrateOpened { .. }));
        assert!(matches!(events[1], PlayerEvent::TrackChanged { index: 0, .. }));
        assert!(matches!(
            events[2],
            PlayerEvent::StateChanged {
                state: PlaybackState::Playing
            }
        ));

        // Drained
        assert!(player.take_events().is_empty());
    }
}
