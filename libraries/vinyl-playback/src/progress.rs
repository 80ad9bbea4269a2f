//! Playback progress simulation
//!
//! The engine does not touch audio hardware; playback position is a 0-100
//! value advanced on a fixed tick. The simulator never owns a timer - the
//! caller's scheduler invokes [`ProgressSimulator::tick`] at
//! [`ProgressConfig::tick_interval`], which keeps progress deterministic
//! under test and guarantees a surface's timer dies with the surface.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Progress saturates at this value
const PROGRESS_MAX: f32 = 100.0;

/// Tick cadence and step size for simulated playback
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressConfig {
    /// How often the owning surface should call `tick` (default: 300ms)
    pub tick_interval: Duration,

    /// Progress added per tick (default: 0.5)
    pub step: f32,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(300),
            step: 0.5,
        }
    }
}

/// Transport state of a playback surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackState {
    /// Nothing playing
    Stopped,

    /// Progress advances each tick
    Playing,

    /// Progress frozen, resumable
    Paused,
}

/// Result of a single tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// Not playing; nothing changed
    Idle,

    /// Progress advanced to the contained value
    Advanced(f32),

    /// Progress reached 100; the owner must advance or halt
    Saturated,
}

/// Tick-driven playback position state machine
///
/// `stopped -> playing -> stopped`, with `paused` freezing the position.
/// On saturation the owner either advances to the next track and calls
/// [`ProgressSimulator::restart`], or calls [`ProgressSimulator::halt`]
/// to pin the position at 100 when nothing follows.
#[derive(Debug, Clone)]
pub struct ProgressSimulator {
    config: ProgressConfig,
    state: PlaybackState,
    progress: f32,
}

impl ProgressSimulator {
    /// Create a stopped simulator
    pub fn new(config: ProgressConfig) -> Self {
        Self {
            config,
            state: PlaybackState::Stopped,
            progress: 0.0,
        }
    }

    /// Begin playing from the start of a track
    pub fn start(&mut self) {
        self.state = PlaybackState::Playing;
        self.progress = 0.0;
    }

    /// Freeze progress without resetting it
    pub fn pause(&mut self) {
        if self.state == PlaybackState::Playing {
            self.state = PlaybackState::Paused;
        }
    }

    /// Continue from the frozen position
    pub fn resume(&mut self) {
        if self.state == PlaybackState::Paused {
            self.state = PlaybackState::Playing;
        }
    }

    /// Stop and reset progress
    pub fn stop(&mut self) {
        self.state = PlaybackState::Stopped;
        self.progress = 0.0;
    }

    /// Reset progress for the next track while staying in playing state
    pub fn restart(&mut self) {
        self.progress = 0.0;
        self.state = PlaybackState::Playing;
    }

    /// Pin progress at 100 and stop; used when no next track exists
    pub fn halt(&mut self) {
        self.progress = PROGRESS_MAX;
        self.state = PlaybackState::Stopped;
    }

    /// Advance one tick
    pub fn tick(&mut self) -> TickOutcome {
        if self.state != PlaybackState::Playing {
            return TickOutcome::Idle;
        }

        self.progress = (self.progress + self.config.step).min(PROGRESS_MAX);

        if self.progress >= PROGRESS_MAX {
            TickOutcome::Saturated
        } else {
            TickOutcome::Advanced(self.progress)
        }
    }

    /// Current position, 0-100
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Current transport state
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Check if progress is advancing
    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    /// Tick cadence the owning surface should schedule at
    pub fn tick_interval(&self) -> Duration {
        self.config.tick_interval
    }
}

impl Default for ProgressSimulator {
    fn default() -> Self {
        Self::new(ProgressConfig::default())
    }
}
