//! Per-submitter add cooldown
//!
//! Rate-limits how often a listener may queue a track. Timestamps come
//! from the injected engine clock, so checks are pure and deterministic.

use std::collections::HashMap;
use std::time::Duration;
use vinyl_core::types::ListenerId;

use crate::error::{Result, SessionError};

/// Last-add timestamps per submitter
#[derive(Debug, Default)]
pub struct TrackCooldownPolicy {
    last_add: HashMap<ListenerId, Duration>,
}

impl TrackCooldownPolicy {
    /// Create a policy with no recorded adds
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether `submitter` may add at engine time `now`
    ///
    /// Passes when `cooldown` is zero, the submitter has never added, or
    /// at least `cooldown` has elapsed since their last add. Failures
    /// report the remaining wait.
    pub fn check(&self, submitter: &ListenerId, cooldown: Duration, now: Duration) -> Result<()> {
        if cooldown.is_zero() {
            return Ok(());
        }

        match self.last_add.get(submitter) {
            Some(&last) => {
                let elapsed = now.saturating_sub(last);
                if elapsed >= cooldown {
                    Ok(())
                } else {
                    Err(SessionError::CooldownActive {
                        remaining: cooldown - elapsed,
                    })
                }
            }
            None => Ok(()),
        }
    }

    /// Record a successful add, resetting the timer for this submitter only
    pub fn record(&mut self, submitter: &ListenerId, now: Duration) {
        self.last_add.insert(submitter.clone(), now);
    }

    /// Forget all recorded adds
    pub fn clear(&mut self) {
        self.last_add.clear();
    }
}
