//! Shuffle planning for crate playback
//!
//! A shuffle plan is a Fisher-Yates permutation of track indices plus a
//! cursor. The plan is persisted with the player state, so it works on
//! indices rather than reordering the track list itself.

use rand::seq::SliceRandom;
use rand::thread_rng;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Randomized visitation order over a fixed track list
///
/// The cursor points at the slot currently playing. `next`/`previous` wrap
/// around the permutation; looping repeats the same order rather than
/// reshuffling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShufflePlanner {
    /// Permutation of `[0..n)`
    order: Vec<usize>,

    /// Position within `order` currently playing
    cursor: usize,
}

impl ShufflePlanner {
    /// Plan a uniform shuffle over `len` tracks, cursor at 0
    pub fn plan(len: usize) -> Self {
        Self::plan_with_rng(len, &mut thread_rng())
    }

    /// Plan a shuffle that keeps `start` as the first slot
    ///
    /// Used on shuffle activation so the currently playing track keeps
    /// playing; the remaining order stays uniformly random.
    pub fn plan_from(len: usize, start: usize) -> Self {
        Self::plan_from_with_rng(len, start, &mut thread_rng())
    }

    /// [`ShufflePlanner::plan`] with a caller-supplied RNG
    pub fn plan_with_rng(len: usize, rng: &mut impl Rng) -> Self {
        let mut order: Vec<usize> = (0..len).collect();
        order.shuffle(rng);
        Self { order, cursor: 0 }
    }

    /// [`ShufflePlanner::plan_from`] with a caller-supplied RNG
    pub fn plan_from_with_rng(len: usize, start: usize, rng: &mut impl Rng) -> Self {
        let mut planner = Self::plan_with_rng(len, rng);
        if let Some(pos) = planner.order.iter().position(|&i| i == start) {
            planner.order.swap(0, pos);
        }
        planner
    }

    /// Rebuild a planner from persisted parts
    ///
    /// Returns `None` unless `order` is a permutation of `[0..order.len())`
    /// and `cursor` is in bounds, so a corrupt snapshot cannot produce a
    /// planner that indexes out of range.
    pub fn restore(order: Vec<usize>, cursor: usize) -> Option<Self> {
        let len = order.len();
        if cursor >= len && len > 0 {
            return None;
        }
        let mut seen = vec![false; len];
        for &index in &order {
            if index >= len || seen[index] {
                return None;
            }
            seen[index] = true;
        }
        Some(Self { order, cursor })
    }

    /// Track index currently playing
    pub fn current(&self) -> Option<usize> {
        self.order.get(self.cursor).copied()
    }

    /// Advance to the next slot, wrapping to the start of the permutation
    pub fn next(&mut self) -> Option<usize> {
        if self.order.is_empty() {
            return None;
        }
        self.cursor = (self.cursor + 1) % self.order.len();
        self.current()
    }

    /// Step back to the previous slot, wrapping to the end
    pub fn previous(&mut self) -> Option<usize> {
        if self.order.is_empty() {
            return None;
        }
        self.cursor = (self.cursor + self.order.len() - 1) % self.order.len();
        self.current()
    }

    /// Move the cursor to the slot holding `index`, if present
    pub fn seek_to_index(&mut self, index: usize) -> bool {
        match self.order.iter().position(|&i| i == index) {
            Some(pos) => {
                self.cursor = pos;
                true
            }
            None => false,
        }
    }

    /// The full permutation
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Current cursor position within the permutation
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of planned slots
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Check if the plan covers no tracks
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn plan_is_permutation() {
        let planner = ShufflePlanner::plan(10);
        let seen: HashSet<usize> = planner.order().iter().copied().collect();
        assert_eq!(seen.len(), 10);
        assert!(seen.iter().all(|&i| i < 10));
    }

    #[test]
    fn plan_from_keeps_start_first() {
        for _ in 0..20 {
            let planner = ShufflePlanner::plan_from(8, 3);
            assert_eq!(planner.order()[0], 3);
            assert_eq!(planner.current(), Some(3));
        }
    }

    #[test]
    fn next_visits_every_index_once_before_repeating() {
        let mut planner = ShufflePlanner::plan(5);
        let mut visited = HashSet::new();
        for _ in 0..5 {
            visited.insert(planner.next().unwrap());
        }
        assert_eq!(visited.len(), 5);

        // Sixth call re-enters the same permutation
        let order: Vec<usize> = planner.order().to_vec();
        assert_eq!(planner.next(), Some(order[1]));
    }

    #[test]
    fn previous_wraps_to_last_slot() {
        let mut planner = ShufflePlanner::plan(4);
        let order: Vec<usize> = planner.order().to_vec();

        assert_eq!(planner.previous(), Some(order[3]));
        assert_eq!(planner.previous(), Some(order[2]));
    }

    #[test]
    fn next_then_previous_is_identity() {
        let mut planner = ShufflePlanner::plan(7);
        let start = planner.current();
        planner.next();
        planner.previous();
        assert_eq!(planner.current(), start);
    }

    #[test]
    fn restore_rejects_corrupt_parts() {
        assert!(ShufflePlanner::restore(vec![0, 1, 2], 1).is_some());
        // Duplicate index
        assert!(ShufflePlanner::restore(vec![0, 1, 1], 0).is_none());
        // Out-of-range index
        assert!(ShufflePlanner::restore(vec![0, 1, 5], 0).is_none());
        // Cursor past the end
        assert!(ShufflePlanner::restore(vec![0, 1, 2], 3).is_none());
    }

    #[test]
    fn empty_plan_navigation() {
        let mut planner = ShufflePlanner::plan(0);
        assert!(planner.is_empty());
        assert_eq!(planner.current(), None);
        assert_eq!(planner.next(), None);
        assert_eq!(planner.previous(), None);
    }

    #[test]
    fn seek_to_index_moves_cursor() {
        let mut planner = ShufflePlanner::restore(vec![2, 0, 1], 0).unwrap();
        assert!(planner.seek_to_index(1));
        assert_eq!(planner.cursor(), 2);
        assert_eq!(planner.current(), Some(1));
        assert!(!planner.seek_to_index(9));
    }
}
