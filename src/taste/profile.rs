//! Preference state: likes, dislikes, and recent results for one device.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::catalog::MenuItem;

/// Number of recent results kept by default.
pub const DEFAULT_HISTORY_LIMIT: usize = 5;

/// Per-device preference data.
///
/// `likes` and `dislikes` are always disjoint. `history` is most-recent-first,
/// holds at most one entry per id, and never grows beyond the configured limit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceState {
    pub likes: BTreeSet<String>,
    pub dislikes: BTreeSet<String>,
    pub history: Vec<MenuItem>,
}

impl PreferenceState {
    /// Create an empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle `id` in the like set. Returns whether the id is now liked.
    pub fn toggle_like(&mut self, id: &str) -> bool {
        if self.likes.remove(id) {
            false
        } else {
            self.dislikes.remove(id);
            self.likes.insert(id.to_string());
            true
        }
    }

    /// Toggle `id` in the dislike set. Returns whether the id is now disliked.
    pub fn toggle_dislike(&mut self, id: &str) -> bool {
        if self.dislikes.remove(id) {
            false
        } else {
            self.likes.remove(id);
            self.dislikes.insert(id.to_string());
            true
        }
    }

    /// Put `item` at the front of the history, dropping any older entry with
    /// the same id, then truncate to `limit` entries.
    pub fn push_history(&mut self, item: &MenuItem, limit: usize) {
        self.history.retain(|entry| entry.id != item.id);
        self.history.insert(0, item.clone());
        self.history.truncate(limit);
    }

    /// Restore the invariants on data that came from storage.
    ///
    /// Ids present in both sets stay disliked. Duplicate history ids keep
    /// their most recent occurrence. Returns true if anything changed.
    pub fn normalize(&mut self, limit: usize) -> bool {
        let before = (self.likes.len(), self.history.len());

        let dislikes = &self.dislikes;
        self.likes.retain(|id| !dislikes.contains(id));

        let mut seen = BTreeSet::new();
        self.history.retain(|entry| seen.insert(entry.id.clone()));
        self.history.truncate(limit);

        before != (self.likes.len(), self.history.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::item;
    use crate::catalog::Category;

    #[test]
    fn new_state_is_empty() {
        let state = PreferenceState::new();
        assert!(state.likes.is_empty());
        assert!(state.dislikes.is_empty());
        assert!(state.history.is_empty());
    }

    #[test]
    fn like_toggles() {
        let mut state = PreferenceState::new();
        assert!(state.toggle_like("a"));
        assert!(state.likes.contains("a"));
        assert!(!state.toggle_like("a"));
        assert!(!state.likes.contains("a"));
    }

    #[test]
    fn like_removes_dislike() {
        let mut state = PreferenceState::new();
        state.toggle_dislike("a");
        state.toggle_like("a");
        assert!(state.likes.contains("a"));
        assert!(!state.dislikes.contains("a"));
    }

    #[test]
    fn unlike_leaves_dislikes_alone() {
        let mut state = PreferenceState::new();
        state.toggle_dislike("b");
        state.toggle_like("a");
        state.toggle_like("a");
        assert!(state.dislikes.contains("b"));
        assert!(state.likes.is_empty());
    }

    #[test]
    fn dislike_removes_like() {
        let mut state = PreferenceState::new();
        state.toggle_like("a");
        assert!(state.toggle_dislike("a"));
        assert!(!state.likes.contains("a"));
        assert!(state.dislikes.contains("a"));
        assert!(!state.toggle_dislike("a"));
        assert!(state.dislikes.is_empty());
    }

    #[test]
    fn sets_stay_disjoint_over_mixed_calls() {
        let mut state = PreferenceState::new();
        let ids = ["a", "b", "c"];
        for step in 0..60usize {
            let id = ids[step % ids.len()];
            if step % 4 < 2 {
                state.toggle_like(id);
            } else {
                state.toggle_dislike(id);
            }
            assert!(state.likes.is_disjoint(&state.dislikes), "step {step}");
        }
    }

    #[test]
    fn history_is_most_recent_first() {
        let mut state = PreferenceState::new();
        state.push_history(&item("a", Category::Korean, &[]), 5);
        state.push_history(&item("b", Category::Korean, &[]), 5);
        let ids: Vec<&str> = state.history.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn history_deduplicates_by_id() {
        let mut state = PreferenceState::new();
        let a = item("a", Category::Korean, &[]);
        state.push_history(&a, 5);
        state.push_history(&item("b", Category::Korean, &[]), 5);
        state.push_history(&a, 5);
        state.push_history(&a, 5);
        let ids: Vec<&str> = state.history.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn history_capped_at_limit() {
        let mut state = PreferenceState::new();
        for i in 0..8 {
            state.push_history(&item(&format!("m{i}"), Category::Snack, &[]), 5);
        }
        assert_eq!(state.history.len(), 5);
        assert_eq!(state.history[0].id, "m7");
        assert_eq!(state.history[4].id, "m3");
    }

    #[test]
    fn normalize_repairs_stored_data() {
        let mut state = PreferenceState::new();
        state.likes.insert("a".into());
        state.dislikes.insert("a".into());
        let a = item("a", Category::Korean, &[]);
        state.history = vec![a.clone(), item("b", Category::Korean, &[]), a];

        assert!(state.normalize(5));
        assert!(state.likes.is_empty());
        assert!(state.dislikes.contains("a"));
        let ids: Vec<&str> = state.history.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert!(!state.normalize(5));
    }
}
