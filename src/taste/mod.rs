//! Taste store: likes, dislikes, and recent results persisted per device.
//!
//! Every mutation is written through to the backing [`KeyValueStore`]. Write
//! failures are logged and the in-memory state is kept, so the user flow
//! never aborts on storage trouble.

pub mod persistence;
pub mod profile;

use std::collections::BTreeSet;

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::catalog::MenuItem;

pub use persistence::{default_data_dir, DirStore, KeyValueStore, MemoryStore, StoreError};
pub use profile::{PreferenceState, DEFAULT_HISTORY_LIMIT};

pub const LIKES_KEY: &str = "likes";
pub const DISLIKES_KEY: &str = "dislikes";
pub const HISTORY_KEY: &str = "history";

/// Preference state with write-through persistence.
pub struct PreferenceStore {
    backend: Box<dyn KeyValueStore>,
    state: PreferenceState,
    history_limit: usize,
}

impl PreferenceStore {
    /// Load preferences from `backend`. Missing or unreadable values fall
    /// back to empty defaults. `history_limit` is held to
    /// `1..=DEFAULT_HISTORY_LIMIT`.
    pub fn load(backend: Box<dyn KeyValueStore>, history_limit: usize) -> Self {
        let history_limit = history_limit.clamp(1, DEFAULT_HISTORY_LIMIT);
        let mut state = PreferenceState {
            likes: read_or_default(backend.as_ref(), LIKES_KEY),
            dislikes: read_or_default(backend.as_ref(), DISLIKES_KEY),
            history: read_or_default(backend.as_ref(), HISTORY_KEY),
        };
        if state.normalize(history_limit) {
            warn!("stored preferences were inconsistent and have been repaired");
        }
        debug!(
            likes = state.likes.len(),
            dislikes = state.dislikes.len(),
            history = state.history.len(),
            "preferences loaded"
        );
        Self {
            backend,
            state,
            history_limit,
        }
    }

    /// An empty store that keeps everything in memory.
    pub fn in_memory() -> Self {
        Self::load(Box::new(MemoryStore::new()), DEFAULT_HISTORY_LIMIT)
    }

    /// Toggle a like. Returns whether `id` is now liked.
    pub fn like(&mut self, id: &str) -> bool {
        let liked = self.state.toggle_like(id);
        debug!(id, liked, "like toggled");
        self.persist();
        liked
    }

    /// Toggle a dislike. Returns whether `id` is now disliked.
    pub fn dislike(&mut self, id: &str) -> bool {
        let disliked = self.state.toggle_dislike(id);
        debug!(id, disliked, "dislike toggled");
        self.persist();
        disliked
    }

    /// Record a settled recommendation at the front of the history.
    pub fn record_result(&mut self, item: &MenuItem) {
        self.state.push_history(item, self.history_limit);
        self.persist();
    }

    /// Clear all preferences, in memory and in storage.
    ///
    /// Every key is attempted even when one removal fails; the first error
    /// is returned and the in-memory state is left untouched in that case.
    pub fn reset(&mut self) -> Result<(), StoreError> {
        let mut first_error = None;
        for key in [LIKES_KEY, DISLIKES_KEY, HISTORY_KEY] {
            if let Err(e) = self.backend.remove(key) {
                warn!(key, error = %e, "failed to remove stored preferences");
                first_error.get_or_insert(e);
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => {
                self.state = PreferenceState::new();
                Ok(())
            }
        }
    }

    /// Write the full state to storage.
    pub fn save(&mut self) -> Result<(), StoreError> {
        self.backend
            .write(LIKES_KEY, &persistence::encode(&self.state.likes)?)?;
        self.backend
            .write(DISLIKES_KEY, &persistence::encode(&self.state.dislikes)?)?;
        self.backend
            .write(HISTORY_KEY, &persistence::encode(&self.state.history)?)?;
        Ok(())
    }

    fn persist(&mut self) {
        if let Err(e) = self.save() {
            warn!(error = %e, "failed to persist preferences");
        }
    }

    pub fn state(&self) -> &PreferenceState {
        &self.state
    }

    pub fn likes(&self) -> &BTreeSet<String> {
        &self.state.likes
    }

    pub fn dislikes(&self) -> &BTreeSet<String> {
        &self.state.dislikes
    }

    pub fn history(&self) -> &[MenuItem] {
        &self.state.history
    }

    pub fn is_liked(&self, id: &str) -> bool {
        self.state.likes.contains(id)
    }

    pub fn is_disliked(&self, id: &str) -> bool {
        self.state.dislikes.contains(id)
    }

    pub fn history_limit(&self) -> usize {
        self.history_limit
    }

    pub fn backend(&self) -> &dyn KeyValueStore {
        self.backend.as_ref()
    }
}

fn read_or_default<T: DeserializeOwned + Default>(backend: &dyn KeyValueStore, key: &str) -> T {
    let raw = match backend.read(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return T::default(),
        Err(e) => {
            warn!(key, error = %e, "could not read stored preferences, using defaults");
            return T::default();
        }
    };
    persistence::decode(&raw).unwrap_or_else(|e| {
        warn!(key, error = %e, "stored preferences are corrupt, using defaults");
        T::default()
    })
}
