//! Recommendation session: the `Idle → Selecting → Settled` state machine.
//!
//! A session owns the catalog, the preference store, the user's selection,
//! a random source and a [`Ticker`]. `recommend()` starts a spin; the UI
//! loop then calls `tick()` until the session settles. Only the final,
//! weighted draw is recorded into history.

pub mod ticker;

use std::time::Duration;

use rand::Rng;
use tracing::{debug, info};

use crate::catalog::{Catalog, Category, MenuItem};
use crate::config::Config;
use crate::select::{
    eligible, ExclusionFilter, SelectionFilters, SpinFrame, SpinSequence, DEFAULT_LIKE_WEIGHT,
    DEFAULT_SPIN_FRAMES,
};
use crate::share;
use crate::taste::PreferenceStore;

pub use ticker::{ImmediateTicker, IntervalTicker, Ticker};

/// Where the session is in a recommendation cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Nothing recommended yet.
    Idle,
    /// A spin is running.
    Selecting,
    /// A result is on display.
    Settled,
}

/// What a `recommend()` call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecommendOutcome {
    Started,
    /// A spin was already running; nothing changed.
    Busy,
    /// No item matches the current selection; nothing changed.
    NoCandidates,
}

/// Spin tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOptions {
    pub spin_frames: u32,
    pub like_weight: usize,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            spin_frames: DEFAULT_SPIN_FRAMES,
            like_weight: DEFAULT_LIKE_WEIGHT,
        }
    }
}

impl From<&Config> for SessionOptions {
    fn from(config: &Config) -> Self {
        Self {
            spin_frames: config.spin_frames,
            like_weight: DEFAULT_LIKE_WEIGHT,
        }
    }
}

pub struct RecommendationSession<R, T> {
    catalog: Catalog,
    store: PreferenceStore,
    selection: SelectionFilters,
    rng: R,
    ticker: T,
    options: SessionOptions,
    state: SessionState,
    spin: Option<SpinSequence>,
    display_menu: Option<MenuItem>,
    result: Option<MenuItem>,
}

impl<R: Rng, T: Ticker> RecommendationSession<R, T> {
    pub fn new(
        catalog: Catalog,
        store: PreferenceStore,
        rng: R,
        ticker: T,
        options: SessionOptions,
    ) -> Self {
        Self {
            catalog,
            store,
            selection: SelectionFilters::new(),
            rng,
            ticker,
            options,
            state: SessionState::Idle,
            spin: None,
            display_menu: None,
            result: None,
        }
    }

    /// Replace the selection, e.g. from command-line flags.
    pub fn with_selection(mut self, selection: SelectionFilters) -> Self {
        self.selection = selection;
        self
    }

    /// Start a recommendation cycle.
    pub fn recommend(&mut self) -> RecommendOutcome {
        if self.state == SessionState::Selecting {
            debug!("recommend ignored: spin in progress");
            return RecommendOutcome::Busy;
        }

        let candidates = eligible(&self.catalog, &self.selection, self.store.dislikes());
        let spin = match SpinSequence::new(
            &candidates,
            self.store.likes(),
            self.options.like_weight,
            self.options.spin_frames,
        ) {
            Some(spin) => spin,
            None => {
                info!("no menu matches the current filters");
                return RecommendOutcome::NoCandidates;
            }
        };

        debug!(eligible = spin.eligible().len(), pool = spin.pool_len(), "spin started");
        self.spin = Some(spin);
        self.result = None;
        self.state = SessionState::Selecting;
        self.ticker.restart();
        RecommendOutcome::Started
    }

    /// Advance the spin if the ticker says a frame is due.
    pub fn tick(&mut self) -> Option<SpinFrame> {
        if self.state != SessionState::Selecting || !self.ticker.poll() {
            return None;
        }
        self.step()
    }

    /// Advance the spin by one frame regardless of timing.
    pub fn step(&mut self) -> Option<SpinFrame> {
        let frame = self.spin.as_mut()?.next_frame(&mut self.rng)?;
        self.display_menu = Some(frame.item().clone());
        if let SpinFrame::Final(item) = &frame {
            self.settle(item.clone());
        }
        Some(frame)
    }

    /// Drive the current spin to the end, sleeping between frames. Returns
    /// the settled result.
    pub fn run_to_completion(&mut self) -> Option<&MenuItem> {
        while self.state == SessionState::Selecting {
            let wait = self.until_next_frame();
            if !wait.is_zero() {
                std::thread::sleep(wait);
            }
            self.tick();
        }
        self.result.as_ref()
    }

    /// Time until the ticker allows the next frame.
    pub fn until_next_frame(&self) -> Duration {
        self.ticker.until_next()
    }

    fn settle(&mut self, item: MenuItem) {
        info!(id = %item.id, name = %item.name, "recommendation settled");
        self.store.record_result(&item);
        self.result = Some(item);
        self.spin = None;
        self.state = SessionState::Settled;
    }

    /// Toggle a like; the session state is unaffected.
    pub fn like(&mut self, id: &str) -> bool {
        self.store.like(id)
    }

    /// Toggle a dislike; the session state is unaffected.
    pub fn dislike(&mut self, id: &str) -> bool {
        self.store.dislike(id)
    }

    /// Toggle a category. Returns false if refused (last selected category).
    pub fn toggle_category(&mut self, category: Category) -> bool {
        self.selection.toggle_category(category)
    }

    /// Toggle a filter. Returns whether it is now active.
    pub fn toggle_filter(&mut self, filter: ExclusionFilter) -> bool {
        self.selection.toggle_filter(filter)
    }

    /// Items currently eligible for a draw.
    pub fn eligible(&self) -> Vec<&MenuItem> {
        eligible(&self.catalog, &self.selection, self.store.dislikes())
    }

    /// Clipboard text for the settled result.
    pub fn share_text(&self) -> Option<String> {
        self.result.as_ref().map(|item| share::share_text(&item.name))
    }

    /// Map search link for the settled result.
    pub fn map_search_url(&self, base: &str) -> Option<String> {
        self.result
            .as_ref()
            .map(|item| share::map_search_url(base, &item.name))
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_spinning(&self) -> bool {
        self.state == SessionState::Selecting
    }

    /// The item currently shown: an intermediate frame or the result.
    pub fn display_menu(&self) -> Option<&MenuItem> {
        self.display_menu.as_ref()
    }

    /// The settled result. `None` while spinning.
    pub fn result(&self) -> Option<&MenuItem> {
        self.result.as_ref()
    }

    pub fn selection(&self) -> &SelectionFilters {
        &self.selection
    }

    pub fn preferences(&self) -> &PreferenceStore {
        &self.store
    }

    pub fn preferences_mut(&mut self) -> &mut PreferenceStore {
        &mut self.store
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}
