//! Spin sequence: intermediate uniform draws over the eligible set, then a
//! single weighted draw that becomes the result.
//!
//! Intermediate frames are for display only. Only [`SpinFrame::Final`]
//! carries an outcome.

use std::collections::BTreeSet;

use rand::Rng;

use super::weighted::{build_weighted_pool, draw};
use crate::catalog::MenuItem;

/// Intermediate frames shown before the final draw.
pub const DEFAULT_SPIN_FRAMES: u32 = 20;
/// Delay between frames.
pub const DEFAULT_SPIN_INTERVAL_MS: u64 = 80;

/// One step of a spin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpinFrame {
    Intermediate(MenuItem),
    Final(MenuItem),
}

impl SpinFrame {
    pub fn item(&self) -> &MenuItem {
        match self {
            SpinFrame::Intermediate(item) | SpinFrame::Final(item) => item,
        }
    }

    pub fn is_final(&self) -> bool {
        matches!(self, SpinFrame::Final(_))
    }
}

/// A running spin: `frames_left` intermediate draws remain before the final.
#[derive(Debug, Clone)]
pub struct SpinSequence {
    eligible: Vec<MenuItem>,
    pool: Vec<MenuItem>,
    frames_left: u32,
    finished: bool,
}

impl SpinSequence {
    /// Prepare a spin over `eligible`. Returns `None` when there is nothing
    /// to draw from.
    pub fn new(
        eligible: &[&MenuItem],
        likes: &BTreeSet<String>,
        like_weight: usize,
        frames: u32,
    ) -> Option<Self> {
        if eligible.is_empty() {
            return None;
        }
        let pool = build_weighted_pool(eligible, likes, like_weight)
            .into_iter()
            .cloned()
            .collect();
        Some(Self {
            eligible: eligible.iter().map(|&item| item.clone()).collect(),
            pool,
            frames_left: frames,
            finished: false,
        })
    }

    /// Advance one frame. Returns `None` once the final frame was produced.
    pub fn next_frame<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<SpinFrame> {
        if self.finished {
            return None;
        }
        if self.frames_left > 0 {
            self.frames_left -= 1;
            return draw(&self.eligible, rng).cloned().map(SpinFrame::Intermediate);
        }
        self.finished = true;
        draw(&self.pool, rng).cloned().map(SpinFrame::Final)
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn eligible(&self) -> &[MenuItem] {
        &self.eligible
    }

    pub fn pool_len(&self) -> usize {
        self.pool.len()
    }
}
