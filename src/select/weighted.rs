//! Weighted selector: like-based duplication and uniform draws.
//!
//! A liked item appears `like_weight` times in the pool, everything else
//! once. The draw is uniform over the pool, so a liked item is exactly
//! `like_weight` times as likely as an unliked one. No normalization.

use std::collections::BTreeSet;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::catalog::MenuItem;

/// Pool copies of a liked item.
pub const DEFAULT_LIKE_WEIGHT: usize = 3;

/// Expand `eligible` into the weighted pool. Order follows `eligible`, with
/// a liked item's copies adjacent. A weight of zero is treated as one.
pub fn build_weighted_pool<'a>(
    eligible: &[&'a MenuItem],
    likes: &BTreeSet<String>,
    like_weight: usize,
) -> Vec<&'a MenuItem> {
    let like_weight = like_weight.max(1);
    let mut pool = Vec::with_capacity(eligible.len());
    for &item in eligible {
        let copies = if likes.contains(&item.id) {
            like_weight
        } else {
            1
        };
        pool.extend(std::iter::repeat(item).take(copies));
    }
    pool
}

/// Uniform draw. `None` for an empty pool.
pub fn draw<'p, T, R: Rng + ?Sized>(pool: &'p [T], rng: &mut R) -> Option<&'p T> {
    pool.choose(rng)
}
