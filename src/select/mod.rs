//! Candidate selection: eligibility filtering, like-weighted pools, and the
//! spin sequence that ends in one authoritative draw.

pub mod filter;
pub mod spin;
pub mod weighted;

pub use filter::{eligible, filter_candidates, ExclusionFilter, SelectionFilters};
pub use spin::{SpinFrame, SpinSequence, DEFAULT_SPIN_FRAMES, DEFAULT_SPIN_INTERVAL_MS};
pub use weighted::{build_weighted_pool, draw, DEFAULT_LIKE_WEIGHT};
