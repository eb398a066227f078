//! Lunchpick: a weighted-random lunch menu recommender with local preferences.

pub mod catalog;
pub mod config;
pub mod logging;
pub mod select;
pub mod session;
pub mod share;
pub mod taste;
pub mod tui;
