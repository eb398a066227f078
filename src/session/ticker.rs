//! Frame tickers: decide when the next spin frame is due.
//!
//! The session polls its ticker from the UI loop instead of blocking. Tests
//! swap in [`ImmediateTicker`] so a spin completes without waiting.

use std::time::{Duration, Instant};

/// Schedules spin frames.
pub trait Ticker {
    /// Begin timing a new sequence. The first frame is due one interval later.
    fn restart(&mut self);
    /// Whether a frame is due now. A `true` result consumes that frame.
    fn poll(&mut self) -> bool;
    /// Time remaining until the next frame is due.
    fn until_next(&self) -> Duration;
}

/// Wall-clock ticker firing every `interval`.
#[derive(Debug, Clone)]
pub struct IntervalTicker {
    interval: Duration,
    next_due: Option<Instant>,
}

impl IntervalTicker {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_due: None,
        }
    }
}

impl Ticker for IntervalTicker {
    fn restart(&mut self) {
        self.next_due = Some(Instant::now() + self.interval);
    }

    fn poll(&mut self) -> bool {
        let now = Instant::now();
        match self.next_due {
            Some(due) if now >= due => {
                self.next_due = Some(now + self.interval);
                true
            }
            Some(_) => false,
            None => {
                self.next_due = Some(now + self.interval);
                false
            }
        }
    }

    fn until_next(&self) -> Duration {
        self.next_due
            .map(|due| due.saturating_duration_since(Instant::now()))
            .unwrap_or(self.interval)
    }
}

/// Ticker that is always due.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImmediateTicker;

impl Ticker for ImmediateTicker {
    fn restart(&mut self) {}

    fn poll(&mut self) -> bool {
        true
    }

    fn until_next(&self) -> Duration {
        Duration::ZERO
    }
}
