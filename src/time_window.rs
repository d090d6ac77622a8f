//! Sliding time window over a live sample stream.
//!
//! The window is always `[now - window_ms, now]`, re-derived from `now` on
//! every call rather than cached, so there is no invalidation path that can
//! drift. `now` is caller-supplied to keep the component deterministic in
//! tests; when omitted it falls back to the wall clock.

use chrono::Utc;

/// Tracker for a sliding `[now - window_ms, now]` interval.
#[derive(Clone, Debug)]
pub struct TimeWindow {
    window_ms: f64,
    now: f64,
}

impl TimeWindow {
    /// Create a window of `window_ms` milliseconds ending at `now`
    /// (wall-clock milliseconds when `None`).
    pub fn new(window_ms: f64, now: Option<f64>) -> Self {
        Self {
            window_ms,
            now: now.unwrap_or_else(wall_clock_ms),
        }
    }

    /// Move the window forward to `now` (wall-clock milliseconds when
    /// `None`).
    pub fn advance(&mut self, now: Option<f64>) {
        self.now = now.unwrap_or_else(wall_clock_ms);
    }

    /// Start of the window (`now - window_ms`).
    pub fn start(&self) -> f64 {
        self.now - self.window_ms
    }

    /// End of the window (`now`).
    pub fn end(&self) -> f64 {
        self.now
    }

    /// The window as a `(start, end)` pair.
    pub fn range(&self) -> (f64, f64) {
        (self.start(), self.end())
    }

    /// Whether a timestamp falls within the window, inclusive at both ends.
    pub fn contains(&self, timestamp: f64) -> bool {
        timestamp >= self.start() && timestamp <= self.end()
    }

    /// Change the window length.
    pub fn set_window_ms(&mut self, window_ms: f64) {
        self.window_ms = window_ms;
    }

    /// Window length in milliseconds.
    pub fn window_ms(&self) -> f64 {
        self.window_ms
    }
}

fn wall_clock_ms() -> f64 {
    Utc::now().timestamp_millis() as f64
}
