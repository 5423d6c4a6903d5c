//! Debounced refresh scheduling.
//!
//! Property changes arrive in bursts (loading a screen sets hundreds of
//! properties). Each change only *requests* a pass; the host polls
//! `take_due` once per event-loop turn and runs at most one pass for the
//! whole burst. `force` bypasses the interval for callers that need
//! geometry synchronously.

use std::time::{Duration, Instant};

use crate::config::LayoutConfig;

#[derive(Debug, Clone, Default)]
pub struct RefreshScheduler {
    interval: Duration,
    /// Time of the first request not yet served.
    pending_since: Option<Instant>,
    forced: bool,
}

impl RefreshScheduler {
    /// A zero interval means "on the next turn".
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            pending_since: None,
            forced: false,
        }
    }

    pub fn from_config(config: &LayoutConfig) -> Self {
        Self::new(Duration::from_millis(config.refresh_interval_ms))
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Request a pass. Requests made while one is pending coalesce into it;
    /// the window is measured from the first of them.
    pub fn request(&mut self, now: Instant) {
        if self.pending_since.is_none() {
            tracing::trace!("layout pass requested");
            self.pending_since = Some(now);
        }
    }

    /// Make the next `take_due` succeed regardless of the interval.
    pub fn force(&mut self) {
        self.forced = true;
    }

    pub fn is_pending(&self) -> bool {
        self.forced || self.pending_since.is_some()
    }

    /// Whether a pass should run now. Serving a request clears it.
    pub fn take_due(&mut self, now: Instant) -> bool {
        let due = self.forced
            || self
                .pending_since
                .is_some_and(|since| now.saturating_duration_since(since) >= self.interval);
        if due {
            self.clear();
        }
        due
    }

    /// Drop any pending request, e.g. after an immediate pass.
    pub fn clear(&mut self) {
        self.pending_since = None;
        self.forced = false;
    }
}
