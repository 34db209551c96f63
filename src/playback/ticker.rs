//! A cancellable fixed-interval schedule, polled by the event loop.
//!
//! The ticker never runs code on its own: it only tracks the next deadline.
//! At most one deadline is pending at any time, so there can never be two
//! tickers for one session, and `stop` cancels the pending tick outright.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct Ticker {
    interval: Duration,
    next_due: Option<Instant>,
}

impl Ticker {
    /// Create a stopped ticker. Zero intervals are bumped to one millisecond.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.max(Duration::from_millis(1)),
            next_due: None,
        }
    }

    #[cfg(test)]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    /// The instant the next tick is due, if running.
    pub fn deadline(&self) -> Option<Instant> {
        self.next_due
    }

    /// Schedule the first tick one interval from `now`. No-op when running.
    pub fn start(&mut self, now: Instant) {
        if self.next_due.is_none() {
            self.next_due = Some(now + self.interval);
        }
    }

    /// Cancel the pending tick.
    pub fn stop(&mut self) {
        self.next_due = None;
    }

    /// Returns `true` once per due deadline and schedules the next one.
    ///
    /// If the caller fell more than one interval behind, the schedule is
    /// realigned to `now` and the missed ticks are dropped.
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(due) = self.next_due else {
            return false;
        };
        if now < due {
            return false;
        }

        let mut next = due + self.interval;
        if next <= now {
            next = now + self.interval;
        }
        self.next_due = Some(next);
        true
    }
}
