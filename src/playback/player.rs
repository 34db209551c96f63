use std::time::{Duration, Instant};

use tracing::{debug, info};

use super::error::PlaybackError;
use super::session::PlaybackSession;
use super::ticker::Ticker;
use super::types::{PlayerCmd, TickOutcome};

/// A playback session together with the ticker that drives it.
///
/// Every command and every tick goes through here so the ticker is started
/// exactly when the session starts playing and stopped exactly when it
/// stops.
pub struct Player {
    session: PlaybackSession,
    ticker: Ticker,
}

impl Player {
    pub fn new(session: PlaybackSession, tick_interval: Duration) -> Self {
        Self {
            session,
            ticker: Ticker::new(tick_interval),
        }
    }

    pub fn session(&self) -> &PlaybackSession {
        &self.session
    }

    #[cfg(test)]
    pub fn ticker(&self) -> &Ticker {
        &self.ticker
    }

    /// Apply `cmd` and bring the ticker in line with the transport.
    pub fn send(&mut self, cmd: PlayerCmd, now: Instant) -> Result<(), PlaybackError> {
        debug!(?cmd, "player command");
        let before = self.session.current_index();
        let result = self.session.apply(cmd);
        if let Err(ref e) = result {
            debug!(error = %e, "player command rejected");
        }
        self.log_track_change(before);
        self.sync_ticker(now);
        result
    }

    /// Instant of the next scheduled tick, if playing.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.ticker.deadline()
    }

    /// Run the tick that is due at `now`, if any.
    pub fn poll_tick(&mut self, now: Instant) -> Option<TickOutcome> {
        if !self.ticker.poll(now) {
            return None;
        }
        let outcome = self.session.tick();
        if let TickOutcome::Advanced { from, to } = outcome {
            info!(from, to, "track finished, moving on");
        }
        self.sync_ticker(now);
        Some(outcome)
    }

    fn sync_ticker(&mut self, now: Instant) {
        match (self.session.is_playing(), self.ticker.is_running()) {
            (true, false) => self.ticker.start(now),
            (false, true) => self.ticker.stop(),
            _ => {}
        }
    }

    fn log_track_change(&self, before: usize) {
        let after = self.session.current_index();
        if after != before {
            let track = self.session.current_track();
            info!(index = after, id = %track.id, track = %track.display(), "now on track");
        }
    }
}
