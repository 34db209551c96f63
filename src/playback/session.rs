//! The playback session: single source of truth for what is playing and where.

use std::collections::BTreeSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::catalog::{Catalog, Track, TrackId};

use super::error::PlaybackError;
use super::types::{PlayerCmd, TickOutcome};

/// "Previous" restarts the current track once more than this many seconds
/// have played.
pub const DEFAULT_RESTART_THRESHOLD_SECS: u32 = 5;

/// Mutable playback state over an immutable catalog.
///
/// Invariants, upheld by every operation:
/// - `current_index < catalog.len()`
/// - `elapsed <= duration(current track)`
pub struct PlaybackSession {
    catalog: Catalog,
    current_index: usize,
    is_playing: bool,
    elapsed: u32,
    shuffled: bool,
    collapsed: bool,
    favorite_ids: BTreeSet<TrackId>,
    restart_threshold: u32,
    rng: StdRng,
}

impl PlaybackSession {
    /// Start a session at the first track, paused, with favorites seeded from
    /// the catalog.
    pub fn new(catalog: Catalog) -> Self {
        Self::with_rng(catalog, StdRng::from_os_rng())
    }

    /// Like [`PlaybackSession::new`] with a deterministic shuffle sequence.
    #[cfg(test)]
    pub fn with_seed(catalog: Catalog, seed: u64) -> Self {
        Self::with_rng(catalog, StdRng::seed_from_u64(seed))
    }

    fn with_rng(catalog: Catalog, rng: StdRng) -> Self {
        let favorite_ids = catalog
            .tracks()
            .iter()
            .filter(|t| t.starts_favorite)
            .map(|t| t.id.clone())
            .collect();

        Self {
            catalog,
            current_index: 0,
            is_playing: false,
            elapsed: 0,
            shuffled: false,
            collapsed: false,
            favorite_ids,
            restart_threshold: DEFAULT_RESTART_THRESHOLD_SECS,
            rng,
        }
    }

    pub fn with_restart_threshold(mut self, secs: u32) -> Self {
        self.restart_threshold = secs;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_track(&self) -> &Track {
        &self.catalog.tracks()[self.current_index]
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    /// Seconds played into the current track.
    pub fn elapsed(&self) -> u32 {
        self.elapsed
    }

    pub fn remaining(&self) -> u32 {
        self.current_duration().saturating_sub(self.elapsed)
    }

    /// Playback progress of the current track in `0.0..=1.0`.
    pub fn progress(&self) -> f64 {
        f64::from(self.elapsed) / f64::from(self.current_duration().max(1))
    }

    pub fn shuffled(&self) -> bool {
        self.shuffled
    }

    pub fn collapsed(&self) -> bool {
        self.collapsed
    }

    #[cfg(test)]
    pub fn restart_threshold(&self) -> u32 {
        self.restart_threshold
    }

    pub fn is_favorite(&self, id: &TrackId) -> bool {
        self.favorite_ids.contains(id)
    }

    /// Favorite tracks in catalog order, computed from the favorite set on
    /// every call.
    pub fn favorites(&self) -> Vec<&Track> {
        self.catalog
            .tracks()
            .iter()
            .filter(|t| self.favorite_ids.contains(&t.id))
            .map(AsRef::as_ref)
            .collect()
    }

    fn current_duration(&self) -> u32 {
        self.current_track().duration_secs
    }

    fn check_index(&self, index: usize) -> Result<(), PlaybackError> {
        if index < self.catalog.len() {
            Ok(())
        } else {
            Err(PlaybackError::InvalidIndex {
                index,
                len: self.catalog.len(),
            })
        }
    }

    /// Focus a track without changing the transport.
    pub fn select_track(&mut self, index: usize) -> Result<(), PlaybackError> {
        self.check_index(index)?;
        self.current_index = index;
        self.elapsed = 0;
        Ok(())
    }

    /// Focus a track and start playing it.
    pub fn select_and_play(&mut self, index: usize) -> Result<(), PlaybackError> {
        self.select_track(index)?;
        self.is_playing = true;
        Ok(())
    }

    /// Start playing the track with `id` from the beginning.
    pub fn play_track(&mut self, id: &TrackId) -> Result<(), PlaybackError> {
        let index = self
            .catalog
            .position(id)
            .ok_or_else(|| PlaybackError::UnknownTrackId(id.clone()))?;
        self.select_and_play(index)
    }

    pub fn toggle_play_pause(&mut self) {
        self.is_playing = !self.is_playing;
    }

    pub fn set_playing(&mut self, playing: bool) {
        self.is_playing = playing;
    }

    /// Move to the next track: a uniformly random one when shuffled (which may
    /// be the current track again), otherwise the following one, wrapping.
    pub fn advance(&mut self) {
        let len = self.catalog.len();
        self.current_index = if self.shuffled {
            self.rng.random_range(0..len)
        } else {
            (self.current_index + 1) % len
        };
        self.elapsed = 0;
    }

    /// Restart the current track if past the restart threshold, otherwise go
    /// to the preceding track, wrapping. Shuffle is not consulted.
    pub fn retreat(&mut self) {
        if self.elapsed > self.restart_threshold {
            self.elapsed = 0;
            return;
        }
        let len = self.catalog.len();
        self.current_index = (self.current_index + len - 1) % len;
        self.elapsed = 0;
    }

    /// Jump to `target` seconds, clamped to the current track's duration.
    pub fn seek(&mut self, target: u32) {
        self.elapsed = target.min(self.current_duration());
    }

    /// Move by `delta` seconds, clamped to `0..=duration`.
    pub fn seek_by(&mut self, delta: i64) {
        let target = (i64::from(self.elapsed) + delta).clamp(0, i64::from(self.current_duration()));
        self.seek(u32::try_from(target).unwrap_or(0));
    }

    pub fn set_shuffled(&mut self, shuffled: bool) {
        self.shuffled = shuffled;
    }

    pub fn set_collapsed(&mut self, collapsed: bool) {
        self.collapsed = collapsed;
    }

    /// Flip the favorite flag of `id`. Returns the new flag.
    pub fn toggle_favorite(&mut self, id: &TrackId) -> Result<bool, PlaybackError> {
        if !self.catalog.contains(id) {
            return Err(PlaybackError::UnknownTrackId(id.clone()));
        }
        if self.favorite_ids.remove(id) {
            Ok(false)
        } else {
            self.favorite_ids.insert(id.clone());
            Ok(true)
        }
    }

    /// Advance elapsed time by one second while playing. Reaching the end of
    /// the track advances to the next one instead of counting past it.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.is_playing {
            return TickOutcome::Idle;
        }

        let next = self.elapsed.saturating_add(1);
        if next >= self.current_duration() {
            let from = self.current_index;
            self.advance();
            TickOutcome::Advanced {
                from,
                to: self.current_index,
            }
        } else {
            self.elapsed = next;
            TickOutcome::Elapsed(next)
        }
    }

    /// Apply a command. Rejected commands leave the session untouched.
    pub fn apply(&mut self, cmd: PlayerCmd) -> Result<(), PlaybackError> {
        match cmd {
            PlayerCmd::Select(i) => self.select_track(i)?,
            PlayerCmd::SelectAndPlay(i) => self.select_and_play(i)?,
            PlayerCmd::PlayTrack(id) => self.play_track(&id)?,
            PlayerCmd::TogglePlayPause => self.toggle_play_pause(),
            PlayerCmd::SetPlaying(p) => self.set_playing(p),
            PlayerCmd::Next => self.advance(),
            PlayerCmd::Prev => self.retreat(),
            PlayerCmd::Seek(secs) => self.seek(secs),
            PlayerCmd::SeekBy(delta) => self.seek_by(delta),
            PlayerCmd::SetShuffled(s) => self.set_shuffled(s),
            PlayerCmd::SetCollapsed(c) => self.set_collapsed(c),
            PlayerCmd::ToggleFavorite(id) => {
                self.toggle_favorite(&id)?;
            }
        }
        Ok(())
    }
}
