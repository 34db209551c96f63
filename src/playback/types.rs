//! Command and outcome types shared by the playback model and its callers.

use crate::catalog::TrackId;

/// Every operation a view or remote control can request from the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerCmd {
    /// Move to a catalog index without touching the transport.
    Select(usize),
    /// Move to a catalog index and start playing.
    SelectAndPlay(usize),
    /// Start playing the track with the given id.
    PlayTrack(TrackId),
    TogglePlayPause,
    /// Set the transport explicitly (`true` = playing).
    SetPlaying(bool),
    Next,
    Prev,
    /// Jump to an absolute position in seconds (clamped).
    Seek(u32),
    /// Move by a relative number of seconds, positive or negative (clamped).
    SeekBy(i64),
    SetShuffled(bool),
    SetCollapsed(bool),
    ToggleFavorite(TrackId),
}

/// What a single tick did to the session.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not playing; nothing changed.
    Idle,
    /// Elapsed time moved forward to the given second.
    Elapsed(u32),
    /// The current track ended and playback moved on.
    Advanced { from: usize, to: usize },
}
