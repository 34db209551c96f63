use thiserror::Error;

use crate::catalog::TrackId;

/// Rejected playback operations. A rejected operation never mutates state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaybackError {
    #[error("track index {index} is out of range (catalog has {len} tracks)")]
    InvalidIndex { index: usize, len: usize },

    #[error("unknown track id: {0}")]
    UnknownTrackId(TrackId),
}
