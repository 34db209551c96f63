use std::path::PathBuf;

use thiserror::Error;

use super::model::TrackId;

/// Reasons a catalog cannot be built.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("catalog has no tracks")]
    Empty,

    #[error("track {0} has a zero duration")]
    ZeroDuration(TrackId),

    #[error("track id {0} appears more than once")]
    DuplicateId(TrackId),

    #[error("playlist {playlist} references unknown track {track}")]
    UnknownPlaylistTrack { playlist: String, track: TrackId },
}
