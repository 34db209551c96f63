use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use serde::Deserialize;

use super::error::CatalogError;

/// Stable identity of a track inside a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(transparent)]
pub struct TrackId(String);

impl TrackId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[cfg(test)]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TrackId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// A single playable item. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Track {
    pub id: TrackId,
    pub title: String,
    pub artist: String,
    pub album: String,
    /// Cover image reference (file name or URL); never loaded by the player.
    pub cover: String,
    #[serde(rename = "duration")]
    pub duration_secs: u32,
    /// Favorite flag as loaded. Only seeds the session's favorite set; live
    /// favorite state belongs to the session.
    #[serde(rename = "favorite", default)]
    pub starts_favorite: bool,
    /// Accent color as `#RRGGBB`.
    pub color: String,
}

impl Track {
    /// "Artist - Title", or just the title when the artist is blank.
    pub fn display(&self) -> String {
        let artist = self.artist.trim();
        if artist.is_empty() {
            self.title.clone()
        } else {
            format!("{} - {}", artist, self.title.trim())
        }
    }

    /// Parse the accent color. Returns `None` for anything but `#RRGGBB`.
    pub fn accent_rgb(&self) -> Option<(u8, u8, u8)> {
        let hex = self.color.trim().strip_prefix('#')?;
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some((channel(0)?, channel(2)?, channel(4)?))
    }
}

/// Playlist as described in a catalog source: track references by id.
#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistEntry {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub cover: String,
    #[serde(default)]
    pub tracks: Vec<TrackId>,
}

/// A named, ordered, read-only selection of catalog tracks.
///
/// Tracks are shared with the catalog; a playlist never owns their lifetime.
#[derive(Debug, Clone)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    pub cover: String,
    pub tracks: Vec<Arc<Track>>,
}

impl Playlist {
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Total running time in seconds.
    pub fn total_secs(&self) -> u64 {
        self.tracks
            .iter()
            .map(|t| u64::from(t.duration_secs))
            .sum()
    }
}

/// The fixed, ordered list of tracks for a session. Never empty.
#[derive(Debug, Clone)]
pub struct Catalog {
    tracks: Vec<Arc<Track>>,
    playlists: Vec<Playlist>,
}

impl Catalog {
    /// Build a catalog, validating tracks and resolving playlist references.
    pub fn new(tracks: Vec<Track>, playlists: Vec<PlaylistEntry>) -> Result<Self, CatalogError> {
        if tracks.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen: HashSet<&TrackId> = HashSet::with_capacity(tracks.len());
        for t in &tracks {
            if t.duration_secs == 0 {
                return Err(CatalogError::ZeroDuration(t.id.clone()));
            }
            if !seen.insert(&t.id) {
                return Err(CatalogError::DuplicateId(t.id.clone()));
            }
        }

        let tracks: Vec<Arc<Track>> = tracks.into_iter().map(Arc::new).collect();

        let playlists = playlists
            .into_iter()
            .map(|entry| {
                let resolved = entry
                    .tracks
                    .iter()
                    .map(|id| {
                        tracks
                            .iter()
                            .find(|t| &t.id == id)
                            .cloned()
                            .ok_or_else(|| CatalogError::UnknownPlaylistTrack {
                                playlist: entry.name.clone(),
                                track: id.clone(),
                            })
                    })
                    .collect::<Result<Vec<_>, _>>()?;

                Ok(Playlist {
                    id: entry.id,
                    name: entry.name,
                    cover: entry.cover,
                    tracks: resolved,
                })
            })
            .collect::<Result<Vec<_>, CatalogError>>()?;

        Ok(Self { tracks, playlists })
    }

    /// Number of tracks (always at least one).
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn tracks(&self) -> &[Arc<Track>] {
        &self.tracks
    }

    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index).map(Arc::as_ref)
    }

    /// Catalog index of the track with `id`.
    pub fn position(&self, id: &TrackId) -> Option<usize> {
        self.tracks.iter().position(|t| &t.id == id)
    }

    pub fn contains(&self, id: &TrackId) -> bool {
        self.position(id).is_some()
    }

    pub fn playlists(&self) -> &[Playlist] {
        &self.playlists
    }

    #[cfg(test)]
    pub fn playlist(&self, id: &str) -> Option<&Playlist> {
        self.playlists.iter().find(|p| p.id == id)
    }
}
