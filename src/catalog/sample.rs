//! Built-in sample catalog used when no catalog file is configured.

use super::error::CatalogError;
use super::model::{Catalog, PlaylistEntry, Track, TrackId};

/// One sample track: id, title, artist, album, cover, seconds, favorite, color.
type TrackRow = (&'static str, &'static str, &'static str, &'static str, &'static str, u32, bool, &'static str);

const TRACKS: [TrackRow; 5] = [
    ("1", "Neon Dreams", "Synthwave Artist", "Electric Nights", "album1.jpg", 245, false, "#8B5CF6"),
    ("2", "Ocean Waves", "Ambient Collective", "Deep Blue", "album2.jpg", 320, true, "#06B6D4"),
    ("3", "Sunset Meditation", "Peaceful Sounds", "Golden Hour", "album3.jpg", 280, false, "#F97316"),
    ("4", "Cosmic Journey", "Space Sounds", "Galaxy", "album1.jpg", 195, true, "#EC4899"),
    ("5", "Digital Rain", "Cyber Collective", "Matrix", "album2.jpg", 267, false, "#10B981"),
];

fn track(row: &TrackRow) -> Track {
    let &(id, title, artist, album, cover, duration_secs, starts_favorite, color) = row;
    Track {
        id: TrackId::new(id),
        title: title.to_string(),
        artist: artist.to_string(),
        album: album.to_string(),
        cover: cover.to_string(),
        duration_secs,
        starts_favorite,
        color: color.to_string(),
    }
}

fn playlist(id: &str, name: &str, cover: &str, tracks: &[&str]) -> PlaylistEntry {
    PlaylistEntry {
        id: id.to_string(),
        name: name.to_string(),
        cover: cover.to_string(),
        tracks: tracks.iter().map(|&t| TrackId::new(t)).collect(),
    }
}

/// Five sample tracks and three playlists.
pub fn sample_catalog() -> Result<Catalog, CatalogError> {
    let tracks = TRACKS.iter().map(track).collect();

    let playlists = vec![
        playlist("1", "Chill Vibes", "album2.jpg", &["2", "3", "5"]),
        playlist("2", "Electronic Mix", "album1.jpg", &["1", "4"]),
        playlist("3", "Focus Music", "album3.jpg", &["3", "5"]),
    ];

    Catalog::new(tracks, playlists)
}
