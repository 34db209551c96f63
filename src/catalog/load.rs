//! Catalog files: a TOML description of tracks and playlists.
//!
//! ```toml
//! [[tracks]]
//! id = "1"
//! title = "Neon Dreams"
//! artist = "Synthwave Artist"
//! album = "Electric Nights"
//! cover = "album1.jpg"
//! duration = 245
//! favorite = false
//! color = "#8B5CF6"
//!
//! [[playlists]]
//! id = "1"
//! name = "Electronic Mix"
//! cover = "album1.jpg"
//! tracks = ["1"]
//! ```

use std::path::Path;

use serde::Deserialize;

use super::error::CatalogError;
use super::model::{Catalog, PlaylistEntry, Track};

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    tracks: Vec<Track>,
    #[serde(default)]
    playlists: Vec<PlaylistEntry>,
}

/// Parse and validate a catalog from TOML text.
pub fn parse_catalog(text: &str) -> Result<Catalog, CatalogError> {
    let file: CatalogFile = toml::from_str(text)?;
    Catalog::new(file.tracks, file.playlists)
}

/// Read, parse and validate a catalog file.
pub fn load_catalog_file(path: &Path) -> Result<Catalog, CatalogError> {
    let text = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let catalog = parse_catalog(&text)?;
    tracing::info!(
        path = %path.display(),
        tracks = catalog.len(),
        playlists = catalog.playlists().len(),
        "loaded catalog file"
    );
    Ok(catalog)
}
