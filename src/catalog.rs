//! Track catalog: the fixed, ordered list of tracks available to a session
//! and the read-only playlists that reference them.

mod error;
mod load;
mod model;
mod sample;

pub use error::CatalogError;
pub use load::load_catalog_file;
pub use model::*;
pub use sample::sample_catalog;
