use std::path::Path;
use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::info;

use crate::app::App;
use crate::catalog::{Catalog, CatalogError, load_catalog_file, sample_catalog};
use crate::config;
use crate::playback::{PlaybackSession, Player, PlayerCmd};

use super::logging::LogInitError;

/// Failures that keep the player from starting at all.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("logging setup failed")]
    Logging(#[from] LogInitError),
    #[error("failed to load the catalog")]
    Catalog(#[from] CatalogError),
}

pub fn load_catalog(path: Option<&Path>) -> Result<Catalog, CatalogError> {
    match path {
        Some(p) => load_catalog_file(p),
        None => {
            info!("no catalog configured, using the built-in sample");
            sample_catalog()
        }
    }
}

/// Build the session, player and view model from `settings`.
pub fn build_app(catalog: Catalog, settings: &config::Settings, now: Instant) -> App {
    let session = PlaybackSession::new(catalog)
        .with_restart_threshold(settings.playback.restart_threshold_secs);
    let player = Player::new(
        session,
        Duration::from_millis(settings.playback.tick_interval_ms),
    );
    let mut app = App::new(player, Duration::from_millis(settings.ui.toast_ms));
    apply_playback_defaults(&mut app, settings, now);
    app
}

pub fn apply_playback_defaults(app: &mut App, settings: &config::Settings, now: Instant) {
    if settings.playback.shuffle {
        app.dispatch(PlayerCmd::SetShuffled(true), now);
    }
    if settings.ui.start_collapsed {
        app.dispatch(PlayerCmd::SetCollapsed(true), now);
    }
    app.show_playlists = settings.ui.show_playlists;
    app.show_favorites = settings.ui.show_favorites;
}
