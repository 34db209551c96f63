//! Application model types: `App`, `Focus` and `Toast`.
//!
//! `App` owns the `Player` (and through it the one playback session) and the
//! purely presentational state the views need: which pane has focus, list
//! cursors, open panels and the current notification.

use std::time::{Duration, Instant};

use tracing::debug;

use crate::catalog::{Track, TrackId};
use crate::playback::{PlaybackSession, Player, PlayerCmd, TickOutcome};

/// Pane receiving list navigation and `Enter`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Focus {
    #[default]
    Carousel,
    Library,
    Playlists,
    Favorites,
}

/// A short-lived notification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub title: String,
    pub body: String,
    pub expires_at: Instant,
}

/// The main application model.
pub struct App {
    pub player: Player,
    pub focus: Focus,

    pub library_cursor: usize,
    pub playlist_cursor: usize,
    /// Playlist whose tracks are listed in the playlists panel.
    pub open_playlist: Option<usize>,
    /// Cursor inside the open playlist.
    pub playlist_track_cursor: usize,
    pub favorites_cursor: usize,

    pub show_playlists: bool,
    pub show_favorites: bool,

    pub toast: Option<Toast>,
    toast_duration: Duration,
}

impl App {
    /// Create a new `App` around `player`.
    pub fn new(player: Player, toast_duration: Duration) -> Self {
        Self {
            player,
            focus: Focus::Carousel,
            library_cursor: 0,
            playlist_cursor: 0,
            open_playlist: None,
            playlist_track_cursor: 0,
            favorites_cursor: 0,
            show_playlists: false,
            show_favorites: false,
            toast: None,
            toast_duration,
        }
    }

    pub fn session(&self) -> &PlaybackSession {
        self.player.session()
    }

    /// Send a command to the player. Rejected commands are logged and dropped.
    pub fn dispatch(&mut self, cmd: PlayerCmd, now: Instant) -> bool {
        match self.player.send(cmd, now) {
            Ok(()) => true,
            Err(e) => {
                debug!(error = %e, "ignoring rejected command");
                false
            }
        }
    }

    /// Run a due tick, if any.
    pub fn on_tick(&mut self, now: Instant) -> Option<TickOutcome> {
        self.player.poll_tick(now)
    }

    /// Panes that are currently visible, in Tab order.
    pub fn visible_panes(&self) -> Vec<Focus> {
        let mut panes = vec![Focus::Carousel, Focus::Library];
        if self.show_playlists {
            panes.push(Focus::Playlists);
        }
        if self.show_favorites {
            panes.push(Focus::Favorites);
        }
        panes
    }

    /// Move focus to the next (or previous) visible pane.
    pub fn cycle_focus(&mut self, forward: bool) {
        let panes = self.visible_panes();
        let pos = panes.iter().position(|&p| p == self.focus).unwrap_or(0);
        let len = panes.len();
        let next = if forward {
            (pos + 1) % len
        } else {
            (pos + len - 1) % len
        };
        self.focus = panes[next];
    }

    pub fn toggle_playlists_panel(&mut self) {
        self.show_playlists = !self.show_playlists;
        if self.show_playlists {
            self.focus = Focus::Playlists;
        } else {
            self.open_playlist = None;
            self.ensure_focus_visible();
        }
    }

    pub fn toggle_favorites_panel(&mut self) {
        self.show_favorites = !self.show_favorites;
        if self.show_favorites {
            self.focus = Focus::Favorites;
            self.clamp_favorites_cursor();
        } else {
            self.ensure_focus_visible();
        }
    }

    fn ensure_focus_visible(&mut self) {
        if !self.visible_panes().contains(&self.focus) {
            self.focus = Focus::Library;
        }
    }

    /// Focus the neighbouring carousel track without touching the transport.
    pub fn carousel_step(&mut self, forward: bool, now: Instant) {
        let len = self.session().catalog().len();
        let current = self.session().current_index();
        let target = if forward {
            (current + 1) % len
        } else {
            (current + len - 1) % len
        };
        self.dispatch(PlayerCmd::Select(target), now);
    }

    /// Move the cursor of the focused pane down (or up), wrapping around.
    pub fn move_cursor(&mut self, down: bool, now: Instant) {
        match self.focus {
            Focus::Carousel => self.carousel_step(down, now),
            Focus::Library => {
                let len = self.session().catalog().len();
                self.library_cursor = step(self.library_cursor, len, down);
            }
            Focus::Playlists => match self.open_playlist {
                Some(p) => {
                    let len = self.playlist_len(p);
                    self.playlist_track_cursor = step(self.playlist_track_cursor, len, down);
                }
                None => {
                    let len = self.session().catalog().playlists().len();
                    self.playlist_cursor = step(self.playlist_cursor, len, down);
                }
            },
            Focus::Favorites => {
                let len = self.session().favorites().len();
                self.favorites_cursor = step(self.favorites_cursor, len, down);
            }
        }
    }

    /// Jump the cursor of the focused pane to the first (or last) entry.
    pub fn cursor_to_edge(&mut self, last: bool, now: Instant) {
        let len = match self.focus {
            Focus::Carousel => {
                let target = if last {
                    self.session().catalog().len() - 1
                } else {
                    0
                };
                self.dispatch(PlayerCmd::Select(target), now);
                return;
            }
            Focus::Library => self.session().catalog().len(),
            Focus::Playlists => match self.open_playlist {
                Some(p) => self.playlist_len(p),
                None => self.session().catalog().playlists().len(),
            },
            Focus::Favorites => self.session().favorites().len(),
        };
        let pos = if last { len.saturating_sub(1) } else { 0 };
        match self.focus {
            Focus::Library => self.library_cursor = pos,
            Focus::Playlists if self.open_playlist.is_some() => self.playlist_track_cursor = pos,
            Focus::Playlists => self.playlist_cursor = pos,
            Focus::Favorites => self.favorites_cursor = pos,
            Focus::Carousel => {}
        }
    }

    /// Act on the focused item (`Enter`).
    pub fn activate(&mut self, now: Instant) {
        match self.focus {
            Focus::Carousel => self.toggle_play_pause(now),
            Focus::Library => {
                if self.dispatch(PlayerCmd::SelectAndPlay(self.library_cursor), now) {
                    self.toast_now_playing(now);
                }
            }
            Focus::Favorites => {
                if let Some(id) = self.favorite_at_cursor() {
                    self.play_by_id(id, now);
                }
            }
            Focus::Playlists => match self.open_playlist {
                Some(p) => {
                    if let Some(id) = self.playlist_track_at(p, self.playlist_track_cursor) {
                        self.play_by_id(id, now);
                    }
                }
                None => {
                    if self.playlist_cursor < self.session().catalog().playlists().len() {
                        self.open_playlist = Some(self.playlist_cursor);
                        self.playlist_track_cursor = 0;
                    }
                }
            },
        }
    }

    /// Close the open playlist.
    pub fn back(&mut self) {
        if self.focus == Focus::Playlists && self.open_playlist.is_some() {
            self.open_playlist = None;
        }
    }

    pub fn toggle_play_pause(&mut self, now: Instant) {
        self.dispatch(PlayerCmd::TogglePlayPause, now);
        if self.session().is_playing() {
            self.toast_now_playing(now);
        } else {
            let body = by_line(self.session().current_track());
            self.show_toast("Paused", body, now);
        }
    }

    pub fn toggle_shuffle(&mut self, now: Instant) {
        let shuffled = !self.session().shuffled();
        self.dispatch(PlayerCmd::SetShuffled(shuffled), now);
        let title = if shuffled { "Shuffle on" } else { "Shuffle off" };
        self.show_toast(title, String::new(), now);
    }

    pub fn toggle_collapsed(&mut self, now: Instant) {
        let collapsed = !self.session().collapsed();
        self.dispatch(PlayerCmd::SetCollapsed(collapsed), now);
    }

    /// Toggle the favorite flag of the focused item: the highlighted row in
    /// the library, favorites or open playlist, otherwise the current track.
    pub fn toggle_favorite_focused(&mut self, now: Instant) {
        let id = match self.focus {
            Focus::Library => self
                .session()
                .catalog()
                .get(self.library_cursor)
                .map(|t| t.id.clone()),
            Focus::Favorites => self.favorite_at_cursor(),
            Focus::Playlists => self
                .open_playlist
                .and_then(|p| self.playlist_track_at(p, self.playlist_track_cursor)),
            Focus::Carousel => None,
        }
        .unwrap_or_else(|| self.session().current_track().id.clone());

        self.toggle_favorite(id, now);
    }

    pub fn toggle_favorite(&mut self, id: TrackId, now: Instant) {
        let title = self
            .session()
            .catalog()
            .position(&id)
            .and_then(|i| self.session().catalog().get(i))
            .map(|t| t.title.clone());

        if !self.dispatch(PlayerCmd::ToggleFavorite(id.clone()), now) {
            return;
        }
        let added = self.session().is_favorite(&id);
        let heading = if added {
            "Added to Favorites"
        } else {
            "Removed from Favorites"
        };
        self.show_toast(heading, title.unwrap_or_default(), now);
        self.clamp_favorites_cursor();
    }

    /// Start playing the first favorite.
    pub fn play_all_favorites(&mut self, now: Instant) {
        let first = self.session().favorites().first().map(|t| t.id.clone());
        match first {
            Some(id) => self.play_by_id(id, now),
            None => self.show_toast("No favorites yet", String::new(), now),
        }
    }

    pub fn seek_by(&mut self, delta: i64, now: Instant) {
        self.dispatch(PlayerCmd::SeekBy(delta), now);
    }

    fn play_by_id(&mut self, id: TrackId, now: Instant) {
        if self.dispatch(PlayerCmd::PlayTrack(id), now) {
            self.toast_now_playing(now);
        }
    }

    fn toast_now_playing(&mut self, now: Instant) {
        let body = by_line(self.session().current_track());
        self.show_toast("Now Playing", body, now);
    }

    pub fn show_toast(&mut self, title: &str, body: String, now: Instant) {
        self.toast = Some(Toast {
            title: title.to_string(),
            body,
            expires_at: now + self.toast_duration,
        });
    }

    /// Drop the toast once it has expired. Returns true when one was removed.
    pub fn expire_toast(&mut self, now: Instant) -> bool {
        if self.toast.as_ref().is_some_and(|t| now >= t.expires_at) {
            self.toast = None;
            true
        } else {
            false
        }
    }

    fn favorite_at_cursor(&self) -> Option<TrackId> {
        self.session()
            .favorites()
            .get(self.favorites_cursor)
            .map(|t| t.id.clone())
    }

    fn playlist_len(&self, playlist: usize) -> usize {
        self.session()
            .catalog()
            .playlists()
            .get(playlist)
            .map_or(0, |p| p.len())
    }

    fn playlist_track_at(&self, playlist: usize, pos: usize) -> Option<TrackId> {
        self.session()
            .catalog()
            .playlists()
            .get(playlist)
            .and_then(|p| p.tracks.get(pos))
            .map(|t| t.id.clone())
    }

    fn clamp_favorites_cursor(&mut self) {
        let len = self.session().favorites().len();
        if self.favorites_cursor >= len {
            self.favorites_cursor = len.saturating_sub(1);
        }
    }
}

/// "<title> by <artist>"
pub fn by_line(track: &Track) -> String {
    format!("{} by {}", track.title, track.artist)
}

fn step(pos: usize, len: usize, down: bool) -> usize {
    if len == 0 {
        return 0;
    }
    if down {
        (pos + 1) % len
    } else {
        (pos + len - 1) % len
    }
}
