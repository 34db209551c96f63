use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{debug, info};

use crate::app::App;
use crate::config;
use crate::mpris::{ControlCmd, MprisHandle};
use crate::playback::PlayerCmd;
use crate::runtime::mpris_sync::update_mpris;
use crate::ui;

/// Upper bound on how long the loop blocks waiting for input.
const IDLE_POLL: Duration = Duration::from_millis(250);

/// State tracked by the runtime event loop across iterations.
#[derive(Debug, Default)]
pub struct EventLoopState {
    /// Internal two-key prefix state used for `gg` handling.
    pub pending_gg: bool,
    /// Last-known current index as emitted to MPRIS.
    pub last_mpris_index: Option<usize>,
    /// Last-known transport state as emitted to MPRIS.
    pub last_mpris_playing: bool,
}

/// Main terminal event loop: runs due ticks, handles input and MPRIS
/// commands, and redraws. Returns `Ok(())` when shutdown is requested.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    mpris: Option<&MprisHandle>,
    control_rx: &mpsc::Receiver<ControlCmd>,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        let now = Instant::now();
        app.on_tick(now);
        app.expire_toast(now);

        if let Some(m) = mpris {
            sync_mpris(m, app, state);
        }

        terminal.draw(|f| ui::draw(f, app, &settings.ui, &settings.controls))?;

        while let Ok(cmd) = control_rx.try_recv() {
            if handle_control_cmd(cmd, app, Instant::now()) {
                info!("quit requested over MPRIS");
                return Ok(());
            }
        }

        let timeout = poll_timeout(app, Instant::now());

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, settings, app, state, Instant::now()) {
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Keep MPRIS in sync whatever caused the change: keys, media keys or
/// auto-advance. Metadata is re-sent only when the track or transport changed.
pub(super) fn sync_mpris(mpris: &MprisHandle, app: &App, state: &mut EventLoopState) {
    let index = app.session().current_index();
    let playing = app.session().is_playing();
    if state.last_mpris_index != Some(index) || state.last_mpris_playing != playing {
        update_mpris(mpris, app);
        state.last_mpris_index = Some(index);
        state.last_mpris_playing = playing;
    } else {
        mpris.set_position(app.session().elapsed());
    }
}

/// Block for input until the next tick is due, at most `IDLE_POLL`.
pub(super) fn poll_timeout(app: &App, now: Instant) -> Duration {
    app.player
        .next_deadline()
        .map_or(IDLE_POLL, |due| due.saturating_duration_since(now).min(IDLE_POLL))
}

/// Apply a remote-control request. Returns `true` on quit.
pub(super) fn handle_control_cmd(cmd: ControlCmd, app: &mut App, now: Instant) -> bool {
    debug!(?cmd, "control command");
    match cmd {
        ControlCmd::Quit => return true,
        ControlCmd::Play => {
            app.dispatch(PlayerCmd::SetPlaying(true), now);
        }
        ControlCmd::Pause => {
            app.dispatch(PlayerCmd::SetPlaying(false), now);
        }
        ControlCmd::PlayPause => app.toggle_play_pause(now),
        ControlCmd::Stop => {
            app.dispatch(PlayerCmd::SetPlaying(false), now);
            app.dispatch(PlayerCmd::Seek(0), now);
        }
        ControlCmd::Next => {
            app.dispatch(PlayerCmd::Next, now);
        }
        ControlCmd::Prev => {
            app.dispatch(PlayerCmd::Prev, now);
        }
    }
    false
}

/// Apply a key press. Returns `true` on quit.
pub(super) fn handle_key_event(
    key: KeyEvent,
    settings: &config::Settings,
    app: &mut App,
    state: &mut EventLoopState,
    now: Instant,
) -> bool {
    let scrub = i64::from(settings.controls.scrub_seconds);

    if key.code == KeyCode::Char('g') && !key.modifiers.contains(KeyModifiers::CONTROL) {
        if state.pending_gg {
            state.pending_gg = false;
            app.cursor_to_edge(false, now);
        } else {
            state.pending_gg = true;
        }
        return false;
    }
    // any other key cancels a pending `g`
    state.pending_gg = false;

    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return true,
        KeyCode::Char('q') => return true,
        KeyCode::Tab => app.cycle_focus(true),
        KeyCode::BackTab => app.cycle_focus(false),
        KeyCode::Char('j') | KeyCode::Down => app.move_cursor(true, now),
        KeyCode::Char('k') | KeyCode::Up => app.move_cursor(false, now),
        KeyCode::Left => app.carousel_step(false, now),
        KeyCode::Right => app.carousel_step(true, now),
        KeyCode::Char('G') => app.cursor_to_edge(true, now),
        KeyCode::Enter => app.activate(now),
        KeyCode::Esc => app.back(),
        KeyCode::Char('p') | KeyCode::Char(' ') => app.toggle_play_pause(now),
        KeyCode::Char('l') => {
            app.dispatch(PlayerCmd::Next, now);
        }
        KeyCode::Char('h') => {
            app.dispatch(PlayerCmd::Prev, now);
        }
        KeyCode::Char('L') => app.seek_by(scrub, now),
        KeyCode::Char('H') => app.seek_by(-scrub, now),
        KeyCode::Char('s') => app.toggle_shuffle(now),
        KeyCode::Char('f') => app.toggle_favorite_focused(now),
        KeyCode::Char('F') => app.toggle_favorites_panel(),
        KeyCode::Char('P') => app.toggle_playlists_panel(),
        KeyCode::Char('c') => app.toggle_collapsed(now),
        KeyCode::Char('a') => app.play_all_favorites(now),
        _ => {}
    }

    false
}
