//! UI rendering helpers for the terminal user interface.
//!
//! Everything here is a pure function of the `App` model and the UI settings;
//! rendering never mutates playback state.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap},
};
use std::{collections::BTreeMap, sync::LazyLock};

use crate::app::{App, Focus};
use crate::catalog::Track;
use crate::config::{ControlsSettings, TimeField, UiSettings};
use crate::playback::PlaybackSession;

mod carousel;
mod library;
mod panels;
mod player;

static CONTROLS_MAP: LazyLock<BTreeMap<String, String>> = LazyLock::new(|| {
    let mut map: BTreeMap<String, String> = BTreeMap::new();
    map.insert("tab".to_string(), "switch pane".to_string());
    map.insert("j/k".to_string(), "up/down".to_string());
    map.insert("←/→".to_string(), "carousel".to_string());
    map.insert("enter".to_string(), "play selected".to_string());
    map.insert("space/p".to_string(), "play/pause".to_string());
    map.insert("h/l".to_string(), "prev/next song".to_string());
    // H/L is filled dynamically from config.
    map.insert("s".to_string(), "shuffle".to_string());
    map.insert("f".to_string(), "favorite".to_string());
    map.insert("F/P".to_string(), "favorites/playlists".to_string());
    map.insert("a".to_string(), "play favorites".to_string());
    map.insert("c".to_string(), "collapse".to_string());
    map.insert("q".to_string(), "quit".to_string());
    map
});

/// Render the controls help text, incorporating scrub seconds.
fn controls_text(scrub_seconds: u32) -> String {
    let order = [
        "tab", "j/k", "←/→", "enter", "space/p", "h/l", "H/L", "s", "f", "F/P", "a", "c", "q",
    ];
    order
        .iter()
        .filter_map(|k| {
            if *k == "H/L" {
                Some(format!("[H/L] scrub -/+{}s", scrub_seconds))
            } else {
                CONTROLS_MAP.get(*k).map(|v| format!("[{}] {}", k, v))
            }
        })
        .collect::<Vec<String>>()
        .join(" | ")
}

/// Format whole seconds as `m:ss`.
pub(crate) fn format_mmss(secs: impl Into<u64>) -> String {
    let secs = secs.into();
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// Build the progress time text (elapsed/total/remaining) per `UiSettings`.
pub(crate) fn time_text(session: &PlaybackSession, ui: &UiSettings) -> Option<String> {
    if ui.time_fields.is_empty() {
        return None;
    }

    let parts: Vec<String> = ui
        .time_fields
        .iter()
        .map(|f| match f {
            TimeField::Elapsed => format_mmss(session.elapsed()),
            TimeField::Total => format_mmss(session.current_track().duration_secs),
            TimeField::Remaining => format!("-{}", format_mmss(session.remaining())),
        })
        .collect();

    Some(parts.join(&ui.time_separator))
}

/// The track's accent color, or a neutral fallback.
pub(crate) fn accent(track: &Track) -> Color {
    track
        .accent_rgb()
        .map_or(Color::Magenta, |(r, g, b)| Color::Rgb(r, g, b))
}

/// Bordered block for a pane; focused panes get a bold accent border.
pub(crate) fn pane_block(title: String, focused: bool, color: Color) -> Block<'static> {
    let block = Block::default().borders(Borders::ALL).title(title);
    if focused {
        block.border_style(Style::default().fg(color).add_modifier(Modifier::BOLD))
    } else {
        block
    }
}

/// Compute a rectangle of the given size in the top-right corner of `r`.
fn top_right_rect(width: u16, height: u16, r: Rect) -> Rect {
    let width = width.min(r.width);
    let height = height.min(r.height);
    Rect {
        x: r.x + r.width.saturating_sub(width + 1),
        y: r.y + 1,
        width,
        height,
    }
}

/// Render the entire UI into the provided `frame` using `app` state and settings.
pub fn draw(frame: &mut Frame, app: &App, ui_settings: &UiSettings, controls: &ControlsSettings) {
    let session = app.session();
    let color = accent(session.current_track());
    let player_height = if session.collapsed() { 4 } else { 7 };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(carousel::HEIGHT),
            Constraint::Min(6),
            Constraint::Length(player_height),
            Constraint::Length(4),
        ])
        .split(frame.area());

    // Header
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color))
                .title(" encore ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    carousel::draw(frame, app, chunks[1]);

    // Library plus optional side panels.
    let side_open = app.show_playlists || app.show_favorites;
    let main = if side_open {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(chunks[2])
    } else {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(100)])
            .split(chunks[2])
    };
    library::draw(frame, app, main[0], app.focus == Focus::Library);

    if side_open {
        match (app.show_playlists, app.show_favorites) {
            (true, true) => {
                let side = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                    .split(main[1]);
                panels::draw_playlists(frame, app, side[0]);
                panels::draw_favorites(frame, app, side[1]);
            }
            (true, false) => panels::draw_playlists(frame, app, main[1]),
            _ => panels::draw_favorites(frame, app, main[1]),
        }
    }

    player::draw(frame, app, chunks[3], ui_settings);

    let footer = Paragraph::new(controls_text(controls.scrub_seconds))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[4]);

    // Toast overlay
    if let Some(toast) = &app.toast {
        let area = top_right_rect(42, 4, frame.area());
        frame.render_widget(Clear, area);
        let body = Paragraph::new(toast.body.as_str())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(color))
                    .title(format!(" {} ", toast.title))
                    .padding(Padding {
                        left: 1,
                        right: 1,
                        top: 0,
                        bottom: 0,
                    }),
            )
            .wrap(Wrap { trim: true });
        frame.render_widget(body, area);
    }
}
