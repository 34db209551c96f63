//! The full song list.

use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    widgets::{Cell, Row, Table, TableState},
};

use crate::app::App;

use super::{accent, format_mmss, pane_block};

/// Leading marker of a library row: a transport glyph for the current track,
/// otherwise the 1-based position.
pub(super) fn row_marker(index: usize, current: usize, playing: bool) -> String {
    match (index == current, playing) {
        (true, true) => "▶".to_string(),
        (true, false) => "❚❚".to_string(),
        _ => (index + 1).to_string(),
    }
}

pub(super) fn draw(frame: &mut Frame, app: &App, area: Rect, focused: bool) {
    let session = app.session();
    let current = session.current_index();
    let color = accent(session.current_track());

    let header = Row::new(["#", "Title", "Artist", "Album", "", "Time"])
        .style(Style::default().add_modifier(Modifier::BOLD));

    let rows = session.catalog().tracks().iter().enumerate().map(|(i, track)| {
        let heart = if session.is_favorite(&track.id) { "♥" } else { "" };
        let row = Row::new([
            Cell::from(row_marker(i, current, session.is_playing())),
            Cell::from(track.title.as_str()),
            Cell::from(track.artist.as_str()),
            Cell::from(track.album.as_str()),
            Cell::from(heart),
            Cell::from(format_mmss(track.duration_secs)),
        ]);
        if i == current {
            row.style(Style::default().fg(accent(track)))
        } else {
            row
        }
    });

    let title = format!(" library · {} songs ", session.catalog().len());
    let table = Table::new(
        rows,
        [
            Constraint::Length(3),
            Constraint::Percentage(35),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Length(2),
            Constraint::Length(6),
        ],
    )
    .header(header)
    .block(pane_block(title, focused, color))
    .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    let mut state = TableState::default();
    if focused {
        state.select(Some(app.library_cursor));
    }
    frame.render_stateful_widget(table, area, &mut state);
}
