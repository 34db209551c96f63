//! The mini player: the current track, transport status and progress.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
};

use crate::app::App;
use crate::config::UiSettings;

use super::{accent, time_text};

pub(super) fn draw(frame: &mut Frame, app: &App, area: Rect, ui: &UiSettings) {
    let session = app.session();
    let track = session.current_track();
    let color = accent(track);

    let status = if session.is_playing() { "▶ Playing" } else { "❚❚ Paused" };
    let heart = if session.is_favorite(&track.id) { "♥" } else { "♡" };
    let shuffle = if session.shuffled() { "Shuffle: ON" } else { "Shuffle: OFF" };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(format!(" {status} "));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut gauge = Gauge::default()
        .gauge_style(Style::default().fg(color))
        .ratio(session.progress().clamp(0.0, 1.0));
    if let Some(label) = time_text(session, ui) {
        gauge = gauge.label(label);
    }

    let lines = if session.collapsed() {
        vec![Line::from(vec![
            Span::raw(track.title.clone()).bold(),
            Span::raw(format!(" · {}  ", track.artist)),
            Span::raw(heart).fg(color),
        ])]
    } else {
        vec![
            Line::from(vec![
                Span::raw(track.title.clone()).bold(),
                Span::raw("  "),
                Span::raw(heart).fg(color),
            ]),
            Line::from(format!("{} · {}", track.artist, track.album)),
            Line::from(format!(
                "{shuffle} · {} of {}",
                session.current_index() + 1,
                session.catalog().len()
            ))
            .dim(),
        ]
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(lines.len() as u16), Constraint::Length(1)])
        .split(inner);

    frame.render_widget(Paragraph::new(lines), rows[0]);
    frame.render_widget(gauge, rows[1]);
}
