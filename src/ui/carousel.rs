//! The song carousel: the current track centered, its neighbours around it.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style, Stylize},
    text::Line,
    widgets::{Block, Borders, Paragraph},
};

use crate::app::{App, Focus};

use super::{accent, format_mmss, pane_block};

pub(super) const HEIGHT: u16 = 8;
const SLOT_WIDTH: u16 = 24;

/// Catalog indices shown in a carousel of `slots` cards centered on
/// `current`, wrapping around. `slots` is reduced to fit `len` and made odd.
pub(super) fn window(current: usize, len: usize, slots: usize) -> Vec<usize> {
    if len == 0 {
        return Vec::new();
    }
    let mut slots = slots.clamp(1, len);
    if slots % 2 == 0 {
        slots -= 1;
    }
    let half = slots / 2;
    (0..slots)
        .map(|k| (current + len * (half + 1) + k - half) % len)
        .collect()
}

pub(super) fn draw(frame: &mut Frame, app: &App, area: Rect) {
    let session = app.session();
    let catalog = session.catalog();
    let focused = app.focus == Focus::Carousel;

    let outer = pane_block(" carousel ".to_string(), focused, accent(session.current_track()));
    let inner = outer.inner(area);
    frame.render_widget(outer, area);

    let fit = usize::from(inner.width / SLOT_WIDTH).max(1);
    let indices = window(session.current_index(), catalog.len(), fit);
    if indices.is_empty() {
        return;
    }

    let slots = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, indices.len() as u32); indices.len()])
        .split(inner);

    for (slot, &i) in slots.iter().zip(indices.iter()) {
        let Some(track) = catalog.get(i) else {
            continue;
        };
        let is_current = i == session.current_index();
        let color = accent(track);

        let heart = if session.is_favorite(&track.id) { " ♥" } else { "" };
        let badge = match (is_current, session.is_playing()) {
            (true, true) => "▶ ",
            (true, false) => "❚❚ ",
            _ => "",
        };

        let mut lines = vec![
            Line::from(format!("{badge}{}{heart}", track.title)).bold(),
            Line::from(track.artist.as_str()),
            Line::from(format_mmss(track.duration_secs)).dim(),
        ];
        if !is_current {
            lines = lines.into_iter().map(|l| l.dim()).collect();
        }

        let border = if is_current {
            Style::default().fg(color).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(color).add_modifier(Modifier::DIM)
        };

        let card = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(border)
                    .title(format!(" {} ", i + 1))
                    .title_alignment(Alignment::Center),
            );
        frame.render_widget(card, *slot);
    }
}
