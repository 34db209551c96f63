//! Side panels: playlists (with drill-down) and favorites.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph, Wrap},
};

use crate::app::{App, Focus};

use super::{accent, format_mmss, pane_block};

const PREVIEW_TITLES: usize = 3;

fn highlight() -> Style {
    Style::default().add_modifier(Modifier::REVERSED)
}

pub(super) fn draw_playlists(frame: &mut Frame, app: &App, area: Rect) {
    let session = app.session();
    let focused = app.focus == Focus::Playlists;
    let color = accent(session.current_track());
    let playlists = session.catalog().playlists();

    let mut state = ListState::default();

    if let Some(playlist) = app.open_playlist.and_then(|p| playlists.get(p)) {
        let block = pane_block(format!(" {} ", playlist.name), focused, color)
            .title_bottom(" esc: back ");
        if playlist.is_empty() {
            let hint = Paragraph::new("This playlist has no songs.")
                .block(block)
                .wrap(Wrap { trim: true })
                .dim();
            frame.render_widget(hint, area);
            return;
        }

        let items: Vec<ListItem> = playlist
            .tracks
            .iter()
            .map(|t| {
                let marker = if t.id == session.current_track().id {
                    "▶ "
                } else {
                    "  "
                };
                ListItem::new(Line::from(vec![
                    Span::raw(marker),
                    Span::raw(t.title.clone()).bold(),
                    Span::raw(format!(" · {}", t.artist)),
                    Span::raw(format!("  {}", format_mmss(t.duration_secs))).dim(),
                ]))
            })
            .collect();

        let title = format!(
            " {} · {} songs · {} ",
            playlist.name,
            playlist.len(),
            format_mmss(playlist.total_secs())
        );
        let list = List::new(items)
            .block(block.title(title))
            .highlight_style(highlight());
        if focused {
            state.select(Some(app.playlist_track_cursor));
        }
        frame.render_stateful_widget(list, area, &mut state);
        return;
    }

    let items: Vec<ListItem> = playlists
        .iter()
        .map(|p| {
            let preview = p
                .tracks
                .iter()
                .take(PREVIEW_TITLES)
                .map(|t| t.title.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            ListItem::new(vec![
                Line::from(vec![
                    Span::raw(p.name.clone()).bold(),
                    Span::raw(format!("  {} songs", p.len())).dim(),
                ]),
                Line::from(format!("  {preview}")).dim(),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(pane_block(" playlists ".to_string(), focused, color))
        .highlight_style(highlight());
    if focused {
        state.select(Some(app.playlist_cursor));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

pub(super) fn draw_favorites(frame: &mut Frame, app: &App, area: Rect) {
    let session = app.session();
    let focused = app.focus == Focus::Favorites;
    let color = accent(session.current_track());
    let favorites = session.favorites();

    let noun = if favorites.len() == 1 { "song" } else { "songs" };
    let block = pane_block(format!(" favorites · {} {noun} ", favorites.len()), focused, color)
        .title_bottom(" a: play all ");

    if favorites.is_empty() {
        let hint = Paragraph::new("Press f on a song to add it here.")
            .block(block)
            .wrap(Wrap { trim: true })
            .dim();
        frame.render_widget(hint, area);
        return;
    }

    let items: Vec<ListItem> = favorites
        .iter()
        .map(|t| {
            ListItem::new(Line::from(vec![
                Span::raw("♥ "),
                Span::raw(t.title.clone()).bold(),
                Span::raw(format!(" · {}", t.artist)),
            ]))
        })
        .collect();

    let list = List::new(items).block(block).highlight_style(highlight());
    let mut state = ListState::default();
    if focused {
        state.select(Some(app.favorites_cursor));
    }
    frame.render_stateful_widget(list, area, &mut state);
}
