//! Gallery screen
//!
//! Decade filter bar above a discovery result grid.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::app::{App, LoadingState};
use crate::models::DECADES;
use crate::ui::grid::render_grid;
use crate::ui::search::{render_message, sort_indicator};
use crate::ui::Theme;

/// Filter chips: `[0] All` followed by one chip per decade
pub fn decade_bar(active: Option<usize>) -> Line<'static> {
    let chip = |key: String, label: &str, on: bool| -> Vec<Span<'static>> {
        let style = if on {
            Theme::tab_active()
        } else {
            Theme::tab_inactive()
        };
        vec![
            Span::styled(format!("[{}]", key), Theme::keybind()),
            Span::styled(format!(" {} ", label), style),
            Span::raw(" "),
        ]
    };

    let mut spans = chip("0".into(), "All", active.is_none());
    for (i, decade) in DECADES.iter().enumerate() {
        spans.extend(chip((i + 1).to_string(), decade.label, active == Some(i)));
    }
    Line::from(spans)
}

pub fn render_gallery(frame: &mut Frame, area: Rect, app: &App) {
    let gallery = &app.gallery;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(area);

    let filters = Paragraph::new(decade_bar(gallery.decade)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Theme::border())
            .title(Span::styled(" DECADE ", Theme::title())),
    );
    frame.render_widget(filters, chunks[0]);

    let heading = match gallery.active_decade() {
        Some(decade) => format!(" {} ({}) ", decade.label.to_uppercase(), gallery.results.len()),
        None => format!(" ALL MOVIES ({}) ", gallery.results.len()),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Theme::border())
        .title(Span::styled(heading, Theme::title()))
        .title(sort_indicator(gallery.sort));

    let inner = block.inner(chunks[1]);
    frame.render_widget(block, chunks[1]);

    match &gallery.loading {
        LoadingState::Idle | LoadingState::Loading => {
            render_message(frame, inner, "⟳ Loading movies...", Theme::loading());
        }
        LoadingState::Error(msg) => {
            render_message(frame, inner, msg, Theme::error());
        }
        LoadingState::Loaded if gallery.results.is_empty() => {
            render_message(frame, inner, "No movies found", Theme::dimmed());
        }
        LoadingState::Loaded => {
            render_grid(frame, inner, &gallery.results, &gallery.grid);
        }
    }
}
