//! Search screen
//!
//! Result grid for the current query, with the client-side sort indicator
//! in the border.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::app::{App, LoadingState};
use crate::models::SortSpec;
use crate::ui::grid::render_grid;
use crate::ui::Theme;

/// Border title showing the active sort and its keys
pub fn sort_indicator(sort: SortSpec) -> Line<'static> {
    Line::from(vec![
        Span::styled(" Sort: ", Theme::dimmed()),
        Span::styled(sort.to_string(), Theme::accent()),
        Span::styled("  [s]", Theme::keybind()),
        Span::styled(" field ", Theme::dimmed()),
        Span::styled("[o]", Theme::keybind()),
        Span::styled(" order ", Theme::dimmed()),
    ])
    .right_aligned()
}

/// Centered single-line message used for loading, empty and error states
pub fn render_message(frame: &mut Frame, area: Rect, text: &str, style: Style) {
    let vertical = area.height.saturating_sub(1) / 2;
    let target = Rect {
        y: area.y + vertical,
        height: area.height.min(1),
        ..area
    };
    frame.render_widget(
        Paragraph::new(text.to_string())
            .style(style)
            .alignment(Alignment::Center),
        target,
    );
}

pub fn render_search(frame: &mut Frame, area: Rect, app: &App) {
    let search = &app.search;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Theme::border())
        .title(Span::styled(
            format!(" RESULTS ({}) ", search.results.len()),
            Theme::title(),
        ))
        .title(sort_indicator(search.sort));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    match &search.loading {
        LoadingState::Loading => {
            render_message(frame, inner, "⟳ Searching...", Theme::loading());
        }
        LoadingState::Error(msg) => {
            render_message(frame, inner, msg, Theme::error());
        }
        LoadingState::Idle => {
            render_message(
                frame,
                inner,
                "Press / and type a title to search the catalog",
                Theme::dimmed(),
            );
        }
        LoadingState::Loaded if search.results.is_empty() => {
            render_message(frame, inner, "No movies found", Theme::dimmed());
        }
        LoadingState::Loaded => {
            render_grid(frame, inner, &search.results, &search.grid);
        }
    }
}
