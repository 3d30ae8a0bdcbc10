//! Card grid shared by the search and gallery screens
//!
//! Each movie is a bordered card with title, year, rating and poster
//! availability. The grid scrolls by whole rows to keep the selection visible.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::api::image_url;
use crate::api::tmdb::{DEFAULT_IMAGE_SIZE, PLACEHOLDER_IMAGE};
use crate::app::GridState;
use crate::models::Movie;
use crate::ui::Theme;

pub const CARD_WIDTH: u16 = 28;
pub const CARD_HEIGHT: u16 = 6;

/// How many cards fit side by side in `width` columns
pub fn columns_for_width(width: u16) -> usize {
    (width / CARD_WIDTH).max(1) as usize
}

/// First visible row so that `selected_row` stays on screen
fn first_visible_row(selected_row: usize, visible_rows: usize) -> usize {
    if visible_rows == 0 || selected_row < visible_rows {
        0
    } else {
        selected_row + 1 - visible_rows
    }
}

/// Render `movies` as a grid of cards inside `area`
pub fn render_grid(frame: &mut Frame, area: Rect, movies: &[Movie], grid: &GridState) {
    let columns = columns_for_width(area.width);
    let visible_rows = (area.height / CARD_HEIGHT).max(1) as usize;
    let first_row = first_visible_row(grid.selected / columns, visible_rows);

    for (i, movie) in movies
        .iter()
        .enumerate()
        .skip(first_row * columns)
        .take(visible_rows * columns)
    {
        let row = (i / columns - first_row) as u16;
        let col = (i % columns) as u16;
        let card_area = Rect {
            x: area.x + col * CARD_WIDTH,
            y: area.y + row * CARD_HEIGHT,
            width: CARD_WIDTH.min(area.width),
            height: CARD_HEIGHT.min(area.height.saturating_sub(row * CARD_HEIGHT)),
        };
        render_card(frame, card_area, movie, i == grid.selected);
    }
}

fn render_card(frame: &mut Frame, area: Rect, movie: &Movie, selected: bool) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(if selected {
            BorderType::Thick
        } else {
            BorderType::Rounded
        })
        .border_style(Theme::card_border(selected))
        .style(Theme::card());

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let width = inner.width as usize;
    let title_style = if selected {
        Theme::title()
    } else {
        Style::default().fg(Theme::TEXT).add_modifier(Modifier::BOLD)
    };

    let lines = vec![
        Line::from(Span::styled(truncate(&movie.title, width), title_style)),
        Line::from(Span::styled(movie.year_label(), Theme::year())),
        Line::from(Span::styled(
            format!("⭐ {:.1}", movie.vote_average),
            Theme::rating(movie.vote_average),
        )),
        Line::from(Span::styled(poster_label(movie), Theme::dimmed())),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}

fn poster_label(movie: &Movie) -> &'static str {
    if image_url(movie.poster_path.as_deref(), DEFAULT_IMAGE_SIZE) == PLACEHOLDER_IMAGE {
        "▢ no poster"
    } else {
        "▣ poster"
    }
}

/// Cut `s` to `max` characters, marking the cut with an ellipsis
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out: String = s.chars().take(max - 1).collect();
    out.push('…');
    out
}
