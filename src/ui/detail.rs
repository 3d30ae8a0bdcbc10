//! Detail screen
//!
//! Full attributes of one movie, plus previous/next controls when the
//! screen was entered from a result list.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use crate::api::image_url;
use crate::api::tmdb::{BACKDROP_IMAGE_SIZE, DEFAULT_IMAGE_SIZE};
use crate::app::{App, DetailState, LoadingState, MOVIE_NOT_FOUND};
use crate::models::Movie;
use crate::ui::search::render_message;
use crate::ui::Theme;

/// Release date text, `N/A` when unknown
pub fn release_label(movie: &Movie) -> String {
    if movie.release_date.is_empty() {
        "N/A".to_string()
    } else {
        movie.release_date.clone()
    }
}

pub fn rating_label(movie: &Movie) -> String {
    format!("⭐ {:.1} ({} votes)", movie.vote_average, movie.vote_count)
}

pub fn popularity_label(movie: &Movie) -> String {
    format!("{:.0}", movie.popularity)
}

pub fn overview_text(movie: &Movie) -> &str {
    if movie.overview.trim().is_empty() {
        "No overview available."
    } else {
        &movie.overview
    }
}

/// Large hero image: backdrop, falling back to the poster
pub fn hero_url(movie: &Movie) -> String {
    let path = movie
        .backdrop_path
        .as_deref()
        .or(movie.poster_path.as_deref());
    image_url(path, BACKDROP_IMAGE_SIZE)
}

fn field<'a>(label: &'a str, value: String, style: Style) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("{:<12}", label), Theme::dimmed()),
        Span::styled(value, style),
    ])
}

fn movie_lines(movie: &Movie) -> Vec<Line<'_>> {
    let genres = if movie.genre_ids.is_empty() {
        "N/A".to_string()
    } else {
        movie
            .genre_ids
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    };

    vec![
        Line::from(Span::styled(movie.title.clone(), Theme::title())),
        Line::from(""),
        field("Released", release_label(movie), Theme::input()),
        field("Rating", rating_label(movie), Theme::rating(movie.vote_average)),
        field("Language", movie.original_language.to_uppercase(), Theme::input()),
        field("Popularity", popularity_label(movie), Theme::input()),
        field("Genres", genres, Theme::input()),
        field("Backdrop", hero_url(movie), Theme::accent()),
        field(
            "Poster",
            image_url(movie.poster_path.as_deref(), DEFAULT_IMAGE_SIZE),
            Theme::accent(),
        ),
        Line::from(""),
        Line::from(Span::styled("OVERVIEW", Theme::title())),
        Line::from(Span::styled(overview_text(movie).to_string(), Theme::input())),
    ]
}

/// Previous / close / next hints, with unavailable moves shown disabled
pub fn controls(detail: &DetailState) -> Line<'static> {
    let style = |enabled: bool| {
        if enabled {
            Theme::control()
        } else {
            Theme::control_disabled()
        }
    };

    Line::from(vec![
        Span::styled("[p]", Theme::keybind()),
        Span::styled(" ◀ Previous ", style(detail.has_previous())),
        Span::raw("   "),
        Span::styled("[b]", Theme::keybind()),
        Span::styled(" Close ", Theme::control()),
        Span::raw("   "),
        Span::styled("[n]", Theme::keybind()),
        Span::styled(" Next ▶ ", style(detail.has_next())),
    ])
    .centered()
}

pub fn render_detail(frame: &mut Frame, area: Rect, app: &App) {
    let Some(detail) = app.detail.as_ref() else {
        render_message(frame, area, MOVIE_NOT_FOUND, Theme::error());
        return;
    };

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Theme::border_focused())
        .title(Span::styled(" MOVIE ", Theme::title()));
    if let Some(context) = &detail.context {
        block = block.title(
            Line::from(Span::styled(
                format!(" {}/{} ", context.index() + 1, context.len()),
                Theme::accent(),
            ))
            .right_aligned(),
        );
    }

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner);

    match (&detail.loading, &detail.movie) {
        (LoadingState::Loading, _) => {
            render_message(frame, chunks[0], "⟳ Loading movie...", Theme::loading());
        }
        (LoadingState::Error(msg), _) => {
            render_message(frame, chunks[0], msg, Theme::error());
        }
        (_, Some(movie)) => {
            let body = Paragraph::new(movie_lines(movie)).wrap(Wrap { trim: true });
            frame.render_widget(body, chunks[0]);
        }
        (_, None) => {
            render_message(frame, chunks[0], MOVIE_NOT_FOUND, Theme::error());
        }
    }

    frame.render_widget(Paragraph::new(controls(detail)), chunks[1]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::NavigationContext;
    use std::sync::Arc;

    fn sample_movie() -> Movie {
        Movie {
            id: 155,
            title: "The Dark Knight".to_string(),
            poster_path: Some("/qJ2tW6WMUDux911r6m7haRef0WH.jpg".to_string()),
            backdrop_path: None,
            overview: String::new(),
            release_date: "2008-07-16".to_string(),
            vote_average: 8.516,
            vote_count: 32000,
            popularity: 123.456,
            original_language: "en".to_string(),
            genre_ids: vec![18, 28],
            adult: false,
        }
    }

    #[test]
    fn test_labels() {
        let mut movie = sample_movie();
        assert_eq!(release_label(&movie), "2008-07-16");
        assert_eq!(rating_label(&movie), "⭐ 8.5 (32000 votes)");
        assert_eq!(popularity_label(&movie), "123");
        assert_eq!(overview_text(&movie), "No overview available.");

        movie.release_date.clear();
        assert_eq!(release_label(&movie), "N/A");
    }

    #[test]
    fn test_hero_falls_back_to_poster() {
        let mut movie = sample_movie();
        assert_eq!(
            hero_url(&movie),
            "https://image.tmdb.org/t/p/w1280/qJ2tW6WMUDux911r6m7haRef0WH.jpg"
        );
        movie.poster_path = None;
        assert_eq!(hero_url(&movie), crate::api::tmdb::PLACEHOLDER_IMAGE);
    }

    #[test]
    fn test_controls_disabled_at_boundaries() {
        let movies: Arc<[Movie]> = Arc::from(vec![sample_movie()]);
        let detail = DetailState {
            id: 155,
            movie: Some(sample_movie()),
            context: NavigationContext::new(movies, 0, crate::app::Route::Search),
            loading: LoadingState::Loaded,
            pending: None,
        };
        let line = controls(&detail);
        let disabled = line
            .spans
            .iter()
            .filter(|s| s.style == Theme::control_disabled())
            .count();
        assert_eq!(disabled, 2);
    }
}
