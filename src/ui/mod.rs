//! Terminal UI components
//!
//! Built with ratatui. The shell draws the header (brand, screen tabs and
//! search box) and status bar, and hands the content area to the screen
//! renderer for the current screen.

pub mod detail;
pub mod gallery;
pub mod grid;
pub mod search;
pub mod theme;

pub use theme::Theme;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::{App, InputMode, Screen};

const HEADER_HEIGHT: u16 = 3;

/// Grid columns available for a terminal of `width` columns
pub fn grid_columns(width: u16) -> usize {
    // Content blocks draw a one-cell border on each side
    grid::columns_for_width(width.saturating_sub(2))
}

/// Main render function - dispatches to the screen renderer
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    frame.render_widget(Clear, area);
    frame.render_widget(
        Block::default().style(Style::default().bg(Theme::BACKGROUND)),
        area,
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT), // Header
            Constraint::Min(1),                // Content
            Constraint::Length(1),             // Status bar
        ])
        .split(area);

    render_header(frame, chunks[0], app);
    match app.screen {
        Screen::Search => search::render_search(frame, chunks[1], app),
        Screen::Gallery => gallery::render_gallery(frame, chunks[1], app),
        Screen::Detail => detail::render_detail(frame, chunks[1], app),
    }
    render_status_bar(frame, chunks[2], app);
}

/// Screen tabs; the detail screen has no tab of its own
fn tabs(screen: Screen) -> Line<'static> {
    let tab = |label: &'static str, active: bool| {
        Span::styled(
            label,
            if active {
                Theme::tab_active()
            } else {
                Theme::tab_inactive()
            },
        )
    };
    Line::from(vec![
        tab(" Search ", screen == Screen::Search),
        Span::raw(" "),
        tab(" Gallery ", screen == Screen::Gallery),
    ])
}

/// Render the header with brand, tabs and search box
fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let header_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(14), // Brand
            Constraint::Length(22), // Tabs
            Constraint::Min(1),     // Search box
        ])
        .split(area);

    let bordered = || {
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Theme::border())
    };

    let brand = Paragraph::new(Line::from(vec![
        Span::styled("REEL", Theme::brand()),
        Span::styled("TUI", Theme::title()),
    ]))
    .alignment(Alignment::Center)
    .block(bordered());
    frame.render_widget(brand, header_chunks[0]);

    let tab_bar = Paragraph::new(tabs(app.screen))
        .alignment(Alignment::Center)
        .block(bordered());
    frame.render_widget(tab_bar, header_chunks[1]);

    let editing = app.input_mode == InputMode::Editing;
    let search_text = if editing {
        let (before, after) = app.search.split_at_cursor();
        format!("⌕ {}│{}", before, after)
    } else if app.search.query.is_empty() {
        "⌕ Type / to search...".to_string()
    } else {
        format!("⌕ {}", app.search.query)
    };

    let search_box = Paragraph::new(search_text)
        .style(if editing {
            Theme::input().fg(Theme::PRIMARY)
        } else {
            Theme::input()
        })
        .block(
            bordered()
                .border_style(if editing {
                    Theme::border_focused()
                } else {
                    Theme::border()
                })
                .title(Span::styled(" SEARCH ", Theme::title())),
        );
    frame.render_widget(search_box, header_chunks[2]);
}

fn key_hints(app: &App) -> &'static str {
    if app.input_mode == InputMode::Editing {
        return " type to search  ↵/esc:done ";
    }
    match app.screen {
        Screen::Search => " /:search  ←↑↓→:move  ↵:open  tab:gallery  q:quit ",
        Screen::Gallery => " 0-8:decade  ←↑↓→:move  ↵:open  tab:search  q:quit ",
        Screen::Detail => " p:previous  n:next  b/esc:close  q:quit ",
    }
}

/// Render status bar at bottom
fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mode_indicator = match app.input_mode {
        InputMode::Normal => Span::styled(
            " NORMAL ",
            Style::default().fg(Theme::BACKGROUND).bg(Theme::PRIMARY),
        ),
        InputMode::Editing => Span::styled(
            " INSERT ",
            Style::default().fg(Theme::BACKGROUND).bg(Theme::ACCENT),
        ),
    };

    let route = Span::styled(
        format!(" {} ", app.current_route()),
        Style::default().fg(Theme::DIM),
    );

    let status_line = Line::from(vec![
        mode_indicator,
        route,
        Span::raw("│"),
        Span::styled(key_hints(app), Theme::dimmed()),
    ]);

    let status = Paragraph::new(status_line).style(Theme::status_bar());
    frame.render_widget(status, area);
}
