//! reeltui - terminal movie discovery for TMDB
//!
//! Search the catalog by keyword, browse popular movies by decade, and page
//! through movie details without losing your place in the result list.
//!
//! # Modules
//!
//! - `models` - Movie, sort specification and decade filters
//! - `sort` - Client-side result ordering
//! - `api` - TMDB catalog client
//! - `app` - Application state, screens and navigation
//! - `dispatch` - Runs catalog requests off the UI loop
//! - `ui` - TUI components
//! - `cli` / `commands` - Scriptable subcommands
//! - `config` / `logging` - Configuration and tracing setup

pub mod api;
pub mod app;
pub mod cli;
pub mod commands;
pub mod config;
pub mod dispatch;
pub mod logging;
pub mod models;
pub mod sort;
pub mod ui;

// Re-export commonly used types
pub use models::{Decade, Movie, SortField, SortOrder, SortSpec, DECADES};

pub use api::{Catalog, TmdbClient, TmdbError};
pub use app::{App, Route, Screen};
pub use config::Config;
pub use dispatch::Dispatcher;
