//! API clients for external services
//!
//! - TMDB: movie search, discovery and lookup

pub mod tmdb;

pub use tmdb::{image_url, Catalog, TmdbClient, TmdbError};
