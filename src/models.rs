//! Data structures and types for reeltui
//!
//! Contains the shared models used across the application:
//! - **Movies**: catalog records as returned by TMDB
//! - **Sorting**: the (field, order) pair that governs result ordering
//! - **Decades**: static date ranges used to scope discovery queries

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Movie Models (TMDB)
// =============================================================================

/// A single movie record from the catalog
///
/// Records are never mutated locally; a new fetch replaces them wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: u64,
    pub title: String,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub overview: String,
    /// `YYYY-MM-DD`, empty when unknown
    pub release_date: String,
    pub vote_average: f64,
    pub vote_count: u64,
    pub popularity: f64,
    pub original_language: String,
    pub genre_ids: Vec<u32>,
    pub adult: bool,
}

impl Movie {
    /// Release year, if the date carries one
    pub fn year(&self) -> Option<u16> {
        extract_year(&self.release_date)
    }

    /// Year for display, "N/A" when unknown
    pub fn year_label(&self) -> String {
        self.year()
            .map(|y| y.to_string())
            .unwrap_or_else(|| "N/A".to_string())
    }
}

impl fmt::Display for Movie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let year_str = self.year().map(|y| format!(" ({})", y)).unwrap_or_default();
        write!(f, "{}{} - ⭐ {:.1}", self.title, year_str, self.vote_average)
    }
}

/// Extract year from a date string like "2022-03-04"
pub fn extract_year(date: &str) -> Option<u16> {
    date.get(..4).and_then(|y| y.parse().ok())
}

// =============================================================================
// Sort Models
// =============================================================================

/// Field a result set can be ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    #[default]
    Popularity,
    ReleaseDate,
}

impl SortField {
    /// Cycle to the other field
    pub fn next(self) -> Self {
        match self {
            SortField::Popularity => SortField::ReleaseDate,
            SortField::ReleaseDate => SortField::Popularity,
        }
    }

    /// Field name understood by the discovery endpoint's `sort_by`
    pub fn discover_key(self) -> &'static str {
        match self {
            SortField::Popularity => "popularity",
            SortField::ReleaseDate => "primary_release_date",
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortField::Popularity => write!(f, "Popularity"),
            SortField::ReleaseDate => write!(f, "Release Date"),
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn toggle(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Asc => write!(f, "Ascending"),
            SortOrder::Desc => write!(f, "Descending"),
        }
    }
}

/// Sort specification: which field, which direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: SortField,
    pub order: SortOrder,
}

impl SortSpec {
    pub fn new(field: SortField, order: SortOrder) -> Self {
        Self { field, order }
    }

    /// `sort_by` value for the discovery endpoint, e.g. `popularity.desc`
    pub fn discover_param(&self) -> String {
        format!("{}.{}", self.field.discover_key(), self.order.as_str())
    }
}

impl fmt::Display for SortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let arrow = match self.order {
            SortOrder::Asc => "↑",
            SortOrder::Desc => "↓",
        };
        write!(f, "{} {}", self.field, arrow)
    }
}

// =============================================================================
// Decade Filter
// =============================================================================

/// A ten-year window used to scope discovery queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Decade {
    pub label: &'static str,
    pub start_year: u16,
    pub end_year: u16,
}

impl Decade {
    /// Inclusive lower bound, `{start}-01-01`
    pub fn start_date(&self) -> String {
        format!("{}-01-01", self.start_year)
    }

    /// Inclusive upper bound, `{end}-12-31`
    pub fn end_date(&self) -> String {
        format!("{}-12-31", self.end_year)
    }

    /// Look up a decade by its label (case-insensitive, e.g. "1990s")
    pub fn by_label(label: &str) -> Option<&'static Decade> {
        DECADES.iter().find(|d| d.label.eq_ignore_ascii_case(label.trim()))
    }
}

impl fmt::Display for Decade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label)
    }
}

pub const DECADES: [Decade; 8] = [
    Decade { label: "1950s", start_year: 1950, end_year: 1959 },
    Decade { label: "1960s", start_year: 1960, end_year: 1969 },
    Decade { label: "1970s", start_year: 1970, end_year: 1979 },
    Decade { label: "1980s", start_year: 1980, end_year: 1989 },
    Decade { label: "1990s", start_year: 1990, end_year: 1999 },
    Decade { label: "2000s", start_year: 2000, end_year: 2009 },
    Decade { label: "2010s", start_year: 2010, end_year: 2019 },
    Decade { label: "2020s", start_year: 2020, end_year: 2029 },
];

// =============================================================================
// Tests
// =============================================================================
