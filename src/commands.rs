//! CLI Command Handlers
//!
//! Implements the CLI commands on top of a [`Catalog`].
//! Each handler takes CLI args and Output, returns ExitCode.

use serde::Serialize;
use tracing::warn;

use crate::api::{image_url, Catalog, TmdbError};
use crate::cli::{DiscoverCmd, ExitCode, ImageCmd, InfoCmd, Output, SearchCmd};
use crate::models::{Decade, Movie, DECADES};

/// Map a catalog failure onto a scriptable exit code
pub fn exit_code_for(err: &anyhow::Error) -> ExitCode {
    match err.downcast_ref::<TmdbError>() {
        Some(TmdbError::NotFound) => ExitCode::NotFound,
        Some(TmdbError::RequestFailed(_)) | Some(TmdbError::ServerError(_)) => {
            ExitCode::NetworkError
        }
        Some(TmdbError::Unauthorized) | Some(TmdbError::InvalidResponse(_)) | None => {
            ExitCode::Error
        }
    }
}

fn movie_lines(movies: &[Movie]) -> String {
    if movies.is_empty() {
        return "No movies found".to_string();
    }
    movies
        .iter()
        .map(|m| format!("{:>8}  {}", m.id, m))
        .collect::<Vec<_>>()
        .join("\n")
}

fn print_or_fail<T: Serialize>(
    output: &Output,
    data: T,
    human: impl FnOnce(&T) -> String,
) -> ExitCode {
    match output.print(data, human) {
        Ok(()) => ExitCode::Success,
        Err(e) => output.error(format!("Failed to serialize: {}", e), ExitCode::Error),
    }
}

// =============================================================================
// Search Command
// =============================================================================

pub async fn search_cmd(cmd: SearchCmd, catalog: &dyn Catalog, output: &Output) -> ExitCode {
    if cmd.query.trim().is_empty() {
        return output.error("Search query must not be blank", ExitCode::InvalidArgs);
    }

    let sort = cmd.sort.spec();
    output.info(format!("Searching for: {} ({})", cmd.query, sort));

    match catalog.search_movies(&cmd.query, Some(sort)).await {
        Ok(mut results) => {
            results.truncate(cmd.limit);
            print_or_fail(output, results, |r| movie_lines(r))
        }
        Err(e) => {
            warn!(error = %e, "search failed");
            output.error(format!("Search failed: {}", e), exit_code_for(&e))
        }
    }
}

// =============================================================================
// Discover Command
// =============================================================================

pub async fn discover_cmd(cmd: DiscoverCmd, catalog: &dyn Catalog, output: &Output) -> ExitCode {
    let decade = match cmd.resolve_decade() {
        Ok(decade) => decade,
        Err(msg) => return output.error(msg, ExitCode::InvalidArgs),
    };

    let sort = cmd.sort.spec();
    let gte = decade.map(|d| d.start_date());
    let lte = decade.map(|d| d.end_date());
    output.info(format!(
        "Discovering {} ({})",
        decade.map(|d| d.label).unwrap_or("all years"),
        sort
    ));

    match catalog
        .discover_movies(Some(sort), gte.as_deref(), lte.as_deref())
        .await
    {
        Ok(mut results) => {
            results.truncate(cmd.limit);
            print_or_fail(output, results, |r| movie_lines(r))
        }
        Err(e) => {
            warn!(error = %e, "discover failed");
            output.error(format!("Discover failed: {}", e), exit_code_for(&e))
        }
    }
}

// =============================================================================
// Info Command
// =============================================================================

pub async fn info_cmd(cmd: InfoCmd, catalog: &dyn Catalog, output: &Output) -> ExitCode {
    output.info(format!("Getting info for: {}", cmd.id));

    match catalog.movie_by_id(cmd.id).await {
        Ok(movie) => print_or_fail(output, movie, |m| {
            let overview = if m.overview.is_empty() {
                "No overview available."
            } else {
                m.overview.as_str()
            };
            format!(
                "{}\nReleased: {}\nRating: ⭐ {:.1} ({} votes)\nLanguage: {}\nPopularity: {:.0}\n\n{}",
                m.title,
                if m.release_date.is_empty() { "N/A" } else { m.release_date.as_str() },
                m.vote_average,
                m.vote_count,
                m.original_language.to_uppercase(),
                m.popularity,
                overview
            )
        }),
        Err(e) => {
            warn!(id = cmd.id, error = %e, "movie lookup failed");
            let code = exit_code_for(&e);
            let msg = if code == ExitCode::NotFound {
                format!("Movie {} not found", cmd.id)
            } else {
                format!("Movie info failed: {}", e)
            };
            output.error(msg, code)
        }
    }
}

// =============================================================================
// Decades Command
// =============================================================================

#[derive(Debug, Serialize)]
struct DecadeInfo {
    label: &'static str,
    start: String,
    end: String,
}

impl From<&Decade> for DecadeInfo {
    fn from(d: &Decade) -> Self {
        Self {
            label: d.label,
            start: d.start_date(),
            end: d.end_date(),
        }
    }
}

pub fn decades_cmd(output: &Output) -> ExitCode {
    let decades: Vec<DecadeInfo> = DECADES.iter().map(DecadeInfo::from).collect();
    print_or_fail(output, decades, |ds| {
        ds.iter()
            .map(|d| format!("{}  {} .. {}", d.label, d.start, d.end))
            .collect::<Vec<_>>()
            .join("\n")
    })
}

// =============================================================================
// Image Command
// =============================================================================

#[derive(Debug, Serialize)]
struct ImageInfo {
    url: String,
}

pub fn image_cmd(cmd: ImageCmd, output: &Output) -> ExitCode {
    if cmd.size.trim().is_empty() {
        return output.error("Image size must not be blank", ExitCode::InvalidArgs);
    }
    let url = image_url(Some(cmd.path.trim()), cmd.size.trim());
    print_or_fail(output, ImageInfo { url }, |i| i.url.clone())
}
