//! TMDB (The Movie Database) API client
//!
//! Provides keyword search, filtered discovery and single-movie lookup.
//! API docs: https://developer.themoviedb.org/docs

use anyhow::Result;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::{Movie, SortSpec};
use crate::sort::sort_movies;

pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";
pub const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/";
pub const PLACEHOLDER_IMAGE: &str = "/placeholder-movie.png";
pub const DEFAULT_IMAGE_SIZE: &str = "w500";
pub const BACKDROP_IMAGE_SIZE: &str = "w1280";

const LANGUAGE: &str = "en-US";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// TMDB API error types
#[derive(Error, Debug)]
pub enum TmdbError {
    #[error("Resource not found (404)")]
    NotFound,

    #[error("Unauthorized (401), check TMDB_API_KEY")]
    Unauthorized,

    #[error("Server error: {0}")]
    ServerError(u16),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
}

/// Remote catalog operations the views depend on
#[async_trait]
pub trait Catalog: Send + Sync {
    async fn search_movies(&self, query: &str, sort: Option<SortSpec>) -> Result<Vec<Movie>>;

    async fn discover_movies(
        &self,
        sort: Option<SortSpec>,
        release_gte: Option<&str>,
        release_lte: Option<&str>,
    ) -> Result<Vec<Movie>>;

    async fn movie_by_id(&self, id: u64) -> Result<Movie>;
}

/// TMDB API client
pub struct TmdbClient {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl TmdbClient {
    /// Create a new TMDB client with the given API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Create a client with a custom base URL (override or testing)
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        let client = http_client(DEFAULT_TIMEOUT).unwrap_or_else(|e| {
            warn!(error = %e, "http client setup failed, requests have no timeout");
            reqwest::Client::new()
        });
        Self::from_parts(api_key.into(), base_url.into(), client)
    }

    /// Create a client with an explicit per-request timeout
    pub fn with_options(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = http_client(timeout)?;
        Ok(Self::from_parts(api_key.into(), base_url.into(), client))
    }

    fn from_parts(api_key: String, base_url: String, client: reqwest::Client) -> Self {
        Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Make an authenticated GET request. No retries: failures go straight back to the caller.
    async fn get<T: for<'de> Deserialize<'de>>(&self, endpoint: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!(%url, "tmdb request");

        let response = self
            .client
            .get(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(TmdbError::from)?;

        match response.status() {
            StatusCode::OK => {
                let body = response.text().await.map_err(TmdbError::from)?;
                let parsed: T = serde_json::from_str(&body).map_err(|e| {
                    TmdbError::InvalidResponse(format!("JSON parse error: {}", e))
                })?;
                Ok(parsed)
            }
            StatusCode::NOT_FOUND => Err(TmdbError::NotFound.into()),
            StatusCode::UNAUTHORIZED => Err(TmdbError::Unauthorized.into()),
            status => Err(TmdbError::ServerError(status.as_u16()).into()),
        }
    }

    /// Keyword search. A blank query returns no results without touching the network.
    pub async fn search_movies(&self, query: &str, sort: Option<SortSpec>) -> Result<Vec<Movie>> {
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }

        let endpoint = format!(
            "/search/movie?query={}&include_adult=false&language={}&page=1",
            urlencoding::encode(query),
            LANGUAGE
        );

        let response: PageResponse = self.get(&endpoint).await?;
        let mut movies = response.into_movies();

        // Search ignores sort_by server-side
        if let Some(spec) = sort {
            sort_movies(&mut movies, spec);
        }
        Ok(movies)
    }

    /// Filtered discovery. Sorting is delegated to the service via `sort_by`.
    pub async fn discover_movies(
        &self,
        sort: Option<SortSpec>,
        release_gte: Option<&str>,
        release_lte: Option<&str>,
    ) -> Result<Vec<Movie>> {
        let endpoint = discover_endpoint(sort, release_gte, release_lte);
        let response: PageResponse = self.get(&endpoint).await?;
        Ok(response.into_movies())
    }

    /// Get a single movie by ID
    pub async fn movie_by_id(&self, id: u64) -> Result<Movie> {
        let endpoint = format!("/movie/{}?language={}", id, LANGUAGE);
        let response: MovieRaw = self.get(&endpoint).await?;
        Ok(response.into_movie())
    }
}

#[async_trait]
impl Catalog for TmdbClient {
    async fn search_movies(&self, query: &str, sort: Option<SortSpec>) -> Result<Vec<Movie>> {
        TmdbClient::search_movies(self, query, sort).await
    }

    async fn discover_movies(
        &self,
        sort: Option<SortSpec>,
        release_gte: Option<&str>,
        release_lte: Option<&str>,
    ) -> Result<Vec<Movie>> {
        TmdbClient::discover_movies(self, sort, release_gte, release_lte).await
    }

    async fn movie_by_id(&self, id: u64) -> Result<Movie> {
        TmdbClient::movie_by_id(self, id).await
    }
}

fn http_client(timeout: Duration) -> Result<reqwest::Client, TmdbError> {
    Ok(reqwest::Client::builder().timeout(timeout).build()?)
}

/// Build the discovery endpoint; date bounds are omitted when absent
fn discover_endpoint(
    sort: Option<SortSpec>,
    release_gte: Option<&str>,
    release_lte: Option<&str>,
) -> String {
    let mut endpoint = format!(
        "/discover/movie?include_adult=false&include_video=false&language={}&page=1&sort_by={}",
        LANGUAGE,
        sort.unwrap_or_default().discover_param()
    );
    if let Some(gte) = release_gte {
        endpoint.push_str(&format!(
            "&primary_release_date.gte={}",
            urlencoding::encode(gte)
        ));
    }
    if let Some(lte) = release_lte {
        endpoint.push_str(&format!(
            "&primary_release_date.lte={}",
            urlencoding::encode(lte)
        ));
    }
    endpoint
}

/// Build an image URL from a path fragment and a size tier.
///
/// Absent or empty fragments resolve to the placeholder image.
pub fn image_url(path: Option<&str>, size: &str) -> String {
    match path {
        Some(p) if !p.is_empty() => format!("{}{}{}", IMAGE_BASE_URL, size, p),
        _ => PLACEHOLDER_IMAGE.to_string(),
    }
}

// =============================================================================
// Response Structures (internal deserialization)
// =============================================================================

#[derive(Debug, Deserialize)]
struct PageResponse {
    #[serde(default)]
    page: u32,
    results: Vec<MovieRaw>,
    #[serde(default)]
    total_pages: u32,
    #[serde(default)]
    total_results: u32,
}

impl PageResponse {
    fn into_movies(self) -> Vec<Movie> {
        debug!(
            page = self.page,
            total_pages = self.total_pages,
            total_results = self.total_results,
            "tmdb page"
        );
        self.results.into_iter().map(MovieRaw::into_movie).collect()
    }
}

#[derive(Debug, Deserialize)]
struct MovieRaw {
    id: u64,
    title: Option<String>,
    poster_path: Option<String>,
    backdrop_path: Option<String>,
    overview: Option<String>,
    release_date: Option<String>,
    vote_average: Option<f64>,
    vote_count: Option<u64>,
    popularity: Option<f64>,
    original_language: Option<String>,
    // List endpoints send genre_ids, the single-movie endpoint sends genres
    genre_ids: Option<Vec<u32>>,
    genres: Option<Vec<GenreRaw>>,
    adult: Option<bool>,
}

impl MovieRaw {
    fn into_movie(self) -> Movie {
        let genre_ids = match (self.genre_ids, self.genres) {
            (Some(ids), _) => ids,
            (None, Some(genres)) => genres.into_iter().map(|g| g.id).collect(),
            (None, None) => Vec::new(),
        };

        Movie {
            id: self.id,
            title: self.title.unwrap_or_default(),
            poster_path: self.poster_path.filter(|p| !p.is_empty()),
            backdrop_path: self.backdrop_path.filter(|p| !p.is_empty()),
            overview: self.overview.unwrap_or_default(),
            release_date: self.release_date.unwrap_or_default(),
            vote_average: self.vote_average.unwrap_or(0.0),
            vote_count: self.vote_count.unwrap_or(0),
            popularity: self.popularity.unwrap_or(0.0),
            original_language: self.original_language.unwrap_or_default(),
            genre_ids,
            adult: self.adult.unwrap_or(false),
        }
    }
}

#[derive(Debug, Deserialize)]
struct GenreRaw {
    id: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SortField, SortOrder};

    #[test]
    fn test_image_url() {
        assert_eq!(
            image_url(Some("/abc.jpg"), DEFAULT_IMAGE_SIZE),
            "https://image.tmdb.org/t/p/w500/abc.jpg"
        );
        assert_eq!(
            image_url(Some("/abc.jpg"), BACKDROP_IMAGE_SIZE),
            "https://image.tmdb.org/t/p/w1280/abc.jpg"
        );
    }

    #[test]
    fn test_image_url_placeholder() {
        assert_eq!(image_url(None, DEFAULT_IMAGE_SIZE), PLACEHOLDER_IMAGE);
        assert_eq!(image_url(Some(""), DEFAULT_IMAGE_SIZE), PLACEHOLDER_IMAGE);
    }

    #[test]
    fn test_discover_endpoint_defaults() {
        let endpoint = discover_endpoint(None, None, None);
        assert!(endpoint.contains("sort_by=popularity.desc"));
        assert!(endpoint.contains("include_adult=false"));
        assert!(endpoint.contains("include_video=false"));
        assert!(!endpoint.contains("primary_release_date.gte"));
        assert!(!endpoint.contains("primary_release_date.lte"));
    }

    #[test]
    fn test_discover_endpoint_with_bounds() {
        let sort = SortSpec::new(SortField::ReleaseDate, SortOrder::Asc);
        let endpoint = discover_endpoint(Some(sort), Some("1980-01-01"), Some("1989-12-31"));
        assert!(endpoint.contains("sort_by=primary_release_date.asc"));
        assert!(endpoint.contains("&primary_release_date.gte=1980-01-01"));
        assert!(endpoint.contains("&primary_release_date.lte=1989-12-31"));
    }

    #[test]
    fn test_movie_raw_genres_fallback() {
        let raw: MovieRaw = serde_json::from_str(
            r#"{"id": 550, "title": "Fight Club", "genres": [{"id": 18, "name": "Drama"}]}"#,
        )
        .unwrap();
        let movie = raw.into_movie();
        assert_eq!(movie.genre_ids, vec![18]);
        assert_eq!(movie.release_date, "");
        assert!(movie.poster_path.is_none());
    }

    #[test]
    fn test_movie_raw_empty_paths_are_absent() {
        let raw: MovieRaw =
            serde_json::from_str(r#"{"id": 1, "poster_path": "", "backdrop_path": null}"#).unwrap();
        let movie = raw.into_movie();
        assert!(movie.poster_path.is_none());
        assert!(movie.backdrop_path.is_none());
    }

    #[test]
    fn test_blank_query_short_circuits() {
        // Unroutable base URL: any request would fail
        let client = TmdbClient::with_base_url("key", "http://127.0.0.1:9");
        let results = tokio_test::block_on(client.search_movies("   ", None)).unwrap();
        assert!(results.is_empty());
    }
}
