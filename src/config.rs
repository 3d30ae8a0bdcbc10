//! Configuration management for reeltui
//!
//! Handles config file loading and environment overrides.
//! Config is stored at ~/.config/reeltui/config.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::api::tmdb::DEFAULT_BASE_URL;
use crate::api::TmdbClient;

pub const DEFAULT_DEBOUNCE_MS: u64 = 500;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// TMDB API read access token
    pub tmdb_api_key: Option<String>,
    /// Base URL override for the catalog API
    pub tmdb_base_url: Option<String>,
    /// Delay after the last keystroke before a search is issued
    pub debounce_ms: Option<u64>,
    /// Per-request transport timeout
    pub request_timeout_secs: Option<u64>,
    /// Where TUI mode writes its log
    pub log_file: Option<PathBuf>,
}

impl Config {
    /// Get config file path (~/.config/reeltui/config.toml)
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("reeltui").join("config.toml"))
    }

    /// Load config from the default path, or return default if missing or unreadable
    pub fn load() -> Self {
        Self::path()
            .and_then(|p| Self::load_from(&p).ok())
            .unwrap_or_default()
    }

    /// Load config from an explicit path. Unreadable files and invalid TOML are errors.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("Invalid config {}", path.display()))
    }

    /// Apply `TMDB_API_KEY` / `TMDB_BASE_URL` from the environment on top of the file
    pub fn with_env(mut self) -> Self {
        if let Ok(key) = std::env::var("TMDB_API_KEY") {
            self.tmdb_api_key = Some(key);
        }
        if let Ok(url) = std::env::var("TMDB_BASE_URL") {
            if !url.trim().is_empty() {
                self.tmdb_base_url = Some(url);
            }
        }
        self
    }

    /// API credential. A missing key is not rejected here; the service answers 401.
    pub fn api_key(&self) -> String {
        self.tmdb_api_key.clone().unwrap_or_default()
    }

    pub fn base_url(&self) -> &str {
        self.tmdb_base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms.unwrap_or(DEFAULT_DEBOUNCE_MS))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.request_timeout_secs
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        )
    }

    /// Log file for TUI mode (~/.cache/reeltui/reeltui.log)
    pub fn log_path(&self) -> Option<PathBuf> {
        self.log_file
            .clone()
            .or_else(|| dirs::cache_dir().map(|p| p.join("reeltui").join("reeltui.log")))
    }

    /// Build a catalog client from this configuration
    pub fn tmdb_client(&self) -> Result<TmdbClient> {
        TmdbClient::with_options(self.api_key(), self.base_url(), self.request_timeout())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.tmdb_api_key.is_none());
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
        assert_eq!(config.debounce(), Duration::from_millis(500));
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.api_key(), "");
    }

    #[test]
    fn test_config_parses_toml() {
        let config: Config = toml::from_str(
            r#"
            tmdb_api_key = "token"
            tmdb_base_url = "http://localhost:8080/3"
            debounce_ms = 250
            "#,
        )
        .unwrap();
        assert_eq!(config.api_key(), "token");
        assert_eq!(config.base_url(), "http://localhost:8080/3");
        assert_eq!(config.debounce(), Duration::from_millis(250));
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_load_from_missing_file_fails() {
        let err = Config::load_from(Path::new("/nonexistent/reeltui/config.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config"));
    }

    #[test]
    fn test_load_from_reads_file() {
        let path = std::env::temp_dir().join("reeltui-config-valid.toml");
        std::fs::write(&path, "tmdb_api_key = \"k\"\ndebounce_ms = 120\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.api_key(), "k");
        assert_eq!(config.debounce(), Duration::from_millis(120));

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_load_from_rejects_invalid_toml() {
        let path = std::env::temp_dir().join("reeltui-config-invalid.toml");
        std::fs::write(&path, "tmdb_api_key = \"k\"\ndebounce_ms = \"fast\"\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().starts_with("Invalid config"));

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_client_from_config() {
        let config = Config {
            request_timeout_secs: Some(5),
            ..Config::default()
        };
        assert!(config.tmdb_client().is_ok());
    }

    #[test]
    fn test_explicit_log_file_wins() {
        let config = Config {
            log_file: Some(PathBuf::from("/tmp/reeltui-test.log")),
            ..Config::default()
        };
        assert_eq!(config.log_path(), Some(PathBuf::from("/tmp/reeltui-test.log")));
    }
}
