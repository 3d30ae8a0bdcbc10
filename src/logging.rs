//! Tracing setup
//!
//! CLI mode logs to stderr so stdout stays clean for output. TUI mode owns
//! the terminal, so it logs to a file instead.

use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

pub const DEFAULT_FILTER: &str = "reeltui=info";

fn env_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose { "reeltui=debug" } else { DEFAULT_FILTER })
    })
}

/// Compact logs on stderr
pub fn init_stderr(verbose: bool) {
    // A subscriber may already be installed (tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbose))
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .try_init();
}

/// Append logs to `path`, creating parent directories as needed
pub fn init_file(path: &Path, verbose: bool) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbose))
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| anyhow!("failed to install log subscriber: {}", e))
}
