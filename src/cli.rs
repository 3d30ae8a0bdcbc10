//! CLI - Command Line Interface for reeltui
//!
//! Every catalog query the TUI makes is scriptable. Output is JSON when
//! `--json` is given or stdout is not a terminal.
//!
//! # Examples
//!
//! ```bash
//! # Keyword search, newest first
//! reeltui search "blade runner" --sort release-date --order desc
//!
//! # Most popular movies of the 1980s
//! reeltui discover --decade 1980s --limit 5
//!
//! # Single movie and its poster URL
//! reeltui info 78
//! reeltui image /63N9uy8nd9j7Eog2axPQ8lbr3Wj.jpg --size w342
//!
//! # Open the TUI straight on a movie
//! reeltui --open /movie/78
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::io::IsTerminal;
use std::path::PathBuf;

use crate::api::tmdb::DEFAULT_IMAGE_SIZE;
use crate::app::Route;
use crate::models::{Decade, SortField, SortOrder, SortSpec};

// =============================================================================
// Exit Codes
// =============================================================================

/// Exit codes for CLI operations (semantic for scripting)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success
    Success = 0,
    /// General error
    Error = 1,
    /// Invalid arguments
    InvalidArgs = 2,
    /// Network error
    NetworkError = 3,
    /// Movie not found
    NotFound = 4,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> std::process::ExitCode {
        std::process::ExitCode::from(code as u8)
    }
}

// =============================================================================
// Main CLI Structure
// =============================================================================

/// reeltui - terminal movie discovery for TMDB
///
/// Run without arguments to launch interactive TUI.
/// Use subcommands for scriptable queries.
#[derive(Parser, Debug)]
#[command(
    name = "reeltui",
    version,
    about = "Terminal movie discovery client for TMDB",
    long_about = "Search the TMDB catalog, browse popular movies by decade \
                  and page through movie details from your terminal.\n\n\
                  Run without arguments to launch the interactive TUI.\n\
                  Use subcommands for automation and scripting.",
    after_help = "EXAMPLES:\n\
                  reeltui                              Launch interactive TUI\n\
                  reeltui --open /gallery              Start on the gallery\n\
                  reeltui search \"blade runner\"        Search the catalog\n\
                  reeltui discover --decade 1990s      Popular 90s movies\n\
                  reeltui info 550 --json              Movie details as JSON"
)]
pub struct Cli {
    /// Output format as JSON (default for non-TTY)
    #[arg(long, short = 'j', global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Debug-level logging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Path to config file
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Route to open the TUI on: /, /gallery or /movie/{id}
    #[arg(long, value_name = "ROUTE")]
    pub open: Option<String>,

    /// Subcommand to run (omit for TUI mode)
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Check if running in CLI mode (has subcommand)
    pub fn is_cli_mode(&self) -> bool {
        self.command.is_some()
    }

    /// Check if JSON output should be used
    pub fn should_json(&self) -> bool {
        self.json || !std::io::stdout().is_terminal()
    }

    /// Initial TUI route; unknown paths land on search
    pub fn initial_route(&self) -> Route {
        self.open
            .as_deref()
            .map(Route::parse)
            .unwrap_or_default()
    }
}

// =============================================================================
// Subcommands
// =============================================================================

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Search movies by keyword
    #[command(visible_alias = "s")]
    Search(SearchCmd),

    /// Discover popular movies, optionally within a decade
    #[command(visible_alias = "d")]
    Discover(DiscoverCmd),

    /// Get details for a movie by TMDB ID
    #[command(visible_alias = "i")]
    Info(InfoCmd),

    /// List the decade filters
    Decades,

    /// Build an image URL from a poster or backdrop path
    Image(ImageCmd),
}

// =============================================================================
// Sorting Arguments
// =============================================================================

/// Sort field argument
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortArg {
    /// Popularity score (default)
    #[default]
    Popularity,
    /// Release date
    ReleaseDate,
}

/// Sort direction argument
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderArg {
    Asc,
    /// Descending (default)
    #[default]
    Desc,
}

impl From<SortArg> for SortField {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Popularity => SortField::Popularity,
            SortArg::ReleaseDate => SortField::ReleaseDate,
        }
    }
}

impl From<OrderArg> for SortOrder {
    fn from(arg: OrderArg) -> Self {
        match arg {
            OrderArg::Asc => SortOrder::Asc,
            OrderArg::Desc => SortOrder::Desc,
        }
    }
}

/// Shared `--sort` / `--order` pair
#[derive(Args, Debug, Clone, Copy)]
pub struct SortArgs {
    /// Field to order results by
    #[arg(long, value_enum, default_value = "popularity")]
    pub sort: SortArg,

    /// Sort direction
    #[arg(long, value_enum, default_value = "desc")]
    pub order: OrderArg,
}

impl SortArgs {
    pub fn spec(&self) -> SortSpec {
        SortSpec::new(self.sort.into(), self.order.into())
    }
}

// =============================================================================
// Search Command
// =============================================================================

/// Search movies by keyword
#[derive(Args, Debug)]
pub struct SearchCmd {
    /// Search query (title, keywords)
    #[arg(required = true)]
    pub query: String,

    #[command(flatten)]
    pub sort: SortArgs,

    /// Maximum number of results
    #[arg(long, short = 'l', default_value = "20")]
    pub limit: usize,
}

// =============================================================================
// Discover Command
// =============================================================================

/// Discover movies, sorted server-side
#[derive(Args, Debug)]
pub struct DiscoverCmd {
    /// Decade filter (e.g. 1990s); omit for all years
    #[arg(long)]
    pub decade: Option<String>,

    #[command(flatten)]
    pub sort: SortArgs,

    /// Maximum number of results
    #[arg(long, short = 'l', default_value = "20")]
    pub limit: usize,
}

impl DiscoverCmd {
    /// Resolve `--decade`. `Ok(None)` means no filter.
    pub fn resolve_decade(&self) -> Result<Option<&'static Decade>, String> {
        match self.decade.as_deref() {
            None => Ok(None),
            Some(label) if label.trim().eq_ignore_ascii_case("all") => Ok(None),
            Some(label) => Decade::by_label(label).map(Some).ok_or_else(|| {
                format!(
                    "Unknown decade '{}' (run `reeltui decades` for the list)",
                    label
                )
            }),
        }
    }
}

// =============================================================================
// Info Command
// =============================================================================

/// Get detailed information about a movie
#[derive(Args, Debug)]
pub struct InfoCmd {
    /// TMDB movie ID (e.g., 550)
    #[arg(required = true)]
    pub id: u64,
}

// =============================================================================
// Image Command
// =============================================================================

/// Build a full image URL
#[derive(Args, Debug)]
pub struct ImageCmd {
    /// Path fragment as returned by the API (e.g. /abc.jpg)
    #[arg(required = true)]
    pub path: String,

    /// Size tier (w92, w154, w185, w342, w500, w780, w1280, original)
    #[arg(long, short = 's', default_value = DEFAULT_IMAGE_SIZE)]
    pub size: String,
}

// =============================================================================
// JSON Output Types
// =============================================================================

/// Generic JSON output wrapper with status
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonOutput<T: Serialize> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "is_zero")]
    pub exit_code: i32,
}

fn is_zero(n: &i32) -> bool {
    *n == 0
}

impl<T: Serialize> JsonOutput<T> {
    /// Create success output with data
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
            exit_code: 0,
        }
    }

    /// Create error output (no data)
    pub fn error_msg(msg: impl Into<String>, code: ExitCode) -> JsonOutput<()> {
        JsonOutput::<()> {
            data: None,
            error: Some(msg.into()),
            exit_code: code.into(),
        }
    }
}

// =============================================================================
// Output Helpers
// =============================================================================

/// Output handler for consistent formatting
pub struct Output {
    pub json: bool,
    pub quiet: bool,
}

impl Output {
    pub fn new(cli: &Cli) -> Self {
        Self {
            json: cli.should_json(),
            quiet: cli.quiet,
        }
    }

    /// Print success data: wrapped JSON, or `human` lines for a terminal
    pub fn print<T: Serialize>(
        &self,
        data: T,
        human: impl FnOnce(&T) -> String,
    ) -> anyhow::Result<()> {
        if self.json {
            let output = JsonOutput::success(data);
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            println!("{}", human(&data));
        }
        Ok(())
    }

    /// Print error and return exit code
    pub fn error(&self, msg: impl Into<String>, code: ExitCode) -> ExitCode {
        let msg = msg.into();
        if self.json {
            let output = JsonOutput::<()>::error_msg(&msg, code);
            if let Ok(json) = serde_json::to_string_pretty(&output) {
                eprintln!("{}", json);
            }
        } else if !self.quiet {
            eprintln!("Error: {}", msg);
        }
        code
    }

    /// Print info message (suppressed in quiet mode)
    pub fn info(&self, msg: impl std::fmt::Display) {
        if !self.quiet && !self.json {
            eprintln!("{}", msg);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_args_is_tui_mode() {
        let cli = Cli::parse_from(["reeltui"]);
        assert!(!cli.is_cli_mode());
        assert_eq!(cli.initial_route(), Route::Search);
    }

    #[test]
    fn test_open_route() {
        let cli = Cli::parse_from(["reeltui", "--open", "/movie/550"]);
        assert_eq!(cli.initial_route(), Route::Movie(550));

        let cli = Cli::parse_from(["reeltui", "--open", "/nope"]);
        assert_eq!(cli.initial_route(), Route::Search);
    }

    #[test]
    fn test_search_sort_args() {
        let cli = Cli::parse_from([
            "reeltui",
            "search",
            "batman",
            "--sort",
            "release-date",
            "--order",
            "asc",
        ]);
        if let Some(Command::Search(cmd)) = cli.command {
            assert_eq!(cmd.query, "batman");
            assert_eq!(
                cmd.sort.spec(),
                SortSpec::new(SortField::ReleaseDate, SortOrder::Asc)
            );
            assert_eq!(cmd.limit, 20);
        } else {
            panic!("Expected Search command");
        }
    }

    #[test]
    fn test_discover_decade() {
        let cli = Cli::parse_from(["reeltui", "discover", "--decade", "1990s"]);
        if let Some(Command::Discover(cmd)) = cli.command {
            let decade = cmd.resolve_decade().unwrap().unwrap();
            assert_eq!(decade.start_date(), "1990-01-01");
            assert_eq!(cmd.sort.spec(), SortSpec::default());
        } else {
            panic!("Expected Discover command");
        }

        let cmd = DiscoverCmd {
            decade: Some("1940s".into()),
            sort: SortArgs {
                sort: SortArg::Popularity,
                order: OrderArg::Desc,
            },
            limit: 20,
        };
        assert!(cmd.resolve_decade().is_err());

        let cmd = DiscoverCmd {
            decade: Some("All".into()),
            ..cmd
        };
        assert!(cmd.resolve_decade().unwrap().is_none());
    }

    #[test]
    fn test_info_requires_numeric_id() {
        assert!(Cli::try_parse_from(["reeltui", "info", "tt0137523"]).is_err());
        let cli = Cli::parse_from(["reeltui", "info", "550"]);
        assert!(matches!(cli.command, Some(Command::Info(InfoCmd { id: 550 }))));
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::parse_from(["reeltui", "--json", "--quiet", "decades"]);
        assert!(cli.json);
        assert!(cli.quiet);
        assert!(cli.should_json());
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(i32::from(ExitCode::Success), 0);
        assert_eq!(i32::from(ExitCode::Error), 1);
        assert_eq!(i32::from(ExitCode::InvalidArgs), 2);
        assert_eq!(i32::from(ExitCode::NetworkError), 3);
        assert_eq!(i32::from(ExitCode::NotFound), 4);
    }
}
