//! reeltui - terminal movie discovery for TMDB
//!
//! # Usage
//!
//! ```bash
//! # Launch interactive TUI
//! reeltui
//! reeltui --open /gallery
//!
//! # CLI mode (for automation)
//! reeltui search "blade runner"
//! reeltui discover --decade 1980s --json
//! reeltui info 78
//! ```

use std::io::{stdout, Stdout};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{info, warn};

use reeltui::api::Catalog;
use reeltui::app::{App, Route};
use reeltui::cli::{Cli, Command, ExitCode, Output};
use reeltui::dispatch::{Dispatcher, FetchedReceiver};
use reeltui::{commands, logging, ui, Config};

/// Terminal type alias for convenience
type Tui = Terminal<CrosstermBackend<Stdout>>;

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is fine
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    // An explicit --config must parse; the default file is optional
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load(),
    }
    .with_env();

    if cli.is_cli_mode() {
        // CLI mode: execute command and exit
        logging::init_stderr(cli.verbose);
        let exit_code = run_cli(cli, &config).await;
        std::process::exit(exit_code.into());
    } else {
        // TUI mode: logs go to a file so they don't draw over the screen
        if let Some(path) = config.log_path() {
            if let Err(e) = logging::init_file(&path, cli.verbose) {
                eprintln!("Logging disabled: {}", e);
            }
        }
        run_tui(cli.initial_route(), &config).await
    }
}

/// Run CLI command and return exit code
async fn run_cli(cli: Cli, config: &Config) -> ExitCode {
    let output = Output::new(&cli);
    let client = match config.tmdb_client() {
        Ok(client) => client,
        Err(e) => {
            return output.error(format!("Failed to set up client: {}", e), ExitCode::Error);
        }
    };
    let catalog: &dyn Catalog = &client;

    match cli.command {
        Some(Command::Search(cmd)) => commands::search_cmd(cmd, catalog, &output).await,

        Some(Command::Discover(cmd)) => commands::discover_cmd(cmd, catalog, &output).await,

        Some(Command::Info(cmd)) => commands::info_cmd(cmd, catalog, &output).await,

        Some(Command::Decades) => commands::decades_cmd(&output),

        Some(Command::Image(cmd)) => commands::image_cmd(cmd, &output),

        // Handled by the is_cli_mode check
        None => ExitCode::Success,
    }
}

// =============================================================================
// TUI Mode
// =============================================================================

/// Initialize the terminal for TUI mode
fn init_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal to normal state
fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Run interactive TUI
async fn run_tui(route: Route, config: &Config) -> Result<()> {
    info!(%route, base_url = config.base_url(), "starting tui");

    let catalog: Arc<dyn Catalog> = Arc::new(config.tmdb_client()?);
    let (mut dispatcher, mut rx) = Dispatcher::new(catalog);

    let mut app = App::with_debounce(config.debounce());
    app.open_route(route);

    let mut terminal = init_terminal()?;

    let result = run_event_loop(&mut terminal, &mut app, &mut dispatcher, &mut rx).await;

    // Outstanding requests are pointless once the UI is gone
    dispatcher.shutdown();

    // Always restore terminal, even on error
    restore_terminal(&mut terminal)?;

    if let Err(e) = &result {
        warn!(error = %e, "tui exited with error");
    }
    result
}

/// Main event loop - handles input, fires timers, dispatches requests, applies responses
async fn run_event_loop(
    terminal: &mut Tui,
    app: &mut App,
    dispatcher: &mut Dispatcher,
    rx: &mut FetchedReceiver,
) -> Result<()> {
    const TICK_RATE: Duration = Duration::from_millis(100);

    while app.running {
        let size = terminal.size()?;
        app.set_grid_columns(ui::grid_columns(size.width));

        // Render current state
        terminal.draw(|frame| ui::render(frame, app))?;

        // Poll for events with timeout so timers and responses keep flowing
        if event::poll(TICK_RATE)? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events (ignore releases on Windows)
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }

        app.tick(Instant::now());
        dispatcher.dispatch_all(app.take_fetches());

        while let Ok(fetched) = rx.try_recv() {
            app.apply(fetched);
        }
    }

    Ok(())
}
