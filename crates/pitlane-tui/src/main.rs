//! Pitlane - a terminal browser for Formula 1 season data.
//!
//! Pick a season, browse its races and open a race to see qualifying and
//! results. Every season is fetched once and then served from the local
//! cache.

mod app;
mod ui;

use std::io;
use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use pitlane_core::api::ApiClient;
use pitlane_core::browse::Browser;
use pitlane_core::cache::SeasonCache;
use pitlane_core::config::Config;
use pitlane_core::models::Season;

use app::{App, AppState};
use ui::input::handle_input;
use ui::render::render;

// ============================================================================
// Constants
// ============================================================================

/// Timeout for polling terminal events (in milliseconds)
const EVENT_POLL_TIMEOUT_MS: u64 = 100;

/// Log file written inside the cache directory
const LOG_FILE: &str = "pitlane.log";

const USAGE: &str = "\
Usage: pitlane [OPTIONS]

Options:
  --dump-season <YEAR>  Print a season (2020-2023) as JSON and exit
  --no-cache            Keep seasons in memory only
  -h, --help            Show this help";

#[derive(Debug, Default, PartialEq)]
struct CliArgs {
    dump_season: Option<String>,
    no_cache: bool,
    help: bool,
}

fn parse_args(args: &[String]) -> Result<CliArgs> {
    let mut parsed = CliArgs::default();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--dump-season" => {
                let year = iter
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--dump-season requires a year"))?;
                parsed.dump_season = Some(year.clone());
            }
            "--no-cache" => parsed.no_cache = true,
            "-h" | "--help" => parsed.help = true,
            other => anyhow::bail!("Unknown argument: {}\n\n{}", other, USAGE),
        }
    }
    Ok(parsed)
}

/// Open `pitlane.log` in `log_dir`, falling back to the system temp directory.
/// Returns `None` if neither location is writable.
fn open_log_appender(log_dir: &Path) -> Option<RollingFileAppender> {
    [log_dir.to_path_buf(), std::env::temp_dir()]
        .into_iter()
        .find_map(|dir| {
            RollingFileAppender::builder()
                .rotation(Rotation::NEVER)
                .filename_prefix(LOG_FILE)
                .build(&dir)
                .map_err(|e| eprintln!("Warning: cannot log to {}: {}", dir.display(), e))
                .ok()
        })
}

/// Initialize the tracing subscriber, logging to a file so the TUI stays clean.
/// Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
///
/// Logging is disabled when no log file can be opened.
fn init_tracing(log_dir: &Path) -> Option<WorkerGuard> {
    let file_appender = open_log_appender(log_dir)?;
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .with(filter)
        .init();

    Some(guard)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let cli = parse_args(&args)?;
    if cli.help {
        println!("{}", USAGE);
        return Ok(());
    }

    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Warning: {:#}, using defaults", e);
            Config::default()
        }
    };

    let log_dir = config.cache_dir().unwrap_or_else(|_| std::env::temp_dir());
    let _guard = init_tracing(&log_dir);
    info!(api = config.api_base_url(), "Pitlane starting");

    if let Some(ref year) = cli.dump_season {
        return dump_season(&config, year, cli.no_cache).await;
    }

    let mut app = App::new(&config, cli.no_cache)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
    }

    info!("Pitlane shutting down");
    Ok(())
}

/// Print a season as JSON, fetching it only if it is not cached yet
async fn dump_season(config: &Config, year: &str, no_cache: bool) -> Result<()> {
    let season: Season = year.parse()?;

    let api = ApiClient::new(config.api_base_url())?;
    let (store, location) = app::open_store(config, no_cache)?;
    eprintln!("Loading {} season (cache: {})...", season, location);

    let mut browser = Browser::new(SeasonCache::new(store));
    if let Err(e) = browser.select_season_with(season, &api).await {
        warn!(%season, error = %e, "Season dump failed");
        return Err(e);
    }

    let data = browser
        .season_data()
        .ok_or_else(|| anyhow::anyhow!("No data loaded for {}", season))?;
    println!("{}", serde_json::to_string_pretty(data)?);

    eprintln!(
        "Done! {} races, {} qualifying entries, {} results.",
        data.races.len(),
        data.qualifying.len(),
        data.results.len()
    );
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        // Draw UI
        terminal.draw(|f| render(f, app))?;

        // Poll for events with timeout to allow background updates
        if event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                // Ctrl+C to quit
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                    return Ok(());
                }

                if handle_input(app, key) {
                    return Ok(());
                }
            }
        }

        // Check for completed background fetches
        app.check_background_tasks();

        if matches!(app.state, AppState::Quitting) {
            return Ok(());
        }
    }
}
