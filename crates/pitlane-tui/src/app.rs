//! Application state for the Pitlane TUI.
//!
//! `App` wraps the core `Browser` state machine with the pieces that only a
//! terminal front-end needs: list selections, pane focus, overlays and the
//! background channel that delivers season fetches.

use anyhow::Result;
use tokio::sync::mpsc;
use tracing::{debug, error, info};

use pitlane_core::api::ApiClient;
use pitlane_core::browse::{Action, Browser, Effect, LinkTarget, Table, ViewState};
use pitlane_core::cache::{FileStore, KeyValueStore, MemoryStore, SeasonCache};
use pitlane_core::config::Config;
use pitlane_core::models::{Season, SeasonData};

// ============================================================================
// Constants
// ============================================================================

/// Buffer size for the background fetch channel.
const CHANNEL_BUFFER_SIZE: usize = 8;

/// Number of rows to move on page up/down.
pub const PAGE_SCROLL_SIZE: usize = 10;

pub type SeasonBrowser = Browser<SeasonCache<Box<dyn KeyValueStore + Send>>>;

// ============================================================================
// UI State Types
// ============================================================================

/// Overall application state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Normal,
    ShowingHelp,
    Quitting,
}

/// Which table has keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Races,
    Qualifying,
    Results,
}

impl Focus {
    /// Next pane, wrapping around. Detail panes are skipped when no race is open.
    pub fn next(&self, detail_open: bool) -> Self {
        if !detail_open {
            return Focus::Races;
        }
        match self {
            Focus::Races => Focus::Qualifying,
            Focus::Qualifying => Focus::Results,
            Focus::Results => Focus::Races,
        }
    }

    pub fn prev(&self, detail_open: bool) -> Self {
        if !detail_open {
            return Focus::Races;
        }
        match self {
            Focus::Races => Focus::Results,
            Focus::Qualifying => Focus::Races,
            Focus::Results => Focus::Qualifying,
        }
    }
}

/// Outcome of a background season fetch
struct FetchOutcome {
    season: Season,
    result: Result<SeasonData, String>,
}

// ============================================================================
// Main Application Struct
// ============================================================================

pub struct App {
    pub browser: SeasonBrowser,
    api: ApiClient,

    pub state: AppState,
    pub focus: Focus,

    // Selection indices
    pub season_selection: usize,
    pub race_selection: usize,
    pub qualifying_selection: usize,
    pub results_selection: usize,

    // Background task channel
    fetch_rx: mpsc::Receiver<FetchOutcome>,
    fetch_tx: mpsc::Sender<FetchOutcome>,

    pub status_message: Option<String>,

    /// Where seasons are cached, for the status bar
    pub cache_location: String,
}

/// Open the configured season store: on disk, or in memory with `--no-cache`.
pub fn open_store(config: &Config, no_cache: bool) -> Result<(Box<dyn KeyValueStore + Send>, String)> {
    if no_cache {
        return Ok((Box::new(MemoryStore::new()), "memory".to_string()));
    }

    let store = FileStore::new(config.cache_dir()?)?;
    let location = store.cache_dir().display().to_string();
    Ok((Box::new(store), location))
}

impl App {
    pub fn new(config: &Config, no_cache: bool) -> Result<Self> {
        let api = ApiClient::new(config.api_base_url())?;
        let (store, location) = open_store(config, no_cache)?;
        debug!(api = api.base_url(), cache = %location, "App configured");
        Ok(Self::with_store(api, store, location))
    }

    pub fn with_store(api: ApiClient, store: Box<dyn KeyValueStore + Send>, cache_location: String) -> Self {
        let (fetch_tx, fetch_rx) = mpsc::channel(CHANNEL_BUFFER_SIZE);

        Self {
            browser: Browser::new(SeasonCache::new(store)),
            api,
            state: AppState::Normal,
            focus: Focus::Races,
            season_selection: 0,
            race_selection: 0,
            qualifying_selection: 0,
            results_selection: 0,
            fetch_rx,
            fetch_tx,
            status_message: None,
            cache_location,
        }
    }

    /// Send an action to the browser and carry out the resulting effect.
    pub fn dispatch(&mut self, action: Action) {
        let was_detail = self.browser.selected_round();

        match self.browser.dispatch(action) {
            Effect::None => {}
            Effect::Fetch(season) => self.spawn_fetch(season),
        }

        if self.browser.selected_round() != was_detail {
            self.qualifying_selection = 0;
            self.results_selection = 0;
        }
        if !self.browser.shows_races() {
            self.focus = Focus::Races;
            self.race_selection = 0;
        }
        if !self.browser.is_loading() {
            self.status_message = None;
        }
    }

    fn spawn_fetch(&mut self, season: Season) {
        info!(%season, "Fetching season in background");

        let api = self.api.clone();
        let tx = self.fetch_tx.clone();

        tokio::spawn(async move {
            let result = api
                .fetch_season(season)
                .await
                .map_err(|e| format!("{:#}", e));
            if let Err(e) = tx.send(FetchOutcome { season, result }).await {
                error!(error = %e, "Failed to send fetch result - channel closed");
            }
        });

        self.status_message = Some(format!("Loading {} season...", season));
    }

    /// Check for completed background fetches and apply them
    pub fn check_background_tasks(&mut self) {
        let mut outcomes = Vec::new();
        while let Ok(outcome) = self.fetch_rx.try_recv() {
            outcomes.push(outcome);
        }

        for FetchOutcome { season, result } in outcomes {
            self.dispatch(Action::FetchCompleted { season, result });
        }
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    pub fn select_highlighted_season(&mut self) {
        if let Some(season) = Season::ALL.get(self.season_selection).copied() {
            self.dispatch(Action::SelectSeason(season));
        }
    }

    pub fn open_highlighted_race(&mut self) {
        let target = self
            .browser
            .races_table()
            .and_then(|t| t.find_link(self.race_selection, |l| matches!(l, LinkTarget::Race(_))).cloned());
        if let Some(target) = target {
            self.dispatch(Action::Activate(target));
            self.focus = Focus::Qualifying;
        }
    }

    /// Follow the driver or constructor link in the highlighted detail row.
    pub fn open_entity(&mut self, want_driver: bool) {
        let (table, row) = match self.focus {
            Focus::Qualifying => (self.browser.qualifying_table(), self.qualifying_selection),
            Focus::Results => (self.browser.results_table(), self.results_selection),
            Focus::Races => return,
        };

        let target = table.and_then(|t| {
            t.find_link(row, |l| {
                if want_driver {
                    matches!(l, LinkTarget::Driver(_))
                } else {
                    matches!(l, LinkTarget::Constructor(_))
                }
            })
            .cloned()
        });

        if let Some(target) = target {
            self.dispatch(Action::Activate(target));
        }
    }

    pub fn open_circuit(&mut self) {
        if let Some(round) = self.browser.selected_round() {
            self.dispatch(Action::Activate(LinkTarget::Circuit(round)));
        }
    }

    pub fn go_home(&mut self) {
        self.dispatch(Action::GoHome);
        self.season_selection = 0;
    }

    pub fn cycle_focus(&mut self, forward: bool) {
        let detail_open = self.browser.state() == ViewState::ViewingRaceDetail;
        self.focus = if forward {
            self.focus.next(detail_open)
        } else {
            self.focus.prev(detail_open)
        };
    }

    /// Move the selection of whichever list is active by `delta` rows.
    pub fn move_selection(&mut self, delta: isize) {
        if self.browser.state() == ViewState::Home {
            self.season_selection = step_selection(self.season_selection, delta, Season::ALL.len());
            return;
        }

        let len = self.focused_table().map(|t| t.len()).unwrap_or(0);
        let selection = match self.focus {
            Focus::Races => &mut self.race_selection,
            Focus::Qualifying => &mut self.qualifying_selection,
            Focus::Results => &mut self.results_selection,
        };
        *selection = step_selection(*selection, delta, len);
    }

    fn focused_table(&self) -> Option<Table> {
        match self.focus {
            Focus::Races => self.browser.races_table(),
            Focus::Qualifying => self.browser.qualifying_table(),
            Focus::Results => self.browser.results_table(),
        }
    }
}

/// Move `current` by `delta`, clamped to `0..len`.
pub fn step_selection(current: usize, delta: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let next = current as isize + delta;
    next.clamp(0, len as isize - 1) as usize
}

// ============================================================================
// Tests
// ============================================================================
