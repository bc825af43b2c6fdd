//! Season browser state machine.
//!
//! `Browser` receives typed `Action`s from a front-end and returns an
//! `Effect` describing any I/O the front-end must perform. The only effect is
//! fetching a season; its outcome comes back as `Action::FetchCompleted`.
//!
//! ```text
//! Home --SelectSeason--> Loading --cache hit / fetch ok--> BrowsingRaces
//!                           |                                 |
//!                           +--fetch failed--> Home           +--Activate(Race)--> ViewingRaceDetail
//! any --GoHome--> Home
//! ```

use anyhow::Result;
use tracing::{debug, error, info, warn};

use crate::api::SeasonSource;
use crate::cache::SeasonStore;
use crate::models::{Constructor, Driver, Race, Season, SeasonData};

use super::table::{LinkTarget, Table};
use super::views;

/// Shown when any of the three season requests fails.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch data. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    Home,
    Loading(Season),
    BrowsingRaces,
    ViewingRaceDetail,
}

#[derive(Debug, Clone)]
pub enum Action {
    SelectSeason(Season),
    /// Outcome of an `Effect::Fetch`. Errors carry the display message.
    FetchCompleted {
        season: Season,
        result: Result<SeasonData, String>,
    },
    Activate(LinkTarget),
    CloseDialog,
    DismissNotification,
    GoHome,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    Fetch(Season),
}

/// Entity detail dialog opened from a link.
#[derive(Debug, Clone, PartialEq)]
pub enum Dialog {
    Circuit(Race),
    Driver(Driver),
    Constructor(Constructor),
}

pub struct Browser<C> {
    cache: C,
    state: ViewState,
    /// Season selector value; `None` is the placeholder
    season: Option<Season>,
    data: Option<SeasonData>,
    selected_round: Option<u32>,
    dialog: Option<Dialog>,
    /// Blocking notification; other input is ignored until dismissed
    notification: Option<String>,
}

impl<C: SeasonStore> Browser<C> {
    pub fn new(cache: C) -> Self {
        Self {
            cache,
            state: ViewState::Home,
            season: None,
            data: None,
            selected_round: None,
            dialog: None,
            notification: None,
        }
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    pub fn selected_season(&self) -> Option<Season> {
        self.season
    }

    pub fn season_data(&self) -> Option<&SeasonData> {
        self.data.as_ref()
    }

    pub fn selected_round(&self) -> Option<u32> {
        self.selected_round
    }

    pub fn dialog(&self) -> Option<&Dialog> {
        self.dialog.as_ref()
    }

    pub fn notification(&self) -> Option<&str> {
        self.notification.as_deref()
    }

    pub fn cache(&self) -> &C {
        &self.cache
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, ViewState::Loading(_))
    }

    /// Whether the races table is on screen.
    pub fn shows_races(&self) -> bool {
        matches!(self.state, ViewState::BrowsingRaces | ViewState::ViewingRaceDetail)
    }

    /// Apply an action and report the I/O the caller must perform next.
    pub fn dispatch(&mut self, action: Action) -> Effect {
        if self.notification.is_some()
            && !matches!(action, Action::DismissNotification | Action::FetchCompleted { .. })
        {
            debug!(?action, "Ignoring action while notification is shown");
            return Effect::None;
        }

        match action {
            Action::SelectSeason(season) => return self.select_season(season),
            Action::FetchCompleted { season, result } => self.complete_fetch(season, result),
            Action::Activate(target) => self.activate(target),
            Action::CloseDialog => self.dialog = None,
            Action::DismissNotification => self.notification = None,
            Action::GoHome => self.go_home(),
        }
        Effect::None
    }

    /// Select a season and, on a cache miss, fetch it from `source` before returning.
    ///
    /// Returns an error if the fetch failed; the failure has already been
    /// applied to the browser state.
    pub async fn select_season_with(&mut self, season: Season, source: &dyn SeasonSource) -> Result<()> {
        if let Effect::Fetch(season) = self.dispatch(Action::SelectSeason(season)) {
            let outcome = source.fetch_season(season).await;
            let message = outcome.as_ref().err().map(|e| format!("{:#}", e));
            self.dispatch(Action::FetchCompleted {
                season,
                result: outcome.map_err(|e| format!("{:#}", e)),
            });
            if let Some(message) = message {
                return Err(anyhow::anyhow!(message));
            }
        }
        Ok(())
    }

    fn select_season(&mut self, season: Season) -> Effect {
        self.season = Some(season);
        self.data = None;
        self.selected_round = None;
        self.dialog = None;
        self.state = ViewState::Loading(season);

        if self.cache.has(season) {
            match self.cache.read(season) {
                Ok(Some(data)) => {
                    debug!(%season, "Cache hit");
                    self.show_races(data);
                    return Effect::None;
                }
                Ok(None) => debug!(%season, "Cache incomplete"),
                Err(e) => warn!(%season, error = %e, "Cached season unreadable, refetching"),
            }
        } else {
            debug!(%season, "Cache miss");
        }

        Effect::Fetch(season)
    }

    fn complete_fetch(&mut self, season: Season, result: Result<SeasonData, String>) {
        let current = self.state == ViewState::Loading(season);

        match result {
            Ok(data) => {
                if let Err(e) = self.cache.write(season, &data) {
                    warn!(%season, error = %e, "Failed to cache season");
                }
                if current {
                    self.show_races(data);
                } else {
                    debug!(%season, "Season fetched after selection changed, cached only");
                }
            }
            Err(message) => {
                error!(%season, error = %message, "Data fetch failed");
                if current {
                    self.state = ViewState::Home;
                    self.season = None;
                    self.notification = Some(FETCH_FAILED_MESSAGE.to_string());
                }
            }
        }
    }

    fn show_races(&mut self, data: SeasonData) {
        info!(
            season = ?self.season,
            races = data.races.len(),
            "Showing season races"
        );
        self.data = Some(data);
        self.state = ViewState::BrowsingRaces;
    }

    fn activate(&mut self, target: LinkTarget) {
        if !self.shows_races() {
            debug!(?target, "Ignoring link outside the races view");
            return;
        }

        match target {
            LinkTarget::Race(round) => {
                if self.race(round).is_some() {
                    self.selected_round = Some(round);
                    self.dialog = None;
                    self.state = ViewState::ViewingRaceDetail;
                } else {
                    warn!(round, "No race for round");
                }
            }
            LinkTarget::Circuit(round) => {
                if let Some(race) = self.race(round).cloned() {
                    self.dialog = Some(Dialog::Circuit(race));
                }
            }
            LinkTarget::Driver(driver) => self.dialog = Some(Dialog::Driver(driver)),
            LinkTarget::Constructor(constructor) => {
                self.dialog = Some(Dialog::Constructor(constructor))
            }
        }
    }

    fn go_home(&mut self) {
        self.state = ViewState::Home;
        self.season = None;
        self.data = None;
        self.selected_round = None;
        self.dialog = None;
    }

    fn race(&self, round: u32) -> Option<&Race> {
        self.data.as_ref()?.race(round)
    }

    pub fn selected_race(&self) -> Option<&Race> {
        self.race(self.selected_round?)
    }

    pub fn races_table(&self) -> Option<Table> {
        if !self.shows_races() {
            return None;
        }
        self.data.as_ref().map(views::races_table)
    }

    pub fn qualifying_table(&self) -> Option<Table> {
        let round = self.detail_round()?;
        self.data.as_ref().map(|d| views::qualifying_table(d, round))
    }

    pub fn results_table(&self) -> Option<Table> {
        let round = self.detail_round()?;
        self.data.as_ref().map(|d| views::results_table(d, round))
    }

    /// "Results for 2021 Bahrain Grand Prix". Races without a year take the
    /// selected season's.
    pub fn detail_title(&self) -> Option<String> {
        self.detail_round()?;
        let race = self.selected_race()?;
        let year = match (race.year, self.season) {
            (0, Some(season)) => season.year(),
            (year, _) => year,
        };
        Some(format!("Results for {} {}", year, race.name))
    }

    fn detail_round(&self) -> Option<u32> {
        if self.state == ViewState::ViewingRaceDetail {
            self.selected_round
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;
    use serde_json::json;

    use crate::api::{join_season, test_server, ApiClient};
    use crate::cache::{KeyValueStore, MemoryStore, SeasonCache};
    use crate::models::DataKind;

    const BASE: &str = "https://api.example.test/f1";

    fn season(year: u16) -> Season {
        Season::new(year).unwrap()
    }

    fn fixture(year: u16) -> SeasonData {
        let mut qualifying = Vec::new();
        let mut results = Vec::new();
        for round in [1, 2, 3, 5] {
            for (position, surname) in [(1, "Verstappen"), (2, "Hamilton")] {
                qualifying.push(json!({
                    "race": {"round": round},
                    "position": position,
                    "driver": {"forename": "Test", "surname": surname},
                    "constructor": {"name": "Team"},
                    "q1": "1:30.000", "q2": null, "q3": ""
                }));
                results.push(json!({
                    "race": {"round": round},
                    "position": position,
                    "driver": {"forename": "Test", "surname": surname},
                    "constructor": {"name": "Team"},
                    "laps": 57,
                    "points": null
                }));
            }
        }

        serde_json::from_value(json!({
            "races": [
                {"round": 5, "name": "Monaco Grand Prix", "year": year},
                {"round": 2, "name": "Emilia Romagna Grand Prix", "year": year},
                {"round": 1, "name": "Bahrain Grand Prix", "year": year,
                 "circuit": {"name": "Bahrain International Circuit", "country": "Bahrain"}},
                {"round": 3, "name": "Portuguese Grand Prix", "year": year}
            ],
            "qualifying": qualifying,
            "results": results
        }))
        .unwrap()
    }

    /// Serves fixtures, recording every endpoint it is asked for.
    struct FakeSource {
        urls: ApiClient,
        fail: Option<DataKind>,
        calls: AtomicUsize,
        requested: Mutex<Vec<String>>,
    }

    impl FakeSource {
        fn new() -> Self {
            Self {
                urls: ApiClient::new(BASE).unwrap(),
                fail: None,
                calls: AtomicUsize::new(0),
                requested: Mutex::new(Vec::new()),
            }
        }

        fn failing(kind: DataKind) -> Self {
            Self {
                fail: Some(kind),
                ..Self::new()
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn get(&self, kind: DataKind, season: Season) -> Result<()> {
            self.requested
                .lock()
                .unwrap()
                .push(self.urls.endpoint_url(kind, season));
            if self.fail == Some(kind) {
                anyhow::bail!("Error fetching {} data", kind.label());
            }
            Ok(())
        }
    }

    #[async_trait]
    impl SeasonSource for FakeSource {
        async fn fetch_season(&self, season: Season) -> Result<SeasonData> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let data = fixture(season.year());
            join_season(
                async { self.get(DataKind::Races, season).map(|_| data.races.clone()) },
                async { self.get(DataKind::Qualifying, season).map(|_| data.qualifying.clone()) },
                async { self.get(DataKind::Results, season).map(|_| data.results.clone()) },
            )
            .await
        }
    }

    fn browser() -> Browser<SeasonCache<MemoryStore>> {
        Browser::new(SeasonCache::new(MemoryStore::new()))
    }

    #[test]
    fn test_starts_home() {
        let browser = browser();
        assert_eq!(browser.state(), ViewState::Home);
        assert!(browser.selected_season().is_none());
        assert!(browser.races_table().is_none());
    }

    #[test]
    fn test_cache_miss_requests_fetch_and_shows_loading() {
        let mut browser = browser();
        let effect = browser.dispatch(Action::SelectSeason(season(2021)));

        assert_eq!(effect, Effect::Fetch(season(2021)));
        assert_eq!(browser.state(), ViewState::Loading(season(2021)));
        assert!(browser.is_loading());
        assert!(!browser.shows_races());
    }

    #[tokio::test]
    async fn test_fetch_populates_cache_and_reselect_skips_network() {
        let mut browser = browser();
        let source = FakeSource::new();

        browser.select_season_with(season(2022), &source).await.unwrap();
        assert_eq!(source.calls(), 1);
        assert_eq!(browser.state(), ViewState::BrowsingRaces);
        assert!(browser.cache().has(season(2022)));

        browser.dispatch(Action::GoHome);
        browser.select_season_with(season(2022), &source).await.unwrap();
        assert_eq!(source.calls(), 1);
        assert_eq!(browser.state(), ViewState::BrowsingRaces);
        assert_eq!(browser.races_table().unwrap().len(), 4);
    }

    #[test]
    fn test_cache_hit_renders_without_fetch() {
        let mut cache = SeasonCache::new(MemoryStore::new());
        cache.write(season(2020), &fixture(2020)).unwrap();
        let mut browser = Browser::new(cache);

        let effect = browser.dispatch(Action::SelectSeason(season(2020)));
        assert_eq!(effect, Effect::None);
        assert_eq!(browser.state(), ViewState::BrowsingRaces);
        assert_eq!(browser.selected_season(), Some(season(2020)));
    }

    #[test]
    fn test_corrupt_cache_falls_back_to_fetch() {
        let mut store = MemoryStore::new();
        store.set("races_2023", "not json".to_string()).unwrap();
        store.set("qualifying_2023", "[]".to_string()).unwrap();
        store.set("results_2023", "[]".to_string()).unwrap();
        let mut browser = Browser::new(SeasonCache::new(store));

        let effect = browser.dispatch(Action::SelectSeason(season(2023)));
        assert_eq!(effect, Effect::Fetch(season(2023)));

        browser.dispatch(Action::FetchCompleted {
            season: season(2023),
            result: Ok(fixture(2023)),
        });
        assert_eq!(browser.state(), ViewState::BrowsingRaces);
        assert_eq!(browser.cache().read(season(2023)).unwrap(), Some(fixture(2023)));
    }

    #[tokio::test]
    async fn test_failed_endpoint_caches_nothing_and_notifies_once() {
        let mut browser = browser();
        let source = FakeSource::failing(DataKind::Qualifying);

        let err = browser.select_season_with(season(2021), &source).await.unwrap_err();
        assert!(err.to_string().contains("qualifying"));

        assert!(!browser.cache().has(season(2021)));
        assert!(browser.cache().store().is_empty());
        assert_eq!(browser.notification(), Some(FETCH_FAILED_MESSAGE));
        assert!(!browser.is_loading());
        assert_eq!(browser.state(), ViewState::Home);

        browser.dispatch(Action::DismissNotification);
        assert!(browser.notification().is_none());
    }

    #[test]
    fn test_notification_blocks_other_actions() {
        let mut browser = browser();
        browser.dispatch(Action::SelectSeason(season(2021)));
        browser.dispatch(Action::FetchCompleted {
            season: season(2021),
            result: Err("Error fetching race data".to_string()),
        });

        assert_eq!(browser.dispatch(Action::SelectSeason(season(2022))), Effect::None);
        assert_eq!(browser.state(), ViewState::Home);

        browser.dispatch(Action::DismissNotification);
        assert_eq!(
            browser.dispatch(Action::SelectSeason(season(2022))),
            Effect::Fetch(season(2022))
        );
    }

    #[test]
    fn test_late_response_for_superseded_season() {
        let mut browser = browser();
        browser.dispatch(Action::SelectSeason(season(2020)));
        browser.dispatch(Action::SelectSeason(season(2021)));

        browser.dispatch(Action::FetchCompleted {
            season: season(2020),
            result: Ok(fixture(2020)),
        });

        // Cached, but the view still waits for 2021
        assert!(browser.cache().has(season(2020)));
        assert_eq!(browser.state(), ViewState::Loading(season(2021)));

        browser.dispatch(Action::FetchCompleted {
            season: season(2020),
            result: Err("late failure".to_string()),
        });
        assert!(browser.notification().is_none());
    }

    #[tokio::test]
    async fn test_race_detail_filters_by_round() {
        let mut browser = browser();
        browser.select_season_with(season(2021), &FakeSource::new()).await.unwrap();

        browser.dispatch(Action::Activate(LinkTarget::Race(2)));
        assert_eq!(browser.state(), ViewState::ViewingRaceDetail);
        assert_eq!(
            browser.detail_title().as_deref(),
            Some("Results for 2021 Emilia Romagna Grand Prix")
        );

        let qualifying = browser.qualifying_table().unwrap();
        let results = browser.results_table().unwrap();
        assert_eq!(qualifying.len(), 2);
        assert_eq!(results.len(), 2);

        let data = browser.season_data().unwrap();
        assert!(data.qualifying_for(2).iter().all(|q| q.race.round == 2));
        assert_eq!(qualifying.row(0).unwrap()[4].label(), "-");
        assert_eq!(results.row(0).unwrap()[4].label(), "-");
    }

    #[tokio::test]
    async fn test_unknown_race_round_ignored() {
        let mut browser = browser();
        browser.select_season_with(season(2021), &FakeSource::new()).await.unwrap();

        browser.dispatch(Action::Activate(LinkTarget::Race(4)));
        assert_eq!(browser.state(), ViewState::BrowsingRaces);
        assert!(browser.qualifying_table().is_none());
    }

    #[test]
    fn test_links_ignored_outside_races_view() {
        let mut browser = browser();
        browser.dispatch(Action::Activate(LinkTarget::Race(1)));
        browser.dispatch(Action::Activate(LinkTarget::Driver(Driver::default())));
        assert_eq!(browser.state(), ViewState::Home);
        assert!(browser.dialog().is_none());
    }

    #[tokio::test]
    async fn test_dialogs_open_and_close() {
        let mut browser = browser();
        browser.select_season_with(season(2021), &FakeSource::new()).await.unwrap();
        browser.dispatch(Action::Activate(LinkTarget::Race(1)));

        browser.dispatch(Action::Activate(LinkTarget::Circuit(1)));
        match browser.dialog() {
            Some(Dialog::Circuit(race)) => assert_eq!(race.round, 1),
            other => panic!("expected circuit dialog, got {:?}", other),
        }

        let results = browser.results_table().unwrap();
        let driver = results
            .find_link(0, |t| matches!(t, LinkTarget::Driver(_)))
            .cloned()
            .unwrap();
        browser.dispatch(Action::Activate(driver));
        assert!(matches!(browser.dialog(), Some(Dialog::Driver(d)) if d.full_name() == "Test Verstappen"));

        browser.dispatch(Action::CloseDialog);
        assert!(browser.dialog().is_none());
        assert_eq!(browser.state(), ViewState::ViewingRaceDetail);
    }

    #[tokio::test]
    async fn test_go_home_clears_detail_and_selector() {
        let mut browser = browser();
        browser.select_season_with(season(2021), &FakeSource::new()).await.unwrap();
        browser.dispatch(Action::Activate(LinkTarget::Race(1)));
        browser.dispatch(Action::Activate(LinkTarget::Circuit(1)));

        browser.dispatch(Action::GoHome);

        assert_eq!(browser.state(), ViewState::Home);
        assert!(browser.selected_season().is_none());
        assert!(browser.selected_round().is_none());
        assert!(browser.qualifying_table().is_none());
        assert!(browser.results_table().is_none());
        assert!(browser.races_table().is_none());
        assert!(browser.dialog().is_none());
    }

    #[test]
    fn test_race_without_year_titled_with_season() {
        let mut cache = SeasonCache::new(MemoryStore::new());
        let mut data = fixture(2022);
        data.races.iter_mut().for_each(|r| r.year = 0);
        cache.write(season(2022), &data).unwrap();
        let mut browser = Browser::new(cache);

        browser.dispatch(Action::SelectSeason(season(2022)));
        browser.dispatch(Action::Activate(LinkTarget::Race(1)));
        assert_eq!(
            browser.detail_title().as_deref(),
            Some("Results for 2022 Bahrain Grand Prix")
        );
    }

    #[tokio::test]
    async fn test_http_server_error_leaves_cache_empty() {
        let api = ApiClient::new(test_server::serve(test_server::failing_qualifying_route)).unwrap();
        let mut browser = browser();

        let err = browser.select_season_with(season(2021), &api).await.unwrap_err();

        assert_eq!(err.to_string(), "Error fetching qualifying data: Server error: boom");
        assert!(browser.cache().store().is_empty());
        assert_eq!(browser.notification(), Some(FETCH_FAILED_MESSAGE));
        assert_eq!(browser.state(), ViewState::Home);
        assert!(browser.selected_season().is_none());
    }

    #[tokio::test]
    async fn test_http_season_cached_and_rendered() {
        let api = ApiClient::new(test_server::serve(test_server::season_route)).unwrap();
        let mut browser = browser();

        browser.select_season_with(season(2021), &api).await.unwrap();

        assert_eq!(
            browser.cache().store().keys(),
            vec!["qualifying_2021", "races_2021", "results_2021"]
        );
        assert_eq!(browser.races_table().unwrap().column(0), vec!["1", "2"]);

        browser.dispatch(Action::Activate(LinkTarget::Race(1)));
        let results = browser.results_table().unwrap();
        let row: Vec<&str> = results.row(0).unwrap().iter().map(|c| c.label()).collect();
        assert_eq!(row, vec!["1", "Lewis Hamilton", "Mercedes", "-", "0"]);
        assert_eq!(browser.qualifying_table().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_end_to_end_2021() {
        let mut browser = browser();
        let source = FakeSource::new();

        browser.select_season_with(season(2021), &source).await.unwrap();

        let mut requested = source.requested.lock().unwrap().clone();
        requested.sort();
        assert_eq!(
            requested,
            vec![
                format!("{}/qualifying.php?season=2021", BASE),
                format!("{}/races.php?season=2021", BASE),
                format!("{}/results.php?season=2021", BASE),
            ]
        );

        assert_eq!(
            browser.cache().store().keys(),
            vec!["qualifying_2021", "races_2021", "results_2021"]
        );

        let races = browser.races_table().unwrap();
        assert_eq!(races.column(0), vec!["1", "2", "3", "5"]);

        let monaco = races.find_link(3, |t| matches!(t, LinkTarget::Race(_))).cloned().unwrap();
        assert_eq!(monaco, LinkTarget::Race(5));
        browser.dispatch(Action::Activate(monaco));

        let data = browser.season_data().unwrap();
        let qualifying = browser.qualifying_table().unwrap();
        let results = browser.results_table().unwrap();
        assert_eq!(qualifying.len(), data.qualifying_for(5).len());
        assert_eq!(results.len(), data.results_for(5).len());
        assert!(data.results_for(5).iter().all(|r| r.race.round == 5));
    }
}
