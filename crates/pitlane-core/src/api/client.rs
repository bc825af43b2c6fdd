//! API client for the F1 season endpoints.

use std::future::Future;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::models::{DataKind, QualifyingEntry, Race, ResultEntry, Season, SeasonData};

use super::{ApiError, SeasonSource};

/// Default base URL for the season endpoints
pub const DEFAULT_API_BASE: &str = "https://www.randyconnolly.com/funwebdev/3rd/api/f1";

/// HTTP request timeout in seconds.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// API client for the season endpoints.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new API client against the given base URL
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of the endpoint serving `kind` for `season`,
    /// e.g. `{base}/races.php?season=2021`
    pub fn endpoint_url(&self, kind: DataKind, season: Season) -> String {
        format!("{}/{}?season={}", self.base_url, kind.endpoint(), season)
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: reqwest::Response, url: &str) -> Result<reqwest::Response> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, url, &body).into())
        }
    }

    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(ApiError::from)
            .with_context(|| format!("Failed to send GET request to {}", url))?;

        let response = Self::check_response(response, url).await?;

        response
            .json()
            .await
            .with_context(|| format!("Failed to parse JSON response from {}", url))
    }

    async fn fetch_kind<T: DeserializeOwned>(&self, kind: DataKind, season: Season) -> Result<Vec<T>> {
        let url = self.endpoint_url(kind, season);
        debug!(%url, %kind, "Fetching season data");
        self.get(&url)
            .await
            .with_context(|| format!("Error fetching {} data", kind.label()))
    }

    pub async fn fetch_races(&self, season: Season) -> Result<Vec<Race>> {
        self.fetch_kind(DataKind::Races, season).await
    }

    pub async fn fetch_qualifying(&self, season: Season) -> Result<Vec<QualifyingEntry>> {
        self.fetch_kind(DataKind::Qualifying, season).await
    }

    pub async fn fetch_results(&self, season: Season) -> Result<Vec<ResultEntry>> {
        self.fetch_kind(DataKind::Results, season).await
    }

    /// Fetch races, qualifying and results for a season concurrently.
    /// Fails as soon as any of the three requests fails.
    pub async fn fetch_season(&self, season: Season) -> Result<SeasonData> {
        let data = join_season(
            self.fetch_races(season),
            self.fetch_qualifying(season),
            self.fetch_results(season),
        )
        .await?;

        info!(
            %season,
            races = data.races.len(),
            qualifying = data.qualifying.len(),
            results = data.results.len(),
            "Season fetched"
        );
        Ok(data)
    }
}

#[async_trait]
impl SeasonSource for ApiClient {
    async fn fetch_season(&self, season: Season) -> Result<SeasonData> {
        ApiClient::fetch_season(self, season).await
    }
}

/// Join the three per-kind fetches into one `SeasonData`.
///
/// All three futures are polled concurrently. The first error resolves the
/// join immediately and the remaining futures are dropped, so no partial
/// season is ever produced.
pub async fn join_season<R, Q, S>(races: R, qualifying: Q, results: S) -> Result<SeasonData>
where
    R: Future<Output = Result<Vec<Race>>>,
    Q: Future<Output = Result<Vec<QualifyingEntry>>>,
    S: Future<Output = Result<Vec<ResultEntry>>>,
{
    let (races, qualifying, results) = futures::future::try_join3(races, qualifying, results).await?;
    Ok(SeasonData {
        races,
        qualifying,
        results,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_server;
    use futures::future::{pending, ready};

    fn season(year: u16) -> Season {
        Season::new(year).unwrap()
    }

    fn race(round: u32) -> Race {
        serde_json::from_value(serde_json::json!({"round": round, "name": "Test GP", "year": 2021}))
            .unwrap()
    }

    #[test]
    fn test_endpoint_urls() {
        let client = ApiClient::new("https://example.test/api/f1/").unwrap();
        assert_eq!(client.base_url(), "https://example.test/api/f1");
        assert_eq!(
            client.endpoint_url(DataKind::Races, season(2021)),
            "https://example.test/api/f1/races.php?season=2021"
        );
        assert_eq!(
            client.endpoint_url(DataKind::Qualifying, season(2021)),
            "https://example.test/api/f1/qualifying.php?season=2021"
        );
        assert_eq!(
            client.endpoint_url(DataKind::Results, season(2021)),
            "https://example.test/api/f1/results.php?season=2021"
        );
    }

    #[test]
    fn test_default_base() {
        let client = ApiClient::new(DEFAULT_API_BASE).unwrap();
        assert_eq!(
            client.endpoint_url(DataKind::Results, season(2023)),
            format!("{}/results.php?season=2023", DEFAULT_API_BASE)
        );
    }

    #[tokio::test]
    async fn test_fetch_season_parses_bodies() {
        let client = ApiClient::new(test_server::serve(test_server::season_route)).unwrap();

        let data = client.fetch_season(season(2021)).await.unwrap();

        let rounds: Vec<u32> = data.races.iter().map(|r| r.round).collect();
        assert_eq!(rounds, vec![2, 1]);
        assert_eq!(data.qualifying[0].q3.as_deref(), Some("1:28.997"));
        assert_eq!(data.results[0].driver.full_name(), "Lewis Hamilton");
        assert_eq!(data.results[0].points.as_deref(), Some("0"));
        assert_eq!(data.results[0].laps, None);
    }

    #[tokio::test]
    async fn test_server_error_names_failing_kind() {
        let client =
            ApiClient::new(test_server::serve(test_server::failing_qualifying_route)).unwrap();

        let err = client.fetch_season(season(2021)).await.unwrap_err();

        assert_eq!(format!("{:#}", err), "Error fetching qualifying data: Server error: boom");
        assert!(matches!(
            err.downcast_ref::<ApiError>(),
            Some(ApiError::ServerError { status: 500, .. })
        ));
    }

    #[tokio::test]
    async fn test_unparseable_body_is_an_error() {
        fn route(path: &str) -> (u16, String) {
            if path.contains("/results.php") {
                (200, "<html>maintenance</html>".to_string())
            } else {
                test_server::season_route(path)
            }
        }
        let client = ApiClient::new(test_server::serve(route)).unwrap();

        let err = client.fetch_results(season(2021)).await.unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.starts_with("Error fetching results data"));
        assert!(message.contains("Failed to parse JSON response"));
    }

    #[tokio::test]
    async fn test_join_season_all_succeed() {
        let data = join_season(
            ready(Ok::<Vec<Race>, anyhow::Error>(vec![race(1), race(2)])),
            ready(Ok::<Vec<QualifyingEntry>, anyhow::Error>(vec![])),
            ready(Ok::<Vec<ResultEntry>, anyhow::Error>(vec![])),
        )
        .await
        .unwrap();
        assert_eq!(data.races.len(), 2);
    }

    #[tokio::test]
    async fn test_join_season_fails_fast() {
        // Races never resolve; the qualifying failure must still end the join.
        let result = join_season(
            pending::<Result<Vec<Race>>>(),
            ready(Err::<Vec<QualifyingEntry>, _>(anyhow::anyhow!(
                "Error fetching qualifying data"
            ))),
            ready(Ok::<Vec<ResultEntry>, anyhow::Error>(vec![])),
        )
        .await;

        let err = result.unwrap_err();
        assert!(err.to_string().contains("qualifying"));
    }
}
