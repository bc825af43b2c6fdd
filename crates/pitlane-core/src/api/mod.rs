//! HTTP client for the F1 season API.
//!
//! Each season is served by three endpoints (races, qualifying, results),
//! fetched concurrently and joined fail-fast into a single `SeasonData`.
//!
//! `SeasonSource` is the seam the view controller fetches through, so tests
//! and offline tooling can supply their own data.

pub mod client;
pub mod error;

#[cfg(test)]
pub(crate) mod test_server;

use anyhow::Result;
use async_trait::async_trait;

use crate::models::{Season, SeasonData};

pub use client::{join_season, ApiClient, DEFAULT_API_BASE};
pub use error::ApiError;

/// Something that can produce the full dataset for a season.
#[async_trait]
pub trait SeasonSource: Send + Sync {
    async fn fetch_season(&self, season: Season) -> Result<SeasonData>;
}
