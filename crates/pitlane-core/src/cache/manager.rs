use anyhow::{Context, Result};
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use crate::models::{DataKind, QualifyingEntry, Race, ResultEntry, Season, SeasonData};

use super::KeyValueStore;

/// Season-level cache contract used by the view controller.
///
/// The three datasets of a season are either all present or all absent.
pub trait SeasonStore {
    /// True iff races, qualifying and results are all stored for `season`.
    fn has(&self, season: Season) -> bool;

    /// `Ok(None)` if any of the three entries is missing; `Err` if a stored
    /// value cannot be parsed.
    fn read(&self, season: Season) -> Result<Option<SeasonData>>;

    fn write(&mut self, season: Season, data: &SeasonData) -> Result<()>;
}

/// `SeasonStore` over any `KeyValueStore`, one JSON array per key.
pub struct SeasonCache<S> {
    store: S,
}

impl<S: KeyValueStore> SeasonCache<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    fn load<T: DeserializeOwned>(&self, kind: DataKind, season: Season) -> Result<Option<Vec<T>>> {
        let key = kind.cache_key(season);
        let Some(contents) = self.store.get(&key)? else {
            return Ok(None);
        };

        let items = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse cache entry: {}", key))?;
        Ok(Some(items))
    }

    fn serialize<T: Serialize>(kind: DataKind, season: Season, items: &[T]) -> Result<(String, String)> {
        let key = kind.cache_key(season);
        let value = serde_json::to_string(items)
            .with_context(|| format!("Failed to serialize cache entry: {}", key))?;
        Ok((key, value))
    }
}

impl<S: KeyValueStore> SeasonStore for SeasonCache<S> {
    fn has(&self, season: Season) -> bool {
        DataKind::ALL
            .iter()
            .all(|kind| self.store.contains(&kind.cache_key(season)))
    }

    fn read(&self, season: Season) -> Result<Option<SeasonData>> {
        let races: Option<Vec<Race>> = self.load(DataKind::Races, season)?;
        let qualifying: Option<Vec<QualifyingEntry>> = self.load(DataKind::Qualifying, season)?;
        let results: Option<Vec<ResultEntry>> = self.load(DataKind::Results, season)?;

        match (races, qualifying, results) {
            (Some(races), Some(qualifying), Some(results)) => {
                debug!(%season, "Season read from cache");
                Ok(Some(SeasonData {
                    races,
                    qualifying,
                    results,
                }))
            }
            _ => Ok(None),
        }
    }

    fn write(&mut self, season: Season, data: &SeasonData) -> Result<()> {
        // Serialize everything up front so a failure leaves nothing written
        let entries = [
            Self::serialize(DataKind::Races, season, &data.races)?,
            Self::serialize(DataKind::Qualifying, season, &data.qualifying)?,
            Self::serialize(DataKind::Results, season, &data.results)?,
        ];

        for (key, value) in entries {
            self.store.set(&key, value)?;
        }

        debug!(%season, "Season written to cache");
        Ok(())
    }
}
