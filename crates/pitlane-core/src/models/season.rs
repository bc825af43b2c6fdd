use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{QualifyingEntry, Race, ResultEntry};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SeasonError {
    #[error("Unsupported season: {0} (expected one of 2020-2023)")]
    Unsupported(u16),

    #[error("Invalid season: {0:?}")]
    Invalid(String),
}

/// A championship year that can be browsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Season(u16);

impl Season {
    /// Every season offered by the season selector, oldest first.
    pub const ALL: [Season; 4] = [Season(2020), Season(2021), Season(2022), Season(2023)];

    pub fn new(year: u16) -> Result<Self, SeasonError> {
        Self::ALL
            .iter()
            .copied()
            .find(|s| s.0 == year)
            .ok_or(SeasonError::Unsupported(year))
    }

    pub fn year(&self) -> u16 {
        self.0
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Season {
    type Err = SeasonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let year: u16 = s
            .trim()
            .parse()
            .map_err(|_| SeasonError::Invalid(s.to_string()))?;
        Self::new(year)
    }
}

/// The three datasets fetched and cached together for a season.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataKind {
    Races,
    Qualifying,
    Results,
}

impl DataKind {
    pub const ALL: [DataKind; 3] = [DataKind::Races, DataKind::Qualifying, DataKind::Results];

    /// Prefix used for cache keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            DataKind::Races => "races",
            DataKind::Qualifying => "qualifying",
            DataKind::Results => "results",
        }
    }

    /// API script serving this kind.
    pub fn endpoint(&self) -> &'static str {
        match self {
            DataKind::Races => "races.php",
            DataKind::Qualifying => "qualifying.php",
            DataKind::Results => "results.php",
        }
    }

    /// Human label used in error messages ("Error fetching race data").
    pub fn label(&self) -> &'static str {
        match self {
            DataKind::Races => "race",
            DataKind::Qualifying => "qualifying",
            DataKind::Results => "results",
        }
    }

    /// Cache key for this kind in the given season, e.g. `races_2021`.
    pub fn cache_key(&self, season: Season) -> String {
        format!("{}_{}", self.as_str(), season)
    }
}

impl fmt::Display for DataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeasonData {
    pub races: Vec<Race>,
    pub qualifying: Vec<QualifyingEntry>,
    pub results: Vec<ResultEntry>,
}

impl SeasonData {
    pub fn race(&self, round: u32) -> Option<&Race> {
        self.races.iter().find(|r| r.round == round)
    }

    /// Races ordered by round, ascending.
    pub fn races_by_round(&self) -> Vec<&Race> {
        let mut races: Vec<&Race> = self.races.iter().collect();
        races.sort_by_key(|r| r.round);
        races
    }

    pub fn qualifying_for(&self, round: u32) -> Vec<&QualifyingEntry> {
        self.qualifying
            .iter()
            .filter(|q| q.race.round == round)
            .collect()
    }

    pub fn results_for(&self, round: u32) -> Vec<&ResultEntry> {
        self.results.iter().filter(|r| r.race.round == round).collect()
    }
}
