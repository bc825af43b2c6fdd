//! Data models for Formula 1 season data.
//!
//! - `Season`, `DataKind`, `SeasonData`: the season-scoped unit of fetching and caching
//! - `Race`, `Circuit`: the races calendar for a season
//! - `QualifyingEntry`, `ResultEntry`, `Driver`, `Constructor`: per-race classifications

pub mod race;
pub mod season;
pub mod standings;

pub use race::{Circuit, Race, RaceRef};
pub use season::{DataKind, Season, SeasonData, SeasonError};
pub use standings::{Constructor, Driver, QualifyingEntry, ResultEntry};
