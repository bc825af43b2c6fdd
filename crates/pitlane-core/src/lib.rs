//! Pitlane core: Formula 1 season data, fetched once and cached per season.
//!
//! - `api`: HTTP client for the races/qualifying/results endpoints
//! - `cache`: flat key/value season cache
//! - `browse`: the view controller and table model
//! - `models`: season, race and classification types

pub mod api;
pub mod browse;
pub mod cache;
pub mod config;
pub mod models;
pub mod utils;
