//! Local season cache.
//!
//! Seasons are stored as flat key/value pairs: the key is `<kind>_<season>`
//! (e.g. `races_2021`) and the value is the serialized JSON array for that
//! kind. Entries are written once per season and never expire.
//!
//! - `store`: raw string stores (`FileStore` on disk, `MemoryStore` in memory)
//! - `manager`: the typed `SeasonCache` implementing `SeasonStore`

pub mod manager;
pub mod store;

pub use manager::{SeasonCache, SeasonStore};
pub use store::{FileStore, KeyValueStore, MemoryStore};
