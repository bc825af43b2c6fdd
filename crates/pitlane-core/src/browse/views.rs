//! Builds the races and race-detail tables from a loaded season.

use crate::models::{Constructor, Driver, SeasonData};
use crate::utils::{or_placeholder, PLACEHOLDER};

use super::table::{Cell, LinkTarget, Table};

pub const RACE_HEADERS: [&str; 2] = ["Round", "Race Name"];
pub const QUALIFYING_HEADERS: [&str; 6] = ["Position", "Driver", "Constructor", "Q1", "Q2", "Q3"];
pub const RESULTS_HEADERS: [&str; 5] = ["Position", "Driver", "Constructor", "Laps", "Points"];

/// All races of the season, ascending by round. The race name links to its detail.
pub fn races_table(data: &SeasonData) -> Table {
    let rows = data.races_by_round().into_iter().map(|race| {
        vec![
            Cell::text(race.round.to_string()),
            Cell::link(race.name.clone(), LinkTarget::Race(race.round)),
        ]
    });
    Table::build(RACE_HEADERS, rows)
}

/// Qualifying entries for `round`, in source order.
pub fn qualifying_table(data: &SeasonData, round: u32) -> Table {
    let rows = data.qualifying_for(round).into_iter().map(|entry| {
        vec![
            Cell::text(or_placeholder(entry.position.as_deref())),
            driver_cell(&entry.driver),
            constructor_cell(&entry.constructor),
            Cell::text(or_placeholder(entry.q1.as_deref())),
            Cell::text(or_placeholder(entry.q2.as_deref())),
            Cell::text(or_placeholder(entry.q3.as_deref())),
        ]
    });
    Table::build(QUALIFYING_HEADERS, rows)
}

/// Race results for `round`, in source order.
pub fn results_table(data: &SeasonData, round: u32) -> Table {
    let rows = data.results_for(round).into_iter().map(|entry| {
        vec![
            Cell::text(or_placeholder(entry.position.as_deref())),
            driver_cell(&entry.driver),
            constructor_cell(&entry.constructor),
            Cell::text(or_placeholder(entry.laps.as_deref())),
            Cell::text(or_placeholder(entry.points.as_deref())),
        ]
    });
    Table::build(RESULTS_HEADERS, rows)
}

fn driver_cell(driver: &Driver) -> Cell {
    let name = driver.full_name();
    let label = if name.is_empty() {
        PLACEHOLDER.to_string()
    } else {
        name
    };
    Cell::link(label, LinkTarget::Driver(driver.clone()))
}

fn constructor_cell(constructor: &Constructor) -> Cell {
    Cell::link(
        or_placeholder(constructor.name.as_deref()),
        LinkTarget::Constructor(constructor.clone()),
    )
}
