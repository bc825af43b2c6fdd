//! Toolkit-independent table model.
//!
//! A `Table` is a header row plus body rows of `Cell`s. Cells are either
//! plain text or links; a link carries the `LinkTarget` that the front-end
//! turns into `Action::Activate` when the user follows it.

use crate::models::{Constructor, Driver};

/// What a link cell opens when activated.
#[derive(Debug, Clone, PartialEq)]
pub enum LinkTarget {
    /// Open the race detail for this round
    Race(u32),
    /// Open the circuit dialog for the race in this round
    Circuit(u32),
    Driver(Driver),
    Constructor(Constructor),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Link { label: String, target: LinkTarget },
}

impl Cell {
    pub fn text(text: impl Into<String>) -> Self {
        Cell::Text(text.into())
    }

    pub fn link(label: impl Into<String>, target: LinkTarget) -> Self {
        Cell::Link {
            label: label.into(),
            target,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Cell::Text(text) => text,
            Cell::Link { label, .. } => label,
        }
    }

    pub fn target(&self) -> Option<&LinkTarget> {
        match self {
            Cell::Text(_) => None,
            Cell::Link { target, .. } => Some(target),
        }
    }

    pub fn is_link(&self) -> bool {
        matches!(self, Cell::Link { .. })
    }
}

impl From<String> for Cell {
    fn from(text: String) -> Self {
        Cell::Text(text)
    }
}

impl From<&str> for Cell {
    fn from(text: &str) -> Self {
        Cell::Text(text.to_string())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Build a table with one header row and one body row per entry of
    /// `rows`, keeping row and column order exactly as given.
    pub fn build<H, R>(headers: H, rows: R) -> Self
    where
        H: IntoIterator,
        H::Item: Into<String>,
        R: IntoIterator<Item = Vec<Cell>>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: rows.into_iter().collect(),
        }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&[Cell]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Text of one column, top to bottom.
    pub fn column(&self, index: usize) -> Vec<&str> {
        self.rows
            .iter()
            .map(|row| row.get(index).map(Cell::label).unwrap_or(""))
            .collect()
    }

    /// First link in `row` matching the predicate.
    pub fn find_link(&self, row: usize, pred: impl Fn(&LinkTarget) -> bool) -> Option<&LinkTarget> {
        self.rows
            .get(row)?
            .iter()
            .filter_map(Cell::target)
            .find(|target| pred(target))
    }
}
