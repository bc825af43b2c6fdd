use serde::{Deserialize, Serialize};

use crate::utils::format::format_date;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Race {
    pub round: u32,
    pub name: String,
    #[serde(default)]
    pub year: u16,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub circuit: Option<Circuit>,
}

impl Race {
    /// Race date formatted for display, falling back to the raw value
    pub fn display_date(&self) -> Option<String> {
        self.date.as_deref().filter(|d| !d.is_empty()).map(format_date)
    }
}

/// Reference to a race embedded in qualifying and result entries.
/// Only the round is used to join entries to races.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceRef {
    pub round: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Circuit {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

impl Circuit {
    /// "Location, Country" when either part is known.
    pub fn place(&self) -> Option<String> {
        let parts: Vec<&str> = [self.location.as_deref(), self.country.as_deref()]
            .into_iter()
            .flatten()
            .filter(|p| !p.is_empty())
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(", "))
        }
    }
}
