//! Qualifying and race classification entries.
//!
//! The API is loose about scalar types: positions, laps and points arrive as
//! numbers or strings, and missing values as `null` or `""`. All of these
//! are normalized to `Option<String>` so that "missing" has one meaning.

use serde::{Deserialize, Serialize};

use super::RaceRef;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Driver {
    #[serde(default)]
    pub forename: Option<String>,
    #[serde(default)]
    pub surname: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub nationality: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

impl Driver {
    /// Forename and surname joined by a space; an absent part counts as empty.
    pub fn full_name(&self) -> String {
        format!(
            "{} {}",
            self.forename.as_deref().unwrap_or(""),
            self.surname.as_deref().unwrap_or("")
        )
        .trim()
        .to_string()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Constructor {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub nationality: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualifyingEntry {
    pub race: RaceRef,
    #[serde(default, deserialize_with = "deserialize_string_or_number")]
    pub position: Option<String>,
    #[serde(default)]
    pub driver: Driver,
    #[serde(default)]
    pub constructor: Constructor,
    #[serde(default, deserialize_with = "deserialize_string_or_number")]
    pub q1: Option<String>,
    #[serde(default, deserialize_with = "deserialize_string_or_number")]
    pub q2: Option<String>,
    #[serde(default, deserialize_with = "deserialize_string_or_number")]
    pub q3: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultEntry {
    pub race: RaceRef,
    #[serde(default, deserialize_with = "deserialize_string_or_number")]
    pub position: Option<String>,
    #[serde(default)]
    pub driver: Driver,
    #[serde(default)]
    pub constructor: Constructor,
    #[serde(default, deserialize_with = "deserialize_string_or_number")]
    pub laps: Option<String>,
    #[serde(default, deserialize_with = "deserialize_string_or_number")]
    pub points: Option<String>,
}

// Helper to deserialize strings, integers or decimals into an optional string.
// Empty strings and nulls become None.
fn deserialize_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de;

    struct StringOrNumberVisitor;

    impl<'de> de::Visitor<'de> for StringOrNumberVisitor {
        type Value = Option<String>;

        fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
            formatter.write_str("a string or number")
        }

        fn visit_str<E>(self, v: &str) -> Result<Self::Value, E> {
            let v = v.trim();
            if v.is_empty() {
                Ok(None)
            } else {
                Ok(Some(v.to_string()))
            }
        }

        fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E> {
            // 25.0 -> "25", 0.5 -> "0.5"
            Ok(Some(v.to_string()))
        }

        fn visit_none<E>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E> {
            Ok(None)
        }
    }

    deserializer.deserialize_any(StringOrNumberVisitor)
}
