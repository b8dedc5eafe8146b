// Raw per-team statistic records as handed over by the data-access layer.
//
// Upstream records carry ad-hoc optional fields. They are resolved into these
// explicit structs once, at the boundary, so nothing downstream has to check
// for missing attributes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a team within one league.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamId(pub String);

impl TeamId {
    pub fn new(id: impl Into<String>) -> Self {
        TeamId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TeamId {
    fn from(s: &str) -> Self {
        TeamId(s.to_string())
    }
}

/// A raw reading as reported upstream: either already numeric or a string
/// that may or may not parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Text(String),
}

impl From<f64> for RawValue {
    fn from(v: f64) -> Self {
        RawValue::Number(v)
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::Text(s.to_string())
    }
}

/// One reported statistic for one team in one week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawStat {
    /// Stable provider identifier. Defaults to the stat's position in the
    /// team's list when the provider omits it.
    pub category_id: String,
    /// Human label, may carry unit hints such as `%` or `/`.
    pub display_name: String,
    /// `None` when the provider sent nothing usable (null, empty object).
    pub raw_value: Option<RawValue>,
}

impl RawStat {
    pub fn new(
        category_id: impl Into<String>,
        display_name: impl Into<String>,
        raw_value: Option<RawValue>,
    ) -> Self {
        RawStat {
            category_id: category_id.into(),
            display_name: display_name.into(),
            raw_value,
        }
    }
}

/// A team participating in the league for the week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub team_id: TeamId,
    pub name: String,
    #[serde(default)]
    pub manager: Option<String>,
}

impl RosterEntry {
    pub fn new(team_id: impl Into<String>, name: impl Into<String>) -> Self {
        RosterEntry {
            team_id: TeamId(team_id.into()),
            name: name.into(),
            manager: None,
        }
    }
}
