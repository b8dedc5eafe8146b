// Week snapshot loading: the JSON document exported by the data-access layer
// for one league-week, resolved into the engine's explicit input types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

use catcompare_core::{CategoryPolicy, RawStat, RawValue, RosterEntry, Sport, TeamId, WeekInput};

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to read snapshot {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse snapshot {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

// ---------------------------------------------------------------------------
// Document shape
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct WeekSnapshot {
    pub league: LeagueInfo,
    pub week: u32,
    #[serde(default)]
    pub fetched_at: Option<DateTime<Utc>>,
    pub teams: Vec<TeamRecord>,
    #[serde(default)]
    pub matchups: Vec<MatchupRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LeagueInfo {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub sport: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TeamRecord {
    #[serde(deserialize_with = "de_id")]
    pub team_id: String,
    pub name: String,
    #[serde(default)]
    pub manager: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchupRecord {
    #[serde(default)]
    pub team1: Option<MatchupSide>,
    #[serde(default)]
    pub team2: Option<MatchupSide>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchupSide {
    #[serde(deserialize_with = "de_id")]
    pub team_id: String,
    #[serde(default)]
    pub stats: Vec<StatRecord>,
}

/// Every field is optional upstream; `value` in particular may be a string,
/// a number, `null` or an empty object.
#[derive(Debug, Clone, Deserialize)]
pub struct StatRecord {
    #[serde(default)]
    pub stat_id: Option<Value>,
    #[serde(default)]
    pub display: Option<String>,
    #[serde(default)]
    pub value: Value,
}

/// Provider ids show up both as strings and as bare numbers.
fn de_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum IdRepr {
        Text(String),
        Int(i64),
    }

    Ok(match IdRepr::deserialize(deserializer)? {
        IdRepr::Text(s) => s,
        IdRepr::Int(n) => n.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Read and parse a snapshot file.
pub fn load_snapshot(path: &Path) -> Result<WeekSnapshot, SnapshotError> {
    let text = std::fs::read_to_string(path).map_err(|source| SnapshotError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let snapshot = parse_snapshot(&text).map_err(|source| SnapshotError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    info!(
        league = %snapshot.league.name,
        week = snapshot.week,
        teams = snapshot.teams.len(),
        matchups = snapshot.matchups.len(),
        "snapshot loaded from {}",
        path.display()
    );
    Ok(snapshot)
}

pub fn parse_snapshot(text: &str) -> Result<WeekSnapshot, serde_json::Error> {
    serde_json::from_str(text)
}

impl WeekSnapshot {
    /// Sport recorded by the provider, if present and recognised.
    pub fn sport(&self) -> Option<Sport> {
        let raw = self.league.sport.as_deref()?;
        match raw.parse() {
            Ok(sport) => Some(sport),
            Err(e) => {
                warn!("ignoring snapshot sport: {e}");
                None
            }
        }
    }

    pub fn roster(&self) -> Vec<RosterEntry> {
        self.teams
            .iter()
            .map(|t| RosterEntry {
                team_id: TeamId::new(t.team_id.clone()),
                name: t.name.clone(),
                manager: t.manager.clone(),
            })
            .collect()
    }

    /// Per-team stats in matchup order. Sides with no stats are skipped; a
    /// team appearing twice keeps its first position and its latest stats.
    pub fn team_stats(&self) -> Vec<(TeamId, Vec<RawStat>)> {
        let mut out: Vec<(TeamId, Vec<RawStat>)> = Vec::new();
        for side in self.sides() {
            if side.stats.is_empty() {
                continue;
            }
            let team_id = TeamId::new(side.team_id.clone());
            let stats = convert_stats(&side.stats, &team_id);
            match out.iter_mut().find(|(id, _)| *id == team_id) {
                Some(slot) => {
                    warn!(team = %team_id, "team appears in more than one matchup; using the later stats");
                    slot.1 = stats;
                }
                None => out.push((team_id, stats)),
            }
        }
        out
    }

    /// Actual pairings for the week. Byes (a missing side) are dropped.
    pub fn pairings(&self) -> Vec<(TeamId, TeamId)> {
        self.matchups
            .iter()
            .filter_map(|m| match (&m.team1, &m.team2) {
                (Some(a), Some(b)) => Some((
                    TeamId::new(a.team_id.clone()),
                    TeamId::new(b.team_id.clone()),
                )),
                _ => None,
            })
            .collect()
    }

    /// Resolve into engine input under the given sport and policy.
    pub fn into_week_input(self, sport: Sport, policy: CategoryPolicy) -> WeekInput {
        let roster = self.roster();
        let team_stats = self.team_stats();
        let matchups = self.pairings();
        WeekInput {
            league_name: self.league.name,
            sport,
            week: self.week,
            roster,
            team_stats,
            matchups,
            policy,
        }
    }

    fn sides(&self) -> impl Iterator<Item = &MatchupSide> {
        self.matchups
            .iter()
            .flat_map(|m| m.team1.iter().chain(m.team2.iter()))
    }
}

// ---------------------------------------------------------------------------
// Record conversion
// ---------------------------------------------------------------------------

fn convert_stats(records: &[StatRecord], team_id: &TeamId) -> Vec<RawStat> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            // Position stands in for a missing id.
            let category_id = match &record.stat_id {
                Some(Value::String(s)) => s.clone(),
                Some(Value::Number(n)) => n.to_string(),
                _ => index.to_string(),
            };
            let display_name = record.display.clone().unwrap_or_default();
            let raw_value = convert_value(&record.value, team_id, &display_name);
            RawStat {
                category_id,
                display_name,
                raw_value,
            }
        })
        .collect()
}

fn convert_value(value: &Value, team_id: &TeamId, display_name: &str) -> Option<RawValue> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(RawValue::Text(s.clone())),
        Value::Number(n) => n.as_f64().map(RawValue::Number),
        // The provider's "attribute not set" marker.
        Value::Object(map) if map.is_empty() => None,
        other => {
            warn!(
                team = %team_id,
                stat = display_name,
                "dropping malformed stat value: {other}"
            );
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
