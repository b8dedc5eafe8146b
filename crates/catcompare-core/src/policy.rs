// Category policy tables: which stat ids are percentages, which are
// lower-is-better, and which `/` labels are real categories rather than
// composite ratios.
//
// Id lookups are authoritative and checked first; display-name patterns are
// the fallback. Both live here so the heuristics are visible in one place and
// can be extended from configuration.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Sport
// ---------------------------------------------------------------------------

/// Sports the upstream provider offers category leagues for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sport {
    #[default]
    Nba,
    Nfl,
    Nhl,
    Mlb,
}

impl Sport {
    /// Provider code, e.g. `"nba"`.
    pub fn code(&self) -> &'static str {
        match self {
            Sport::Nba => "nba",
            Sport::Nfl => "nfl",
            Sport::Nhl => "nhl",
            Sport::Mlb => "mlb",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Sport::Nba => "NBA",
            Sport::Nfl => "NFL",
            Sport::Nhl => "NHL",
            Sport::Mlb => "MLB",
        }
    }
}

impl fmt::Display for Sport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sport `{0}` (expected nba, nfl, nhl or mlb)")]
pub struct UnknownSport(pub String);

impl FromStr for Sport {
    type Err = UnknownSport;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nba" => Ok(Sport::Nba),
            "nfl" => Ok(Sport::Nfl),
            "nhl" => Ok(Sport::Nhl),
            "mlb" => Ok(Sport::Mlb),
            other => Err(UnknownSport(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Provider stat ids (basketball)
// ---------------------------------------------------------------------------

pub const NBA_STAT_FG_PCT: &str = "5";
pub const NBA_STAT_FT_PCT: &str = "8";
pub const NBA_STAT_3PT_PCT: &str = "11";
pub const NBA_STAT_TURNOVERS: &str = "19";

/// The only `/` label that is a category in its own right.
pub const ASSIST_TO_TURNOVER_LABEL: &str = "A/T";

// ---------------------------------------------------------------------------
// CategoryPolicy
// ---------------------------------------------------------------------------

/// Lookup tables that decide category semantics for one sport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryPolicy {
    pub percentage_ids: BTreeSet<String>,
    pub lower_is_better_ids: BTreeSet<String>,
    pub ratio_allow_list: BTreeSet<String>,
}

impl CategoryPolicy {
    /// Default tables for a sport. Only basketball ships with known ids; the
    /// other sports rely on name patterns until configured.
    pub fn for_sport(sport: Sport) -> Self {
        let mut policy = CategoryPolicy {
            percentage_ids: BTreeSet::new(),
            lower_is_better_ids: BTreeSet::new(),
            ratio_allow_list: BTreeSet::from([ASSIST_TO_TURNOVER_LABEL.to_string()]),
        };
        if sport == Sport::Nba {
            policy.percentage_ids.extend(
                [NBA_STAT_FG_PCT, NBA_STAT_FT_PCT, NBA_STAT_3PT_PCT]
                    .into_iter()
                    .map(String::from),
            );
            policy
                .lower_is_better_ids
                .insert(NBA_STAT_TURNOVERS.to_string());
        }
        policy
    }

    /// Add extra ids/labels on top of the current tables.
    pub fn extend(
        &mut self,
        percentage_ids: impl IntoIterator<Item = String>,
        lower_is_better_ids: impl IntoIterator<Item = String>,
        ratio_allow_list: impl IntoIterator<Item = String>,
    ) {
        self.percentage_ids.extend(percentage_ids);
        self.lower_is_better_ids.extend(lower_is_better_ids);
        self.ratio_allow_list.extend(ratio_allow_list);
    }

    /// Percentage categories: known id, or a `%` in the label.
    pub fn is_percentage(&self, category_id: &str, display_name: &str) -> bool {
        self.percentage_ids.contains(category_id) || display_name.contains('%')
    }

    /// Lower-is-better categories: known id (short-circuits), else a
    /// turnover-style label.
    pub fn is_lower_better(&self, category_id: &str, display_name: &str) -> bool {
        if self.lower_is_better_ids.contains(category_id) {
            return true;
        }
        is_turnover_label(display_name)
    }

    /// Composite ratio stats such as `FGM/FGA` are not independently
    /// comparable and are skipped, except for allow-listed labels.
    pub fn is_composite_ratio(&self, display_name: &str) -> bool {
        display_name.contains('/') && !self.ratio_allow_list.contains(display_name)
    }
}

impl Default for CategoryPolicy {
    fn default() -> Self {
        Self::for_sport(Sport::default())
    }
}

/// Turnover naming conventions: "Turnovers", "TO", "TOV", "TO pg", "Avg TO".
fn is_turnover_label(display_name: &str) -> bool {
    let name = display_name.to_lowercase();
    name.contains("turnover")
        || name == "to"
        || name == "tov"
        || name.starts_with("to ")
        || name.ends_with(" to")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
