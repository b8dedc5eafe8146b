// Comparison run: resolve categories, build the matrix, then produce the
// league ranking and head-to-head sections of one week's report.

use serde::Serialize;
use tracing::{debug, info};

use crate::categories::{resolve_categories, Category};
use crate::compare::{compare, CategoryRanking, Standing};
use crate::error::CompareError;
use crate::head_to_head::{score_head_to_head, HeadToHeadResult};
use crate::matrix::ComparisonMatrix;
use crate::policy::{CategoryPolicy, Sport};
use crate::stats::{RawStat, RosterEntry, TeamId};

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// Everything the data-access layer hands over for one league-week.
#[derive(Debug, Clone)]
pub struct WeekInput {
    pub league_name: String,
    pub sport: Sport,
    pub week: u32,
    pub roster: Vec<RosterEntry>,
    /// Per-team stats in upstream order. The first non-empty entry is the
    /// category sample.
    pub team_stats: Vec<(TeamId, Vec<RawStat>)>,
    /// Actual pairings for the week.
    pub matchups: Vec<(TeamId, TeamId)>,
    pub policy: CategoryPolicy,
}

impl WeekInput {
    pub fn roster_entry(&self, team_id: &TeamId) -> Option<&RosterEntry> {
        self.roster.iter().find(|e| &e.team_id == team_id)
    }

    fn stats_for(&self, team_id: &TeamId) -> Option<&[RawStat]> {
        self.team_stats
            .iter()
            .find(|(id, _)| id == team_id)
            .map(|(_, stats)| stats.as_slice())
    }

    fn scheduled_opponent(&self, team_id: &TeamId) -> Option<TeamId> {
        self.matchups.iter().find_map(|(a, b)| {
            if a == team_id {
                Some(b.clone())
            } else if b == team_id {
                Some(a.clone())
            } else {
                None
            }
        })
    }
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// Structured result of one comparison run. Rendering is left to the caller.
#[derive(Debug, Clone, Serialize)]
pub struct WeekReport {
    pub league_name: String,
    pub sport: Sport,
    pub week: u32,
    pub selected: RosterEntry,
    /// The team the selected team actually plays this week, if any.
    pub scheduled_opponent: Option<TeamId>,
    pub roster: Vec<RosterEntry>,
    pub matchups: Vec<(TeamId, TeamId)>,
    pub categories: Vec<Category>,
    pub rankings: Vec<CategoryRanking>,
    pub head_to_head: Vec<HeadToHeadResult>,
}

impl WeekReport {
    /// Display name for a team, falling back to its id.
    pub fn team_name<'a>(&'a self, team_id: &'a TeamId) -> &'a str {
        self.roster
            .iter()
            .find(|e| &e.team_id == team_id)
            .map(|e| e.name.as_str())
            .unwrap_or_else(|| team_id.as_str())
    }

    /// Aggregate all-play record across every opponent: (wins, losses, ties).
    pub fn all_play_record(&self) -> (usize, usize, usize) {
        self.head_to_head.iter().fold((0, 0, 0), |(w, l, t), r| {
            (w + r.wins, l + r.losses, t + r.ties)
        })
    }
}

// ---------------------------------------------------------------------------
// Run
// ---------------------------------------------------------------------------

/// Run the full comparison for `selected`.
pub fn run_comparison(input: &WeekInput, selected: &TeamId) -> Result<WeekReport, CompareError> {
    let selected_entry = input
        .roster_entry(selected)
        .cloned()
        .ok_or_else(|| CompareError::UnknownTeam {
            team_id: selected.clone(),
        })?;

    let (sample_team, sample) = input
        .team_stats
        .iter()
        .find(|(_, stats)| !stats.is_empty())
        .ok_or_else(|| CompareError::UnresolvableSchema {
            reason: "no team reported any stats".into(),
        })?;
    debug!(team = %sample_team, stats = sample.len(), "resolving categories from sample");

    let categories = resolve_categories(sample, &input.policy);
    if categories.is_empty() {
        return Err(CompareError::UnresolvableSchema {
            reason: "sample stats contain no comparable categories".into(),
        });
    }

    if input.stats_for(selected).map_or(true, |s| s.is_empty()) {
        return Err(CompareError::NoStatsForTeam {
            team_name: selected_entry.name.clone(),
            week: input.week,
        });
    }

    let matrix = ComparisonMatrix::build(
        &categories,
        input.team_stats.iter().map(|(id, stats)| (id, stats)),
    );

    let roster: Vec<TeamId> = input.roster.iter().map(|e| e.team_id.clone()).collect();
    let rankings = compare(selected, &matrix, &categories, &roster);
    let head_to_head = score_head_to_head(selected, &matrix, &categories, &roster);

    let unavailable = rankings
        .iter()
        .filter(|r| matches!(r.standing, Standing::NotAvailable))
        .count();
    info!(
        team = %selected_entry.name,
        week = input.week,
        categories = categories.len(),
        unavailable,
        opponents = head_to_head.len(),
        "comparison complete"
    );

    Ok(WeekReport {
        league_name: input.league_name.clone(),
        sport: input.sport,
        week: input.week,
        selected: selected_entry,
        scheduled_opponent: input.scheduled_opponent(selected),
        roster: input.roster.clone(),
        matchups: input.matchups.clone(),
        categories,
        rankings,
        head_to_head,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
