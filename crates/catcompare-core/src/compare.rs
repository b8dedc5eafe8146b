// League comparator: where the selected team stands in each category against
// the rest of the league.

use serde::Serialize;
use std::cmp::Ordering;

use crate::categories::{Category, Polarity};
use crate::matrix::ComparisonMatrix;
use crate::normalize::StatValue;
use crate::stats::TeamId;

// ---------------------------------------------------------------------------
// Performance tier
// ---------------------------------------------------------------------------

/// Share of opponents beaten at or above which a category is a strength.
pub const TOP_TIER_RATIO: f64 = 0.7;
/// Share of opponents beaten below which a category is a weakness.
pub const BOTTOM_TIER_RATIO: f64 = 0.3;

/// Coarse classification of the opponents-beaten ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PerformanceTier {
    Top,
    Middle,
    Bottom,
}

impl PerformanceTier {
    /// Classify `beaten / opponents`. No opponents means no classification.
    pub fn classify(beaten: usize, opponents: usize) -> Option<Self> {
        if opponents == 0 {
            return None;
        }
        let ratio = beaten as f64 / opponents as f64;
        Some(if ratio >= TOP_TIER_RATIO {
            PerformanceTier::Top
        } else if ratio < BOTTOM_TIER_RATIO {
            PerformanceTier::Bottom
        } else {
            PerformanceTier::Middle
        })
    }

    pub fn label(&self) -> &'static str {
        match self {
            PerformanceTier::Top => "top",
            PerformanceTier::Middle => "middle",
            PerformanceTier::Bottom => "bottom",
        }
    }
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// A team and its value in one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankEntry {
    pub team_id: TeamId,
    pub value: StatValue,
}

/// Ranking data for the selected team in one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankResult {
    pub best: RankEntry,
    pub worst: RankEntry,
    /// Other teams the selected team strictly outperforms.
    pub beaten_count: usize,
    /// Other teams with a comparable value.
    pub opponent_count: usize,
    /// 1-based position: one plus the number of teams strictly better.
    pub rank: usize,
    /// Teams with a value in this category, the selected team included.
    pub ranked_teams: usize,
    pub tier: Option<PerformanceTier>,
}

impl RankResult {
    /// `"beaten/opponents"`, e.g. `"7/11"` or `"0/0"`.
    pub fn beaten_ratio(&self) -> String {
        format!("{}/{}", self.beaten_count, self.opponent_count)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Standing {
    /// The selected team has no comparable value; nothing was ranked.
    NotAvailable,
    Ranked { value: StatValue, result: RankResult },
}

/// One report row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryRanking {
    pub category: Category,
    pub standing: Standing,
}

// ---------------------------------------------------------------------------
// Comparison
// ---------------------------------------------------------------------------

/// Rank the selected team in every category of the matrix.
///
/// Only roster members take part. Teams without a value in a category are
/// left out of that category rather than ranked last. Columns are looked up
/// by category id, so `categories` may be any subset or ordering of the
/// matrix's categories.
pub fn compare(
    selected: &TeamId,
    matrix: &ComparisonMatrix,
    categories: &[Category],
    roster: &[TeamId],
) -> Vec<CategoryRanking> {
    categories
        .iter()
        .map(|category| CategoryRanking {
            category: category.clone(),
            standing: rank_category(selected, matrix, category, roster),
        })
        .collect()
}

fn rank_category(
    selected: &TeamId,
    matrix: &ComparisonMatrix,
    category: &Category,
    roster: &[TeamId],
) -> Standing {
    let polarity = category.polarity;
    let Some(own) = matrix.get(selected, &category.id) else {
        return Standing::NotAvailable;
    };

    let all_values: Vec<(&TeamId, &StatValue)> = roster
        .iter()
        .filter_map(|team| matrix.get(team, &category.id).map(|v| (team, v)))
        .collect();

    let others: Vec<&StatValue> = all_values
        .iter()
        .filter(|(team, _)| *team != selected)
        .map(|(_, v)| *v)
        .collect();

    let beaten_count = others.iter().filter(|v| polarity.beats(own, v)).count();
    let opponent_count = others.len();
    let better_count = others.iter().filter(|v| polarity.beats(v, own)).count();

    // The selected team is always in `all_values` when it is on the roster;
    // fall back to its own value when the caller passed a roster without it.
    let (best, worst) = best_and_worst(&all_values, polarity)
        .unwrap_or_else(|| (RankEntry::new(selected, own), RankEntry::new(selected, own)));

    Standing::Ranked {
        value: own.clone(),
        result: RankResult {
            best,
            worst,
            beaten_count,
            opponent_count,
            rank: better_count + 1,
            ranked_teams: all_values.len(),
            tier: PerformanceTier::classify(beaten_count, opponent_count),
        },
    }
}

impl RankEntry {
    fn new(team_id: &TeamId, value: &StatValue) -> Self {
        RankEntry {
            team_id: team_id.clone(),
            value: value.clone(),
        }
    }
}

/// Head and tail of the values stably sorted best-first: among tied values the
/// first encountered is best and the last encountered is worst. Values that
/// are incomparable with the current pick are passed over.
fn best_and_worst(
    values: &[(&TeamId, &StatValue)],
    polarity: Polarity,
) -> Option<(RankEntry, RankEntry)> {
    let (first, rest) = values.split_first()?;
    let mut best = *first;
    let mut worst = *first;
    for candidate in rest {
        if polarity.beats(candidate.1, best.1) {
            best = *candidate;
        }
        if matches!(
            polarity.compare(candidate.1, worst.1),
            Some(Ordering::Less | Ordering::Equal)
        ) {
            worst = *candidate;
        }
    }
    Some((RankEntry::new(best.0, best.1), RankEntry::new(worst.0, worst.1)))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
