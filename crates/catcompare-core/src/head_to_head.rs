// All-play head-to-head scoring: the selected team against every other team,
// category by category, whether or not they actually met this week.

use serde::Serialize;
use std::cmp::{Ordering, Reverse};
use std::fmt;

use crate::categories::Category;
use crate::matrix::ComparisonMatrix;
use crate::stats::TeamId;

/// Result of one category from the selected team's side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Outcome {
    Win,
    Loss,
    Tie,
}

impl Outcome {
    pub fn code(&self) -> char {
        match self {
            Outcome::Win => 'W',
            Outcome::Loss => 'L',
            Outcome::Tie => 'T',
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryOutcome {
    pub category_id: String,
    pub display_name: String,
    pub outcome: Outcome,
}

/// Category record against one opponent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeadToHeadResult {
    pub opponent: TeamId,
    pub wins: usize,
    pub losses: usize,
    pub ties: usize,
    /// Decided categories in category order. Categories where either side
    /// had no value are absent.
    pub outcomes: Vec<CategoryOutcome>,
}

impl HeadToHeadResult {
    /// `"wins-losses"`, e.g. `"5-4"`.
    pub fn score(&self) -> String {
        format!("{}-{}", self.wins, self.losses)
    }

    /// More category wins than losses.
    pub fn is_winning(&self) -> bool {
        self.wins > self.losses
    }

    pub fn decided_categories(&self) -> usize {
        self.wins + self.losses + self.ties
    }
}

/// Score the selected team against every other roster member.
///
/// Results are ordered by wins, most first. The sort is stable, so opponents
/// with equal wins keep roster order. Matrix columns are found by category
/// id, not by position in `categories`.
pub fn score_head_to_head(
    selected: &TeamId,
    matrix: &ComparisonMatrix,
    categories: &[Category],
    roster: &[TeamId],
) -> Vec<HeadToHeadResult> {
    let mut results: Vec<HeadToHeadResult> = roster
        .iter()
        .filter(|team| *team != selected)
        .map(|opponent| score_opponent(selected, opponent, matrix, categories))
        .collect();

    results.sort_by_key(|r| Reverse(r.wins));
    results
}

fn score_opponent(
    selected: &TeamId,
    opponent: &TeamId,
    matrix: &ComparisonMatrix,
    categories: &[Category],
) -> HeadToHeadResult {
    let mut result = HeadToHeadResult {
        opponent: opponent.clone(),
        wins: 0,
        losses: 0,
        ties: 0,
        outcomes: Vec::with_capacity(categories.len()),
    };

    for category in categories {
        let (Some(ours), Some(theirs)) = (
            matrix.get(selected, &category.id),
            matrix.get(opponent, &category.id),
        ) else {
            continue;
        };
        let outcome = match category.polarity.compare(ours, theirs) {
            Some(Ordering::Greater) => Outcome::Win,
            Some(Ordering::Less) => Outcome::Loss,
            Some(Ordering::Equal) => Outcome::Tie,
            // Text against a number: no meaningful comparison.
            None => continue,
        };
        match outcome {
            Outcome::Win => result.wins += 1,
            Outcome::Loss => result.losses += 1,
            Outcome::Tie => result.ties += 1,
        }
        result.outcomes.push(CategoryOutcome {
            category_id: category.id.clone(),
            display_name: category.display_name.clone(),
            outcome,
        });
    }

    result
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categories::Polarity;
    use crate::stats::{RawStat, RawValue};
    use std::collections::HashMap;

    fn categories() -> Vec<Category> {
        let cat = |id: &str, name: &str, polarity| Category {
            id: id.into(),
            display_name: name.into(),
            polarity,
            is_percentage: false,
        };
        vec![
            cat("12", "PTS", Polarity::HigherIsBetter),
            cat("15", "REB", Polarity::HigherIsBetter),
            cat("19", "TO", Polarity::LowerIsBetter),
        ]
    }

    /// Build a matrix from rows of `[PTS, REB, TO]`; `None` is an empty reading.
    fn matrix(rows: &[(&str, [Option<f64>; 3])]) -> (ComparisonMatrix, Vec<TeamId>) {
        let cats = categories();
        let mut team_stats = HashMap::new();
        for (team, values) in rows {
            let stats = cats
                .iter()
                .zip(values.iter())
                .map(|(c, v)| {
                    let raw = match v {
                        Some(n) => RawValue::Number(*n),
                        None => RawValue::Text(String::new()),
                    };
                    RawStat::new(c.id.clone(), c.display_name.clone(), Some(raw))
                })
                .collect();
            team_stats.insert(TeamId::from(*team), stats);
        }
        let roster = rows.iter().map(|(t, _)| TeamId::from(*t)).collect();
        (ComparisonMatrix::build(&cats, &team_stats), roster)
    }

    #[test]
    fn scores_each_category_by_polarity() {
        let (m, roster) = matrix(&[
            ("me", [Some(500.0), Some(200.0), Some(40.0)]),
            ("a", [Some(450.0), Some(220.0), Some(40.0)]),
        ]);
        let results = score_head_to_head(&"me".into(), &m, &categories(), &roster);
        assert_eq!(results.len(), 1);
        let r = &results[0];
        assert_eq!(r.opponent, TeamId::from("a"));
        assert_eq!((r.wins, r.losses, r.ties), (1, 1, 1));
        let codes: String = r.outcomes.iter().map(|o| o.outcome.code()).collect();
        assert_eq!(codes, "WLT");
        assert_eq!(r.score(), "1-1");
        assert!(!r.is_winning());
    }

    #[test]
    fn fewer_turnovers_wins() {
        let (m, roster) = matrix(&[
            ("me", [Some(1.0), Some(1.0), Some(20.0)]),
            ("a", [Some(1.0), Some(1.0), Some(35.0)]),
        ]);
        let r = &score_head_to_head(&"me".into(), &m, &categories(), &roster)[0];
        assert_eq!(r.outcomes[2].outcome, Outcome::Win);
    }

    #[test]
    fn missing_values_are_skipped_not_scored() {
        let (m, roster) = matrix(&[
            ("me", [Some(500.0), None, Some(40.0)]),
            ("a", [Some(450.0), Some(220.0), None]),
        ]);
        let r = &score_head_to_head(&"me".into(), &m, &categories(), &roster)[0];
        assert_eq!((r.wins, r.losses, r.ties), (1, 0, 0));
        assert_eq!(r.outcomes.len(), 1);
        assert_eq!(r.outcomes[0].display_name, "PTS");
        assert!(r.decided_categories() < categories().len());
    }

    #[test]
    fn totals_never_exceed_category_count() {
        let (m, roster) = matrix(&[
            ("me", [Some(500.0), Some(200.0), Some(40.0)]),
            ("a", [Some(450.0), Some(220.0), Some(30.0)]),
            ("b", [None, Some(200.0), Some(40.0)]),
            ("c", [None, None, None]),
        ]);
        let results = score_head_to_head(&"me".into(), &m, &categories(), &roster);
        assert_eq!(results.len(), 3);
        for r in &results {
            assert!(r.decided_categories() <= 3);
            assert_eq!(r.decided_categories(), r.outcomes.len());
        }
        let full = results.iter().find(|r| r.opponent == TeamId::from("a")).unwrap();
        assert_eq!(full.decided_categories(), 3);
        let empty = results.iter().find(|r| r.opponent == TeamId::from("c")).unwrap();
        assert_eq!(empty.decided_categories(), 0);
    }

    #[test]
    fn sorted_by_wins_with_stable_ties() {
        let (m, roster) = matrix(&[
            ("me", [Some(500.0), Some(200.0), Some(40.0)]),
            ("a", [Some(600.0), Some(300.0), Some(10.0)]), // 0 wins
            ("b", [Some(400.0), Some(300.0), Some(50.0)]), // 2 wins
            ("c", [Some(400.0), Some(100.0), Some(20.0)]), // 2 wins
            ("d", [Some(400.0), Some(100.0), Some(50.0)]), // 3 wins
        ]);
        let results = score_head_to_head(&"me".into(), &m, &categories(), &roster);
        let order: Vec<&str> = results.iter().map(|r| r.opponent.as_str()).collect();
        assert_eq!(order, vec!["d", "b", "c", "a"]);
    }

    #[test]
    fn includes_teams_without_any_stats() {
        let (m, mut roster) = matrix(&[("me", [Some(1.0), Some(1.0), Some(1.0)])]);
        roster.push(TeamId::from("idle"));
        let results = score_head_to_head(&"me".into(), &m, &categories(), &roster);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].score(), "0-0");
        assert!(results[0].outcomes.is_empty());
    }

    #[test]
    fn subset_of_categories_uses_matching_polarity() {
        let (m, roster) = matrix(&[
            ("me", [Some(500.0), Some(200.0), Some(10.0)]),
            ("a", [Some(400.0), Some(250.0), Some(20.0)]),
        ]);
        let cats = categories();
        let r = &score_head_to_head(&"me".into(), &m, &cats[2..], &roster)[0];
        assert_eq!(r.outcomes.len(), 1);
        assert_eq!(r.outcomes[0].display_name, "TO");
        assert_eq!(r.outcomes[0].outcome, Outcome::Win);
        assert_eq!((r.wins, r.losses, r.ties), (1, 0, 0));
    }
}
