// Comparison matrix: every team's normalized value for every category,
// computed up front so the ranking and head-to-head passes only read.

use std::collections::HashMap;

use crate::categories::Category;
use crate::normalize::{normalize, NormalizedValue, StatValue};
use crate::stats::{RawStat, TeamId};

/// (team, category) -> normalized value for one league-week.
///
/// Rows are aligned with `categories`: `rows[team][i]` is the value for
/// `categories[i]`.
#[derive(Debug, Clone, Default)]
pub struct ComparisonMatrix {
    categories: Vec<Category>,
    rows: HashMap<TeamId, Vec<NormalizedValue>>,
}

impl ComparisonMatrix {
    /// Normalize every team's raw stats against the resolved categories.
    ///
    /// Stats are looked up by category id; a team that does not report a
    /// category gets `None` for it.
    pub fn build<'a, I>(categories: &[Category], team_stats: I) -> Self
    where
        I: IntoIterator<Item = (&'a TeamId, &'a Vec<RawStat>)>,
    {
        let rows = team_stats
            .into_iter()
            .map(|(team_id, stats)| {
                let row = categories
                    .iter()
                    .map(|category| {
                        let raw = stats
                            .iter()
                            .find(|s| s.category_id == category.id)
                            .and_then(|s| s.raw_value.as_ref());
                        normalize(raw, category)
                    })
                    .collect();
                (team_id.clone(), row)
            })
            .collect();

        ComparisonMatrix {
            categories: categories.to_vec(),
            rows,
        }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn contains_team(&self, team_id: &TeamId) -> bool {
        self.rows.contains_key(team_id)
    }

    /// Value for a team in the category at `category_index`. Teams without a
    /// row are treated as missing everywhere.
    pub fn value(&self, team_id: &TeamId, category_index: usize) -> Option<&StatValue> {
        self.rows
            .get(team_id)
            .and_then(|row| row.get(category_index))
            .and_then(|v| v.as_ref())
    }

    /// Value for a team by category id.
    pub fn get(&self, team_id: &TeamId, category_id: &str) -> Option<&StatValue> {
        let index = self.categories.iter().position(|c| c.id == category_id)?;
        self.value(team_id, index)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
