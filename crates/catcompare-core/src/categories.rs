// Category resolution: derive the league's scoring categories from one team's
// stat list.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::debug;

use crate::normalize::StatValue;
use crate::policy::CategoryPolicy;
use crate::stats::RawStat;

// ---------------------------------------------------------------------------
// Polarity
// ---------------------------------------------------------------------------

/// Whether a larger or a smaller value wins a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Polarity {
    HigherIsBetter,
    LowerIsBetter,
}

impl Polarity {
    /// Compare `a` against `b` from `a`'s point of view: `Greater` means `a`
    /// is the better value. `None` when the two are incomparable.
    pub fn compare(&self, a: &StatValue, b: &StatValue) -> Option<Ordering> {
        let raw = a.partial_cmp_value(b)?;
        Some(match self {
            Polarity::HigherIsBetter => raw,
            Polarity::LowerIsBetter => raw.reverse(),
        })
    }

    /// `a` strictly beats `b`.
    pub fn beats(&self, a: &StatValue, b: &StatValue) -> bool {
        self.compare(a, b) == Some(Ordering::Greater)
    }
}

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

/// One resolved scoring dimension. Identical for every team in a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub display_name: String,
    pub polarity: Polarity,
    pub is_percentage: bool,
}

impl Category {
    /// Build a category from a stat, applying the policy tables.
    pub fn from_stat(stat: &RawStat, policy: &CategoryPolicy) -> Self {
        let polarity = if policy.is_lower_better(&stat.category_id, &stat.display_name) {
            Polarity::LowerIsBetter
        } else {
            Polarity::HigherIsBetter
        };
        Category {
            id: stat.category_id.clone(),
            display_name: stat.display_name.clone(),
            polarity,
            is_percentage: policy.is_percentage(&stat.category_id, &stat.display_name),
        }
    }
}

/// Resolve the ordered category list from a sample team's stats.
///
/// Unlabelled stats and composite ratio stats (`FGM/FGA`) are dropped; the
/// remaining stats keep their source order.
pub fn resolve_categories(sample_stats: &[RawStat], policy: &CategoryPolicy) -> Vec<Category> {
    sample_stats
        .iter()
        .filter(|stat| {
            if stat.display_name.is_empty() {
                return false;
            }
            if policy.is_composite_ratio(&stat.display_name) {
                debug!(category = %stat.display_name, "skipping composite ratio stat");
                return false;
            }
            true
        })
        .map(|stat| Category::from_stat(stat, policy))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
