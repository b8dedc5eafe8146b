// Library root for the stat-normalization and comparison engine.
//
// Everything in this crate is synchronous, side-effect free computation over
// already-fetched week data. Fetching, configuration files and terminal
// output live in `catcompare-cli`.

pub mod categories;
pub mod compare;
pub mod error;
pub mod head_to_head;
pub mod matrix;
pub mod normalize;
pub mod policy;
pub mod report;
pub mod stats;

pub use categories::{resolve_categories, Category, Polarity};
pub use compare::{compare, CategoryRanking, PerformanceTier, RankEntry, RankResult, Standing};
pub use error::CompareError;
pub use head_to_head::{score_head_to_head, CategoryOutcome, HeadToHeadResult, Outcome};
pub use matrix::ComparisonMatrix;
pub use normalize::{normalize, normalize_percentage, NormalizedValue, StatValue};
pub use policy::{CategoryPolicy, Sport};
pub use report::{run_comparison, WeekInput, WeekReport};
pub use stats::{RawStat, RawValue, RosterEntry, TeamId};
