// Failures that stop a comparison report from being produced.
//
// Bad data for a single team or category never ends up here: it is absorbed
// as a missing value and the rest of the report carries on.

use thiserror::Error;

use crate::stats::TeamId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompareError {
    /// No team has a usable stat sample, so the categories cannot be known.
    #[error("cannot determine categories: {reason}")]
    UnresolvableSchema { reason: String },

    #[error("team {team_id} is not in the league roster")]
    UnknownTeam { team_id: TeamId },

    /// The selected team reported nothing for the week, typically because it
    /// has no matchup yet.
    #[error("no stats for {team_name} in week {week}; the team may not have a matchup this week")]
    NoStatsForTeam { team_name: String, week: u32 },
}
