// One comparison run: config -> snapshot -> engine -> rendered output.

use anyhow::{anyhow, bail, Context};
use std::io::Write;
use tracing::{info, warn};

use catcompare_core::{run_comparison, CompareError, RosterEntry, Sport, TeamId};

use crate::cli::{Cli, OutputFormat};
use crate::config::{self, Config};
use crate::render;
use crate::snapshot::{self, WeekSnapshot};

/// Execute the command described by `cli`, writing the report to `out`.
///
/// Configuration, snapshot and team-selection problems are errors. A
/// comparison that cannot be produced for this week (no categories, no stats
/// for the team) is reported on `out` and is not an error.
pub fn run<W: Write>(cli: &Cli, out: &mut W) -> anyhow::Result<()> {
    let mut config =
        config::load_config(cli.config_dir.as_deref()).context("failed to load configuration")?;
    if cli.no_color {
        config.display.color = false;
    }

    let snapshot_path = cli
        .snapshot
        .clone()
        .unwrap_or_else(|| config.snapshot_path.clone());
    let snapshot = snapshot::load_snapshot(&snapshot_path).context("failed to load week snapshot")?;

    if let Some(expected) = cli.week.or(config.league.week) {
        if expected != snapshot.week {
            bail!(
                "snapshot {} is for week {}, but week {} was requested",
                snapshot_path.display(),
                snapshot.week,
                expected
            );
        }
    }

    if cli.list_teams {
        render::write_team_list(out, &snapshot.roster())?;
        return Ok(());
    }

    let Some(team) = cli.team.clone().or_else(|| config.league.selected_team.clone()) else {
        bail!(
            "no team selected; pass --team or set league.selected_team\n\n{}",
            team_list(&snapshot.roster())
        );
    };
    let selected = TeamId::new(team.trim());

    let sport = resolve_sport(&config, &snapshot);
    let policy = config.category_policy(sport);
    let input = snapshot.into_week_input(sport, policy);
    info!(
        league = %input.league_name,
        week = input.week,
        sport = %sport,
        team = %selected,
        "running comparison"
    );

    let report = match run_comparison(&input, &selected) {
        Ok(report) => report,
        Err(e @ CompareError::UnknownTeam { .. }) => {
            return Err(anyhow!("{e}\n\n{}", team_list(&input.roster)));
        }
        Err(e) => {
            warn!("no report produced: {e}");
            writeln!(out, "{e}")?;
            return Ok(());
        }
    };

    match cli.format {
        OutputFormat::Text => render::write_report(out, &report, &config.display)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &report)
                .context("failed to serialize report")?;
            writeln!(out)?;
        }
    }
    Ok(())
}

/// Configured sport first, then the one the snapshot records, then NBA.
fn resolve_sport(config: &Config, snapshot: &WeekSnapshot) -> Sport {
    let recorded = snapshot.sport();
    match (config.league.sport, recorded) {
        (Some(configured), Some(recorded)) if configured != recorded => {
            warn!(
                %configured,
                %recorded,
                "configured sport differs from the snapshot; using the configured one"
            );
            configured
        }
        (Some(configured), _) => configured,
        (None, Some(recorded)) => recorded,
        (None, None) => Sport::default(),
    }
}

fn team_list(roster: &[RosterEntry]) -> String {
    let mut buf = Vec::new();
    // Writing into a Vec cannot fail.
    let _ = render::write_team_list(&mut buf, roster);
    String::from_utf8_lossy(&buf).into_owned()
}
