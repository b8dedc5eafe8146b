// Integration tests for catcompare.
//
// These run the whole pipeline through the library crate's public API: config
// initialisation from defaults/, snapshot loading, the comparison engine and
// both output formats.

use std::fs;
use std::path::{Path, PathBuf};

use catcompare_cli::app;
use catcompare_cli::cli::Cli;
use catcompare_cli::snapshot::load_snapshot;
use catcompare_core::{run_comparison, CategoryPolicy, PerformanceTier, Sport, Standing, TeamId};

use clap::Parser;

// ===========================================================================
// Test helpers
// ===========================================================================

/// Fixture directory path (relative to the crate root, which is the cwd for
/// `cargo test`).
const FIXTURES: &str = "tests/fixtures";

fn fixture(name: &str) -> PathBuf {
    std::env::current_dir().unwrap().join(FIXTURES).join(name)
}

/// Scratch project directory with a copy of the shipped `defaults/`, so the
/// first run initialises `config/` exactly as a fresh install would.
fn scratch(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(name);
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(dir.join("defaults")).unwrap();
    for file in ["league.toml", "display.toml"] {
        fs::copy(
            PathBuf::from("defaults").join(file),
            dir.join("defaults").join(file),
        )
        .unwrap();
    }
    dir
}

/// Run the app with the fixture snapshot plus `extra` flags; returns the
/// captured output.
fn run_with(dir: &Path, extra: &[&str]) -> anyhow::Result<String> {
    let snapshot = fixture("week_snapshot.json");
    let mut args = vec![
        "catcompare".to_string(),
        "--config-dir".to_string(),
        dir.display().to_string(),
        "--snapshot".to_string(),
        snapshot.display().to_string(),
        "--no-color".to_string(),
    ];
    args.extend(extra.iter().map(|s| s.to_string()));
    let cli = Cli::parse_from(args);

    let mut out = Vec::new();
    app::run(&cli, &mut out)?;
    Ok(String::from_utf8(out).unwrap())
}

fn line_starting<'a>(text: &'a str, prefix: &str) -> &'a str {
    text.lines()
        .find(|l| l.starts_with(prefix))
        .unwrap_or_else(|| panic!("no line starting with {prefix:?} in:\n{text}"))
}

// ===========================================================================
// Engine on the fixture week
// ===========================================================================

#[test]
fn fixture_week_rankings() {
    let snap = load_snapshot(&fixture("week_snapshot.json")).unwrap();
    let input = snap.into_week_input(Sport::Nba, CategoryPolicy::for_sport(Sport::Nba));
    let report = run_comparison(&input, &"1".into()).unwrap();

    let names: Vec<&str> = report
        .categories
        .iter()
        .map(|c| c.display_name.as_str())
        .collect();
    assert_eq!(
        names,
        vec!["FG%", "FT%", "3PTM", "PTS", "REB", "AST", "ST", "BLK", "TO"]
    );

    let ranked = |i: usize| match &report.rankings[i].standing {
        Standing::Ranked { result, .. } => result.clone(),
        Standing::NotAvailable => panic!("category {i} not ranked"),
    };

    // FG% arrives as .482, 47.1 and 4950 and is compared on one scale.
    let fg = ranked(0);
    assert_eq!(fg.beaten_ratio(), "2/3");
    assert_eq!(fg.best.team_id, TeamId::from("3"));
    assert_eq!(fg.worst.team_id, TeamId::from("4"));
    assert_eq!(fg.tier, Some(PerformanceTier::Middle));

    // Bench Mob has no FT% and Idle Hands never played.
    assert_eq!(ranked(1).beaten_ratio(), "1/2");

    // Steals: Bench Mob sent an empty object.
    let st = ranked(6);
    assert_eq!(st.beaten_ratio(), "2/2");
    assert_eq!(st.tier, Some(PerformanceTier::Top));

    // Tie on assists is not a win.
    let ast = ranked(5);
    assert_eq!(ast.beaten_ratio(), "1/3");
    assert_eq!(ast.rank, 2);

    // Turnovers: fewer is better.
    let to = ranked(8);
    assert_eq!(to.beaten_ratio(), "1/3");
    assert_eq!(to.best.team_id, TeamId::from("2"));
    assert_eq!(to.worst.team_id, TeamId::from("3"));
}

#[test]
fn fixture_week_head_to_head() {
    let snap = load_snapshot(&fixture("week_snapshot.json")).unwrap();
    let input = snap.into_week_input(Sport::Nba, CategoryPolicy::for_sport(Sport::Nba));
    let report = run_comparison(&input, &"1".into()).unwrap();

    let order: Vec<&str> = report
        .head_to_head
        .iter()
        .map(|r| r.opponent.as_str())
        .collect();
    assert_eq!(order, vec!["2", "4", "3", "5"]);

    let records: Vec<(usize, usize, usize)> = report
        .head_to_head
        .iter()
        .map(|r| (r.wins, r.losses, r.ties))
        .collect();
    assert_eq!(records, vec![(6, 3, 0), (5, 0, 2), (4, 5, 0), (0, 0, 0)]);

    assert_eq!(report.scheduled_opponent, Some(TeamId::from("2")));
    assert_eq!(report.all_play_record(), (15, 8, 2));
}

// ===========================================================================
// Full runs
// ===========================================================================

#[test]
fn text_report_for_selected_team() {
    let dir = scratch("catcompare_it_text");
    let text = run_with(&dir, &["--team", "1"]).unwrap();

    assert!(text.contains("Comparing Downtown Dunkers (Week 7)"));
    assert!(text.contains("  Downtown Dunkers vs Glass Cleaners"));
    assert!(text.contains("  Splash Bros Fan Club vs Bench Mob"));

    let fg = line_starting(&text, "FG%");
    assert!(fg.contains("48.2%"));
    assert!(fg.contains("49.5% (Splash Bros Fan)"));
    assert!(fg.contains("45.5% (Bench Mob)"));

    let to = line_starting(&text, "TO ");
    assert!(to.contains("70.00"));
    assert!(to.contains("1/3"));
    assert!(to.contains("62.00 (Glass Cleaners)"));

    let glass = line_starting(&text, "Glass Cleaners *");
    assert!(glass.contains("6-3"));
    assert!(glass.contains("FG%:W"));
    assert!(glass.contains("REB:L"));

    let idle = line_starting(&text, "Idle Hands");
    assert!(idle.contains("0-0"));

    // config/ was initialised from defaults/ on the way.
    assert!(dir.join("config/league.toml").exists());
    assert!(dir.join("config/display.toml").exists());

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn json_report_round_trips_through_serde_json() {
    let dir = scratch("catcompare_it_json");
    let text = run_with(&dir, &["--team", "1", "--format", "json"]).unwrap();

    let json: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(json["week"], 7);
    assert_eq!(json["sport"], "nba");
    assert_eq!(json["selected"]["name"], "Downtown Dunkers");
    assert_eq!(json["rankings"].as_array().unwrap().len(), 9);
    assert_eq!(json["head_to_head"][0]["opponent"], "2");
    assert_eq!(json["head_to_head"][0]["wins"], 6);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn selected_team_from_config() {
    let dir = scratch("catcompare_it_config_team");
    fs::create_dir_all(dir.join("config")).unwrap();
    let league = fs::read_to_string("defaults/league.toml")
        .unwrap()
        .replace("# selected_team = \"1\"", "selected_team = \"3\"");
    fs::write(dir.join("config/league.toml"), league).unwrap();

    let text = run_with(&dir, &[]).unwrap();
    assert!(text.contains("Comparing Splash Bros Fan Club (Week 7)"));
    // The flag wins over the config.
    let text = run_with(&dir, &["--team", "2"]).unwrap();
    assert!(text.contains("Comparing Glass Cleaners (Week 7)"));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn list_teams() {
    let dir = scratch("catcompare_it_list");
    let text = run_with(&dir, &["--list-teams"]).unwrap();
    assert!(text.starts_with("Found 5 team(s):"));
    assert!(text.contains("Downtown Dunkers (Manager: Priya)"));
    assert!(text.contains("Bench Mob (Manager: N/A)"));

    let _ = fs::remove_dir_all(&dir);
}

// ===========================================================================
// Failure modes
// ===========================================================================

#[test]
fn missing_team_selection_lists_roster() {
    let dir = scratch("catcompare_it_no_team");
    let err = run_with(&dir, &[]).unwrap_err();
    let msg = format!("{err:#}");
    assert!(msg.contains("no team selected"));
    assert!(msg.contains("Idle Hands"));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn unknown_team_is_an_error() {
    let dir = scratch("catcompare_it_unknown_team");
    let err = run_with(&dir, &["--team", "42"]).unwrap_err();
    let msg = format!("{err:#}");
    assert!(msg.contains("team 42 is not in the league roster"));
    assert!(msg.contains("Glass Cleaners"));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn team_without_matchup_is_reported_not_fatal() {
    let dir = scratch("catcompare_it_idle");
    let text = run_with(&dir, &["--team", "5"]).unwrap();
    assert!(text.contains("no stats for Idle Hands in week 7"));
    assert!(!text.contains("Head-to-Head"));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn week_mismatch_is_an_error() {
    let dir = scratch("catcompare_it_week");
    let err = run_with(&dir, &["--team", "1", "--week", "8"]).unwrap_err();
    assert!(format!("{err:#}").contains("is for week 7, but week 8 was requested"));

    assert!(run_with(&dir, &["--team", "1", "--week", "7"]).is_ok());

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn missing_snapshot_is_an_error() {
    let dir = scratch("catcompare_it_no_snapshot");
    let cli = Cli::parse_from([
        "catcompare".to_string(),
        "--config-dir".to_string(),
        dir.display().to_string(),
        "--team".to_string(),
        "1".to_string(),
    ]);
    let mut out = Vec::new();
    let err = app::run(&cli, &mut out).unwrap_err();
    let msg = format!("{err:#}");
    assert!(msg.contains("failed to load week snapshot"));
    assert!(msg.contains("data/week.json"));

    let _ = fs::remove_dir_all(&dir);
}
