// Plain-terminal rendering of a week report.
//
// Everything is queued through crossterm commands onto any `io::Write`, so the
// binary writes to stdout and tests write to a `Vec<u8>`. Cells are padded
// before colouring so ANSI sequences never skew column alignment.

use crossterm::queue;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use std::io::{self, Write};

use catcompare_core::{
    CategoryRanking, HeadToHeadResult, Outcome, PerformanceTier, RankEntry, RosterEntry, Standing,
    StatValue, WeekReport,
};

use crate::config::DisplayConfig;

/// Width of the banner rules.
const RULE_WIDTH: usize = 115;
const HEADER_WIDTH: usize = 80;

const VALUE_WIDTH: usize = 15;
const RATIO_WIDTH: usize = 20;
const EXTREME_WIDTH: usize = 20;
const OPPONENT_WIDTH: usize = 30;
const SCORE_WIDTH: usize = 12;
const COUNT_WIDTH: usize = 8;

/// Category names longer than this are abbreviated in the outcome list.
const ABBREVIATE_OVER: usize = 8;

// ---------------------------------------------------------------------------
// Formatting helpers
// ---------------------------------------------------------------------------

/// Percentages as `xx.x%`, other numbers with fixed decimals, text as-is.
pub fn format_value(value: &StatValue, is_percentage: bool, display: &DisplayConfig) -> String {
    match value {
        StatValue::Number(v) if is_percentage => {
            format!("{:.*}%", display.percent_decimals, v * 100.0)
        }
        StatValue::Number(v) => format!("{:.*}", display.value_decimals, v),
        StatValue::Text(s) => s.clone(),
    }
}

/// First `width` characters of a name.
pub fn truncate_name(name: &str, width: usize) -> String {
    name.chars().take(width).collect()
}

/// Compact label for the per-category outcome list:
/// "Field Goal Percentage" -> "Field Goal%", "Three Pointers Made" -> "Three PointersM".
pub fn abbreviate_category(name: &str) -> String {
    if name.chars().count() <= ABBREVIATE_OVER {
        return name.to_string();
    }
    if name.contains("Percentage") {
        name.replace(" Percentage", "%")
    } else if name.contains("Made") {
        name.replace(" Made", "M")
    } else {
        name.to_string()
    }
}

fn tier_color(tier: Option<PerformanceTier>, display: &DisplayConfig) -> Option<Color> {
    match tier? {
        PerformanceTier::Top => Some(display.colors.top),
        PerformanceTier::Middle => Some(display.colors.middle),
        PerformanceTier::Bottom => Some(display.colors.bottom),
    }
}

fn outcome_color(outcome: Outcome, display: &DisplayConfig) -> Color {
    match outcome {
        Outcome::Win => display.colors.win,
        Outcome::Loss => display.colors.loss,
        Outcome::Tie => display.colors.tie,
    }
}

/// Winning record in the win colour, anything else in the tie colour.
fn score_color(result: &HeadToHeadResult, display: &DisplayConfig) -> Color {
    if result.is_winning() {
        display.colors.win
    } else {
        display.colors.tie
    }
}

/// Write `text` left-aligned in `width` columns, optionally coloured.
fn cell<W: Write>(
    out: &mut W,
    text: &str,
    width: usize,
    color: Option<Color>,
    display: &DisplayConfig,
) -> io::Result<()> {
    let padded = format!("{text:<width$}");
    match color.filter(|_| display.color) {
        Some(c) => queue!(out, SetForegroundColor(c), Print(padded), ResetColor),
        None => queue!(out, Print(padded)),
    }
}

fn colored<W: Write>(
    out: &mut W,
    text: &str,
    color: Color,
    display: &DisplayConfig,
) -> io::Result<()> {
    cell(out, text, 0, Some(color), display)
}

fn rule<W: Write>(out: &mut W, ch: char, width: usize) -> io::Result<()> {
    writeln!(out, "{}", ch.to_string().repeat(width))
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// Render the full text report: header, matchups, category table, then the
/// head-to-head table.
pub fn write_report<W: Write>(
    out: &mut W,
    report: &WeekReport,
    display: &DisplayConfig,
) -> io::Result<()> {
    write_header(out, report)?;
    write_matchups(out, report)?;
    write_category_table(out, report, display)?;
    write_head_to_head(out, report, display)?;
    out.flush()
}

fn write_header<W: Write>(out: &mut W, report: &WeekReport) -> io::Result<()> {
    rule(out, '=', HEADER_WIDTH)?;
    writeln!(out, "Comparing {} (Week {})", report.selected.name, report.week)?;
    writeln!(out, "{} ({})", report.league_name, report.sport)?;
    rule(out, '=', HEADER_WIDTH)?;
    writeln!(out)
}

fn write_matchups<W: Write>(out: &mut W, report: &WeekReport) -> io::Result<()> {
    if report.matchups.is_empty() {
        return writeln!(out, "No matchups found for week {}\n", report.week);
    }
    writeln!(
        out,
        "Found {} matchup(s) for week {}",
        report.matchups.len(),
        report.week
    )?;
    for (a, b) in &report.matchups {
        writeln!(out, "  {} vs {}", report.team_name(a), report.team_name(b))?;
    }
    writeln!(out)
}

fn write_category_table<W: Write>(
    out: &mut W,
    report: &WeekReport,
    display: &DisplayConfig,
) -> io::Result<()> {
    let cw = display.category_width;
    writeln!(
        out,
        "{:<cw$} {:<VALUE_WIDTH$} {:<RATIO_WIDTH$} {:<EXTREME_WIDTH$} {:<EXTREME_WIDTH$}",
        "Category", "Your Team", "vs Teams", "Best", "Worst"
    )?;
    rule(out, '-', RULE_WIDTH)?;

    for ranking in &report.rankings {
        write_category_row(out, report, ranking, display)?;
    }

    writeln!(out)?;
    rule(out, '=', RULE_WIDTH)?;
    writeln!(
        out,
        "Note: 'vs Teams' shows how many teams you're better than out of teams with a value"
    )?;
    writeln!(
        out,
        "      Percentages are shown with {} decimal place(s), other stats with {}",
        display.percent_decimals, display.value_decimals
    )?;
    write!(out, "      ")?;
    colored(out, "Green", display.colors.top, display)?;
    write!(out, " = beating 70%+ teams, ")?;
    colored(out, "Yellow", display.colors.middle, display)?;
    write!(out, " = 30-70%, ")?;
    colored(out, "Red", display.colors.bottom, display)?;
    writeln!(out, " = <30%")?;
    rule(out, '=', RULE_WIDTH)
}

fn write_category_row<W: Write>(
    out: &mut W,
    report: &WeekReport,
    ranking: &CategoryRanking,
    display: &DisplayConfig,
) -> io::Result<()> {
    let cw = display.category_width;
    let category = &ranking.category;

    let (value, result) = match &ranking.standing {
        Standing::NotAvailable => {
            return writeln!(
                out,
                "{:<cw$} {:<VALUE_WIDTH$} {:<RATIO_WIDTH$} {:<EXTREME_WIDTH$} {:<EXTREME_WIDTH$}",
                category.display_name, "N/A", "-", "-", "-"
            );
        }
        Standing::Ranked { value, result } => (value, result),
    };

    let extreme = |entry: &RankEntry| {
        format!(
            "{} ({})",
            format_value(&entry.value, category.is_percentage, display),
            truncate_name(report.team_name(&entry.team_id), display.name_width)
        )
    };

    write!(
        out,
        "{:<cw$} {:<VALUE_WIDTH$} ",
        category.display_name,
        format_value(value, category.is_percentage, display)
    )?;
    cell(
        out,
        &result.beaten_ratio(),
        RATIO_WIDTH,
        tier_color(result.tier, display),
        display,
    )?;
    writeln!(
        out,
        " {:<EXTREME_WIDTH$} {:<EXTREME_WIDTH$}",
        extreme(&result.best),
        extreme(&result.worst)
    )
}

fn write_head_to_head<W: Write>(
    out: &mut W,
    report: &WeekReport,
    display: &DisplayConfig,
) -> io::Result<()> {
    writeln!(out)?;
    rule(out, '=', RULE_WIDTH)?;
    writeln!(out, "Head-to-Head Matchups: {}", report.selected.name)?;
    rule(out, '=', RULE_WIDTH)?;
    writeln!(out)?;

    writeln!(
        out,
        "{:<OPPONENT_WIDTH$} {:<SCORE_WIDTH$} {:<COUNT_WIDTH$} {:<COUNT_WIDTH$} {:<COUNT_WIDTH$} Categories (W=Win, L=Loss, T=Tie)",
        "Opponent", "Score", "Wins", "Losses", "Ties"
    )?;
    rule(out, '-', RULE_WIDTH)?;

    for result in &report.head_to_head {
        let mut name = report.team_name(&result.opponent).to_string();
        if report.scheduled_opponent.as_ref() == Some(&result.opponent) {
            name.push_str(" *");
        }

        write!(out, "{name:<OPPONENT_WIDTH$} ")?;
        cell(
            out,
            &result.score(),
            SCORE_WIDTH,
            Some(score_color(result, display)),
            display,
        )?;
        write!(
            out,
            " {:<COUNT_WIDTH$} {:<COUNT_WIDTH$} {:<COUNT_WIDTH$} ",
            result.wins, result.losses, result.ties
        )?;
        for (i, outcome) in result.outcomes.iter().enumerate() {
            if i > 0 {
                write!(out, "  ")?;
            }
            let label = format!(
                "{}:{}",
                abbreviate_category(&outcome.display_name),
                outcome.outcome
            );
            colored(out, &label, outcome_color(outcome.outcome, display), display)?;
        }
        writeln!(out)?;
    }

    let (w, l, t) = report.all_play_record();
    writeln!(out)?;
    writeln!(out, "All-play record: {w}-{l}-{t}")?;
    rule(out, '=', RULE_WIDTH)?;
    writeln!(
        out,
        "Note: Score shows wins-losses for your team. * marks this week's scheduled opponent."
    )?;
    write!(out, "      Categories show W=Win (")?;
    colored(out, "green", display.colors.win, display)?;
    write!(out, "), L=Loss (")?;
    colored(out, "red", display.colors.loss, display)?;
    write!(out, "), T=Tie (")?;
    colored(out, "yellow", display.colors.tie, display)?;
    writeln!(out, ")")?;
    rule(out, '=', RULE_WIDTH)
}

// ---------------------------------------------------------------------------
// Team list
// ---------------------------------------------------------------------------

/// Roster listing for `--list-teams` and for runs with no team selected.
pub fn write_team_list<W: Write>(out: &mut W, roster: &[RosterEntry]) -> io::Result<()> {
    writeln!(out, "Found {} team(s):", roster.len())?;
    for entry in roster {
        writeln!(
            out,
            "  {:>4}  {} (Manager: {})",
            entry.team_id,
            entry.name,
            entry.manager.as_deref().unwrap_or("N/A")
        )?;
    }
    out.flush()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
