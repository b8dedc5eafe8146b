// Command-line arguments. Flags override the values in config/league.toml.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Compare your fantasy team's weekly category stats against the league
#[derive(Debug, Clone, Parser)]
#[command(name = "catcompare")]
#[command(about = "Weekly category comparison for head-to-head fantasy leagues")]
#[command(version)]
pub struct Cli {
    /// Directory holding config/ and defaults/ (defaults to the current directory)
    #[arg(long, value_name = "DIR")]
    pub config_dir: Option<PathBuf>,

    /// Week snapshot to read instead of the configured one
    #[arg(long, value_name = "PATH")]
    pub snapshot: Option<PathBuf>,

    /// Team id to compare
    #[arg(short, long, value_name = "ID")]
    pub team: Option<String>,

    /// Expected week; the run fails if the snapshot is for another week
    #[arg(short, long)]
    pub week: Option<u32>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// List the league's teams and exit
    #[arg(long)]
    pub list_teams: bool,

    /// Disable coloured output
    #[arg(long)]
    pub no_color: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
