// Configuration loading and parsing (league.toml, display.toml).

use crossterm::style::Color;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

use catcompare_core::{CategoryPolicy, Sport};

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// Top-level assembled Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    pub league: LeagueConfig,
    pub snapshot_path: PathBuf,
    pub policy: PolicyConfig,
    pub display: DisplayConfig,
}

impl Config {
    /// Category policy for a sport with this config's extra ids layered on.
    pub fn category_policy(&self, sport: Sport) -> CategoryPolicy {
        let mut policy = CategoryPolicy::for_sport(sport);
        policy.extend(
            self.policy.percentage_ids.iter().cloned(),
            self.policy.lower_is_better_ids.iter().cloned(),
            self.policy.ratio_allow_list.iter().cloned(),
        );
        policy
    }
}

// ---------------------------------------------------------------------------
// league.toml structs
// ---------------------------------------------------------------------------

/// Raw deserialization target for the entire league.toml file.
#[derive(Debug, Clone, Deserialize)]
struct LeagueFile {
    league: RawLeagueSection,
    #[serde(default)]
    policy: PolicyConfig,
}

#[derive(Debug, Clone, Deserialize)]
struct RawLeagueSection {
    #[serde(default)]
    sport: Option<String>,
    #[serde(default)]
    selected_team: Option<String>,
    #[serde(default)]
    week: Option<u32>,
    snapshot: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeagueConfig {
    /// When omitted, the sport recorded in the snapshot is used.
    pub sport: Option<Sport>,
    /// The user's team. Can be overridden with `--team`.
    pub selected_team: Option<String>,
    /// Expected week; the run refuses a snapshot for a different week.
    pub week: Option<u32>,
}

/// Extra category ids layered on top of the sport's built-in tables.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct PolicyConfig {
    #[serde(default)]
    pub percentage_ids: Vec<String>,
    #[serde(default)]
    pub lower_is_better_ids: Vec<String>,
    #[serde(default)]
    pub ratio_allow_list: Vec<String>,
}

// ---------------------------------------------------------------------------
// display.toml structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
struct DisplayFile {
    display: RawDisplaySection,
}

#[derive(Debug, Clone, Deserialize)]
struct RawDisplaySection {
    color: bool,
    category_width: usize,
    name_width: usize,
    percent_decimals: usize,
    value_decimals: usize,
    colors: RawColors,
}

#[derive(Debug, Clone, Deserialize)]
struct RawColors {
    top: String,
    middle: String,
    bottom: String,
    win: String,
    loss: String,
    tie: String,
}

/// Presentation settings handed to the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayConfig {
    pub color: bool,
    pub category_width: usize,
    /// Team names are truncated to this many characters in the best/worst
    /// columns.
    pub name_width: usize,
    pub percent_decimals: usize,
    pub value_decimals: usize,
    pub colors: Palette,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub top: Color,
    pub middle: Color,
    pub bottom: Color,
    pub win: Color,
    pub loss: Color,
    pub tie: Color,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            color: true,
            category_width: 40,
            name_width: 15,
            percent_decimals: 1,
            value_decimals: 2,
            colors: Palette {
                top: Color::Green,
                middle: Color::Yellow,
                bottom: Color::Red,
                win: Color::Green,
                loss: Color::Red,
                tie: Color::Yellow,
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate configuration from `config/league.toml` and
/// `config/display.toml` under `base_dir`. `display.toml` is optional and
/// falls back to the built-in presentation defaults.
///
/// This does not copy defaults; prefer `load_config()`.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let config_dir = base_dir.join("config");

    // --- league.toml (required) ---
    let league_path = config_dir.join(LEAGUE_FILE);
    let league_text = read_file(&league_path)?;
    let league_file: LeagueFile =
        toml::from_str(&league_text).map_err(|e| ConfigError::ParseError {
            path: league_path.clone(),
            source: e,
        })?;

    let sport = league_file
        .league
        .sport
        .as_deref()
        .map(|s| {
            s.parse::<Sport>().map_err(|e| ConfigError::ValidationError {
                field: "league.sport".into(),
                message: e.to_string(),
            })
        })
        .transpose()?;

    let league = LeagueConfig {
        sport,
        selected_team: league_file.league.selected_team,
        week: league_file.league.week,
    };

    // Relative snapshot paths are resolved against the base directory.
    let snapshot_path = base_dir.join(&league_file.league.snapshot);

    // --- display.toml (optional) ---
    let display_path = config_dir.join(DISPLAY_FILE);
    let display = if display_path.exists() {
        let display_text = read_file(&display_path)?;
        let display_file: DisplayFile =
            toml::from_str(&display_text).map_err(|e| ConfigError::ParseError {
                path: display_path.clone(),
                source: e,
            })?;
        parse_display(display_file.display)?
    } else {
        DisplayConfig::default()
    };

    let config = Config {
        league,
        snapshot_path,
        policy: league_file.policy,
        display,
    };

    validate(&config)?;

    Ok(config)
}

/// The league file has no built-in fallback; the display file does.
const LEAGUE_FILE: &str = "league.toml";
const DISPLAY_FILE: &str = "display.toml";

/// Copy `league.toml` and `display.toml` from `defaults/` into `config/`
/// when they are missing. Existing files are left alone. Returns the files
/// that were copied.
pub fn ensure_config_files(base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let defaults_dir = base_dir.join("defaults");
    let config_dir = base_dir.join("config");
    let mut copied = Vec::new();

    for name in [LEAGUE_FILE, DISPLAY_FILE] {
        let target = config_dir.join(name);
        if target.exists() {
            continue;
        }
        let source = defaults_dir.join(name);
        if !source.exists() {
            if name == LEAGUE_FILE {
                return Err(ConfigError::DefaultsCopyError {
                    message: format!(
                        "{} is missing and {} does not exist; \
                         run from the project root or pass --config-dir",
                        target.display(),
                        source.display()
                    ),
                });
            }
            continue;
        }

        std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::DefaultsCopyError {
            message: format!("failed to create {}: {e}", config_dir.display()),
        })?;
        std::fs::copy(&source, &target).map_err(|e| ConfigError::DefaultsCopyError {
            message: format!("failed to copy {} to {}: {e}", source.display(), target.display()),
        })?;
        info!(file = name, "initialized config from defaults");
        copied.push(target);
    }

    Ok(copied)
}

/// Load config relative to `base_dir` (the current directory when `None`),
/// copying default config files first.
pub fn load_config(base_dir: Option<&Path>) -> Result<Config, ConfigError> {
    let base = match base_dir {
        Some(dir) => dir.to_path_buf(),
        None => std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
            path: PathBuf::from("."),
        })?,
    };
    ensure_config_files(&base)?;
    load_config_from(&base)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

fn parse_display(raw: RawDisplaySection) -> Result<DisplayConfig, ConfigError> {
    let c = &raw.colors;
    Ok(DisplayConfig {
        color: raw.color,
        category_width: raw.category_width,
        name_width: raw.name_width,
        percent_decimals: raw.percent_decimals,
        value_decimals: raw.value_decimals,
        colors: Palette {
            top: parse_color("display.colors.top", &c.top)?,
            middle: parse_color("display.colors.middle", &c.middle)?,
            bottom: parse_color("display.colors.bottom", &c.bottom)?,
            win: parse_color("display.colors.win", &c.win)?,
            loss: parse_color("display.colors.loss", &c.loss)?,
            tie: parse_color("display.colors.tie", &c.tie)?,
        },
    })
}

fn parse_color(field: &str, name: &str) -> Result<Color, ConfigError> {
    Color::try_from(name).map_err(|_| ConfigError::ValidationError {
        field: field.into(),
        message: format!("unknown color `{name}`"),
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Upper bound on displayed decimals.
const MAX_DECIMALS: usize = 6;

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.league.week == Some(0) {
        return Err(ConfigError::ValidationError {
            field: "league.week".into(),
            message: "weeks start at 1".into(),
        });
    }

    if let Some(team) = &config.league.selected_team {
        if team.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                field: "league.selected_team".into(),
                message: "must not be empty".into(),
            });
        }
    }

    let d = &config.display;
    let width_fields: &[(&str, usize)] = &[
        ("display.category_width", d.category_width),
        ("display.name_width", d.name_width),
    ];
    for (name, val) in width_fields {
        if *val == 0 {
            return Err(ConfigError::ValidationError {
                field: name.to_string(),
                message: "must be > 0".into(),
            });
        }
    }

    let decimal_fields: &[(&str, usize)] = &[
        ("display.percent_decimals", d.percent_decimals),
        ("display.value_decimals", d.value_decimals),
    ];
    for (name, val) in decimal_fields {
        if *val > MAX_DECIMALS {
            return Err(ConfigError::ValidationError {
                field: name.to_string(),
                message: format!("must be at most {MAX_DECIMALS}, got {val}"),
            });
        }
    }

    // Policy ids must be usable as lookup keys.
    for (name, ids) in [
        ("policy.percentage_ids", &config.policy.percentage_ids),
        ("policy.lower_is_better_ids", &config.policy.lower_is_better_ids),
        ("policy.ratio_allow_list", &config.policy.ratio_allow_list),
    ] {
        if ids.iter().any(|id| id.trim().is_empty()) {
            return Err(ConfigError::ValidationError {
                field: name.into(),
                message: "entries must not be empty".into(),
            });
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
