// Configuration loading and parsing (league.toml).

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

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
}

// ---------------------------------------------------------------------------
// league.toml structs
// ---------------------------------------------------------------------------

/// Raw deserialization target for the entire league.toml file.
#[derive(Debug, Clone, Deserialize)]
struct LeagueFile {
    league: LeagueConfig,
    #[serde(default)]
    data_paths: DataPaths,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LeagueConfig {
    pub name: String,
    /// Participating team names, in league order.
    pub teams: Vec<String>,
}

/// Where the data documents live, relative to the config's base directory.
#[derive(Debug, Clone, Deserialize)]
pub struct DataPaths {
    #[serde(default = "default_matches_path")]
    pub matches: String,
    #[serde(default = "default_submissions_path")]
    pub submissions: String,
    #[serde(default = "default_legacy_path")]
    pub legacy: String,
    #[serde(default = "default_adjustments_path")]
    pub adjustments: String,
}

fn default_matches_path() -> String {
    "data/matches.csv".to_string()
}
fn default_submissions_path() -> String {
    "data/submissions.json".to_string()
}
fn default_legacy_path() -> String {
    "data/legacy.json".to_string()
}
fn default_adjustments_path() -> String {
    "data/adjustments.json".to_string()
}

impl Default for DataPaths {
    fn default() -> Self {
        DataPaths {
            matches: default_matches_path(),
            submissions: default_submissions_path(),
            legacy: default_legacy_path(),
            adjustments: default_adjustments_path(),
        }
    }
}

/// The assembled configuration, with data paths resolved against the
/// config's base directory.
#[derive(Debug, Clone)]
pub struct Config {
    pub league: LeagueConfig,
    pub matches_path: PathBuf,
    pub submissions_path: PathBuf,
    pub legacy_path: PathBuf,
    pub adjustments_path: PathBuf,
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

/// Load and validate configuration from `config/league.toml` relative to the
/// given base directory.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let league_path = base_dir.join("config").join("league.toml");
    let league_text = read_file(&league_path)?;
    let league_file: LeagueFile =
        toml::from_str(&league_text).map_err(|e| ConfigError::ParseError {
            path: league_path.clone(),
            source: e,
        })?;

    validate_league(&league_file.league)?;

    let paths = league_file.data_paths;
    Ok(Config {
        league: league_file.league,
        matches_path: base_dir.join(&paths.matches),
        submissions_path: base_dir.join(&paths.submissions),
        legacy_path: base_dir.join(&paths.legacy),
        adjustments_path: base_dir.join(&paths.adjustments),
    })
}

/// Load configuration from the current working directory.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(Path::new("."))
}

fn validate_league(league: &LeagueConfig) -> Result<(), ConfigError> {
    if league.teams.len() < 2 {
        return Err(ConfigError::ValidationError {
            field: "league.teams".into(),
            message: format!("need at least 2 teams, got {}", league.teams.len()),
        });
    }
    let distinct: HashSet<&str> = league.teams.iter().map(String::as_str).collect();
    if distinct.len() != league.teams.len() {
        return Err(ConfigError::ValidationError {
            field: "league.teams".into(),
            message: "duplicate team names".into(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
