//! Configuration loading from TOML with environment overrides.
//!
//! Reads `scoutbot.toml` (or the file named by `SCOUTBOT_CONFIG`) into
//! strongly-typed sections. Every section has defaults, so a partial or
//! absent file is valid. `SCOUTBOT_ENV=production` forces production mode.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::engine::player_sorter::PlayerSorterConfig;
use crate::strategy::{OddsConfig, ScoreRules};
use crate::types::ScoutError;

/// Default config file path.
pub const DEFAULT_CONFIG_FILE: &str = "scoutbot.toml";
pub const CONFIG_PATH_ENV: &str = "SCOUTBOT_CONFIG";
pub const MODE_ENV: &str = "SCOUTBOT_ENV";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppMode {
    #[default]
    Dev,
    Production,
}

impl fmt::Display for AppMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppMode::Dev => write!(f, "dev"),
            AppMode::Production => write!(f, "production"),
        }
    }
}

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub app: AppSection,
    pub strategy: OddsConfig,
    pub players: PlayerSorterConfig,
    pub rules: ScoreRules,
    /// Fixture id → outcome code, used for unpriced fixtures in interactive mode.
    pub manual_outcomes: HashMap<String, String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppSection {
    pub mode: AppMode,
    /// Allow manual outcomes for fixtures without odds.
    pub interactive: bool,
    pub snapshot_path: String,
    pub report_path: String,
}

impl Default for AppSection {
    fn default() -> Self {
        Self {
            mode: AppMode::Dev,
            interactive: false,
            snapshot_path: "scoutbot_snapshot.json".to_string(),
            report_path: "scoutbot_report.json".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {path}"))?;
        let config = Self::from_toml_str(&contents)
            .with_context(|| format!("Failed to parse config file: {path}"))?;
        Ok(config)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(contents)?;
        Ok(config)
    }

    /// Load the file if present, otherwise fall back to defaults. Applies
    /// the environment mode override and validates the result.
    pub fn load_or_default(path: &str) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::load(path)?
        } else {
            info!(path, "No config file found, using defaults");
            Self::default()
        };
        config.app.mode = resolve_mode(config.app.mode, std::env::var(MODE_ENV).ok().as_deref());
        config.validate()?;
        Ok(config)
    }

    /// Config file path: `SCOUTBOT_CONFIG` if set, else the default.
    pub fn path_from_env() -> String {
        std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string())
    }

    /// Reject thresholds the pipeline cannot work with.
    pub fn validate(&self) -> Result<(), ScoutError> {
        let s = &self.strategy;
        if !(s.too_small >= 0.0 && s.trust_level > s.too_small) {
            return Err(ScoutError::Config(format!(
                "strategy.trust_level ({}) must exceed strategy.too_small ({}) and both be non-negative",
                s.trust_level, s.too_small
            )));
        }
        if self.players.desired_players == 0 || self.players.max_players_per_team == 0 {
            return Err(ScoutError::Config(
                "players.desired_players and players.max_players_per_team must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// Production wins if either the file or the environment asks for it.
pub fn resolve_mode(file_mode: AppMode, env_value: Option<&str>) -> AppMode {
    match env_value {
        Some(v) if v.trim().eq_ignore_ascii_case("production") => AppMode::Production,
        _ => file_mode,
    }
}
