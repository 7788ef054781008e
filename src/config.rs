//! Scorer configuration loaded from TOML.

use cricket_ledger::TeamNames;
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Default configuration file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "cricket_score.toml";

/// Settings for a scoring session.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct ScorerConfig {
    /// Overs per innings when none are given on the command line.
    #[serde(default = "default_overs")]
    default_overs: u32,

    /// Name of the side batting first.
    #[serde(default = "default_batting_first")]
    batting_first: String,

    /// Name of the chasing side.
    #[serde(default = "default_chasing")]
    chasing: String,

    /// How long the coin spins before a toss lands, in milliseconds.
    #[serde(default = "default_toss_delay_ms")]
    toss_delay_ms: u64,

    /// Where to save the match after every command.
    #[serde(default)]
    snapshot_path: Option<PathBuf>,
}

#[instrument]
fn default_overs() -> u32 {
    5
}

#[instrument]
fn default_batting_first() -> String {
    "Team A".to_string()
}

#[instrument]
fn default_chasing() -> String {
    "Team B".to_string()
}

#[instrument]
fn default_toss_delay_ms() -> u64 {
    3000
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self {
            default_overs: default_overs(),
            batting_first: default_batting_first(),
            chasing: default_chasing(),
            toss_delay_ms: default_toss_delay_ms(),
            snapshot_path: None,
        }
    }
}

impl ScorerConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml(&content)?;
        info!(overs = config.default_overs, "Config loaded successfully");
        Ok(config)
    }

    /// Parses configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        if config.default_overs == 0 {
            return Err(ConfigError::new("default_overs must be at least 1"));
        }
        Ok(config)
    }

    /// Loads `path` if given, else the default file if present, else defaults.
    ///
    /// An explicitly named file must exist.
    #[instrument]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(DEFAULT_CONFIG_FILE)
            }
            None => {
                debug!("No config file, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Team names for the scorer.
    pub fn teams(&self) -> TeamNames {
        TeamNames::new(self.batting_first.clone(), self.chasing.clone())
    }

    /// Toss delay as a duration.
    pub fn toss_delay(&self) -> Duration {
        Duration::from_millis(self.toss_delay_ms)
    }

    /// Overrides the overs per innings.
    pub fn with_overs(mut self, overs: u32) -> Self {
        self.default_overs = overs;
        self
    }

    /// Overrides the toss delay.
    pub fn with_toss_delay_ms(mut self, toss_delay_ms: u64) -> Self {
        self.toss_delay_ms = toss_delay_ms;
        self
    }

    /// Overrides the snapshot file.
    pub fn with_snapshot_path(mut self, path: PathBuf) -> Self {
        self.snapshot_path = Some(path);
        self
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = ScorerConfig::from_toml("").unwrap();
        assert_eq!(config, ScorerConfig::default());
        assert_eq!(config.toss_delay(), Duration::from_secs(3));
    }

    #[test]
    fn test_partial_toml_overrides() {
        let config = ScorerConfig::from_toml(
            r#"
            default_overs = 20
            batting_first = "Lions"
            snapshot_path = "match.json"
            "#,
        )
        .unwrap();

        assert_eq!(*config.default_overs(), 20);
        assert_eq!(config.teams(), TeamNames::new("Lions", "Team B"));
        assert_eq!(config.snapshot_path(), &Some(PathBuf::from("match.json")));
    }

    #[test]
    fn test_zero_overs_rejected() {
        let err = ScorerConfig::from_toml("default_overs = 0").unwrap_err();
        assert!(err.message.contains("at least 1"));
    }

    #[test]
    fn test_bad_toml_rejected() {
        assert!(ScorerConfig::from_toml("default_overs = \"many\"").is_err());
    }
}
