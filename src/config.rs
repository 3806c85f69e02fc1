//! Operator configuration file handling.
//!
//! Configuration files are TOML format. This file contains OPERATOR settings
//! only — the live-stream tick interval and logging. Agenda data (end dates,
//! secrecy, apartment scope) lives in storage and is never configured here.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Default log level
const DEFAULT_LOG_LEVEL: &str = "info";

/// Default live-stream tick interval, in seconds
const DEFAULT_EVENT_DELAY_SECS: u64 = 2;

/// Tally service configuration (operator settings only)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TallyConfig {
    /// Vote core tunables
    #[serde(default)]
    pub vote: VoteConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Vote core tunables
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoteConfig {
    /// Seconds between live count/roster ticks. Process-wide; every open
    /// stream polls at this cadence.
    #[serde(default = "default_event_delay_secs")]
    pub event_delay_secs: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_event_delay_secs() -> u64 {
    DEFAULT_EVENT_DELAY_SECS
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

impl Default for VoteConfig {
    fn default() -> Self {
        Self {
            event_delay_secs: DEFAULT_EVENT_DELAY_SECS,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl TallyConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file '{}': {}", path.display(), e))?;

        let config: TallyConfig = toml::from_str(&contents)
            .map_err(|e| format!("Failed to parse config file '{}': {}", path.display(), e))?;

        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save(&self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        fs::write(path, contents)
            .map_err(|e| format!("Failed to write config file '{}': {}", path.display(), e))?;

        Ok(())
    }

    /// The live-stream tick interval as a [`Duration`], ready for
    /// [`VoteCore::new`](crate::vote::VoteCore::new).
    pub fn event_delay(&self) -> Duration {
        Duration::from_secs(self.vote.event_delay_secs)
    }
}

/// Initialize tracing from the configured level, honoring `RUST_LOG` when
/// set. Call once at transport startup.
pub fn init_logging(config: &LoggingConfig) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.clone()));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_to_an_empty_file() {
        let config: TallyConfig = toml::from_str("").unwrap();
        assert_eq!(config.vote.event_delay_secs, 2);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.event_delay(), Duration::from_secs(2));
    }

    #[test]
    fn partial_file_overrides_only_what_it_names() {
        let config: TallyConfig = toml::from_str("[vote]\nevent_delay_secs = 5\n").unwrap();
        assert_eq!(config.vote.event_delay_secs, 5);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn round_trips_through_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tally.toml");

        let mut config = TallyConfig::default();
        config.vote.event_delay_secs = 7;
        config.logging.level = "debug".to_string();
        config.save(&path).unwrap();

        let loaded = TallyConfig::load(&path).unwrap();
        assert_eq!(loaded.vote.event_delay_secs, 7);
        assert_eq!(loaded.logging.level, "debug");
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(TallyConfig::load(&missing).is_err());
    }
}
