//! Configuration loading: TOML file with environment variable overrides.
//!
//! Looks for `keeper.toml` in the working directory unless `--config` points
//! elsewhere. Every field has a sensible default so the file is optional.
//! Environment variables take precedence over file values, and the
//! `--database-url` flag takes precedence over both.

use std::path::Path;

use serde::Deserialize;
use tracing_subscriber::EnvFilter;

/// Filter used before the configuration is known, and when none is set.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Database settings.
    pub database: DatabaseConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// `SQLite` database configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// `SQLite` connection URL or file path.
    pub url: String,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from `path` (if present), apply environment
    /// overrides, then the `--database-url` flag.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or is
    /// malformed, or if the resulting configuration is invalid.
    pub fn load(path: &Path, database_url: Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::from_file(path)?;
        config.apply_overrides(|key| std::env::var(key).ok());
        if let Some(url) = database_url {
            config.database.url = url;
        }
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("KEEPER_DATABASE_URL") {
            self.database.url = val;
        }
        if let Some(val) = var("KEEPER_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.database.url.trim().is_empty() {
            return Err(ConfigError::Validation(
                "database url must not be empty".to_string(),
            ));
        }
        self.logging.env_filter()?;
        Ok(())
    }
}

impl LoggingConfig {
    /// Build the subscriber filter from the configured directive.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Filter`] if the directive does not parse.
    pub fn env_filter(&self) -> Result<EnvFilter, ConfigError> {
        Ok(EnvFilter::try_new(&self.filter)?)
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite:keeper.db?mode=rwc".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Malformed logging filter directive.
    #[error("invalid logging filter")]
    Filter(#[from] tracing_subscriber::filter::ParseError),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
