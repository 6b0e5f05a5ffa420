//! Application configuration loading and validation.
//!
//! Configuration is loaded from an optional TOML file, then overridden by
//! environment variables (`DATABASE_URL`, `DB_USER`, `DB_PASS`, `DB_HOST`,
//! `DB_PORT`, `DB_NAME`). Every setting has a default, so an empty
//! environment yields a usable configuration.

use serde::Deserialize;
use std::path::Path;

use crate::error::{ConfigError, Result};

mod dashboard;
mod database;
mod logging;

pub use dashboard::DashboardConfig;
pub use database::DatabaseConfig;
pub use logging::LoggingConfig;

/// Main application configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

impl Config {
    /// Load configuration from a TOML file, then apply environment overrides.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        let mut config = Self::parse(&content)?;
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Build configuration from defaults and environment variables only.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path` when given, otherwise `fallback` if it exists, otherwise
    /// fall back to the environment.
    pub fn resolve(path: Option<&Path>, fallback: &Path) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None if fallback.is_file() => Self::load(fallback),
            None => Self::from_env(),
        }
    }

    /// Parse TOML content without consulting the environment.
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        Ok(config)
    }

    /// Apply overrides from a variable lookup (normally the process
    /// environment).
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        self.database.apply_overrides(lookup)
    }

    pub fn validate(&self) -> Result<()> {
        self.database.validate()?;
        self.dashboard.validate()?;
        Ok(())
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) -> Result<()> {
        self.logging.init()
    }
}
