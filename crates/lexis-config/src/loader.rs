//! Configuration loading utilities

use crate::schema::Config;
use lexis_common::LexisError;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Environment variable overriding `catalog.locale`.
pub const ENV_LOCALE: &str = "LEXIS_LOCALE";
/// Environment variable overriding `catalog.baseline_locale`.
pub const ENV_BASELINE_LOCALE: &str = "LEXIS_BASELINE_LOCALE";
/// Environment variable overriding `logging.level`.
pub const ENV_LOG_LEVEL: &str = "LEXIS_LOG_LEVEL";

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading configuration file
    #[error("Failed to read configuration file {path}: {source}")]
    Io {
        /// File that could not be read
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// TOML parsing error
    #[error("Failed to parse TOML configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Invalid configuration value for '{field}': {message}")]
    Invalid {
        /// Dotted path of the offending field
        field: String,
        /// What is wrong with it
        message: String,
    },
}

impl ConfigError {
    pub(crate) fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl From<ConfigError> for LexisError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Invalid { field, message } => LexisError::validation(message, field),
            other => LexisError::config_with_source("failed to load configuration", other),
        }
    }
}

/// Configuration loader for lexis hosts
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a TOML file, apply environment overrides and
    /// validate the result.
    ///
    /// Relative tenant directories are resolved against the directory
    /// containing the file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let path = path.as_ref();
        debug!("Reading configuration file {}", path.display());

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::parse(&content)?;

        if let Some(base) = path.parent() {
            for tenant in &mut config.tenants {
                if tenant.directory.is_relative() {
                    tenant.directory = base.join(&tenant.directory);
                }
            }
        }

        Self::apply_env_overrides(&mut config);
        config.validate()?;

        info!(
            "Loaded configuration from {} ({} tenants)",
            path.display(),
            config.tenants.len()
        );
        Ok(config)
    }

    /// Parse configuration from TOML text without overrides or validation.
    pub fn parse(content: &str) -> Result<Config, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Apply `LEXIS_*` environment variable overrides.
    pub fn apply_env_overrides(config: &mut Config) {
        Self::apply_overrides_from(config, |name| std::env::var(name).ok());
    }

    /// Apply overrides obtained from `lookup`, keyed by environment variable
    /// name. Empty values are ignored.
    pub fn apply_overrides_from<F>(config: &mut Config, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        if let Some(locale) = get(ENV_LOCALE) {
            debug!("Overriding catalog.locale from {}", ENV_LOCALE);
            config.catalog.locale = locale;
        }
        if let Some(locale) = get(ENV_BASELINE_LOCALE) {
            debug!("Overriding catalog.baseline_locale from {}", ENV_BASELINE_LOCALE);
            config.catalog.baseline_locale = locale;
        }
        if let Some(level) = get(ENV_LOG_LEVEL) {
            debug!("Overriding logging.level from {}", ENV_LOG_LEVEL);
            config.logging.level = level;
        }
    }
}
