//! Structured logging infrastructure for lexis

use crate::error::{LexisError, Result};
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Configuration for the logging system
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "lexis_catalog=trace")
    pub level: String,
    /// Whether to emit one JSON object per event
    pub json_format: bool,
    /// Whether to enable pretty multi-line formatting with colors
    pub pretty_format: bool,
    /// Optional file path for log output, appended to (stderr otherwise)
    pub file_path: Option<String>,
    /// Whether to include target module information
    pub include_targets: bool,
    /// Whether to include thread ids and names
    pub include_threads: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
            pretty_format: false,
            file_path: None,
            include_targets: true,
            include_threads: false,
        }
    }
}

fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Initialize the tracing subscriber with the given configuration
///
/// Events go to standard error unless `file_path` is set. Fails if a global
/// subscriber is already installed or the log file cannot be opened.
pub fn init_logging(config: LoggingConfig) -> Result<()> {
    let registry = tracing_subscriber::registry().with(build_filter(&config.level));

    let writer = match &config.file_path {
        Some(path) => Some(Mutex::new(OpenOptions::new().create(true).append(true).open(path)?)),
        None => None,
    };

    let installed = if config.json_format {
        let layer = fmt::layer()
            .json()
            .with_target(config.include_targets)
            .with_thread_ids(config.include_threads)
            .with_thread_names(config.include_threads);
        match writer {
            Some(file) => registry.with(layer.with_writer(file)).try_init(),
            None => registry.with(layer.with_writer(std::io::stderr)).try_init(),
        }
    } else if config.pretty_format {
        let layer = fmt::layer()
            .pretty()
            .with_target(config.include_targets)
            .with_thread_ids(config.include_threads)
            .with_thread_names(config.include_threads);
        match writer {
            Some(file) => registry.with(layer.with_ansi(false).with_writer(file)).try_init(),
            None => registry.with(layer.with_writer(std::io::stderr)).try_init(),
        }
    } else {
        let layer = fmt::layer()
            .compact()
            .with_target(config.include_targets)
            .with_thread_ids(config.include_threads)
            .with_thread_names(config.include_threads);
        match writer {
            Some(file) => registry.with(layer.with_ansi(false).with_writer(file)).try_init(),
            None => registry.with(layer.with_writer(std::io::stderr)).try_init(),
        }
    };

    installed.map_err(|e| LexisError::Logging(e.to_string()))
}

/// Initialize logging with default configuration
pub fn init_default_logging() -> Result<()> {
    init_logging(LoggingConfig::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, "info");
        assert!(!config.json_format);
        assert!(!config.pretty_format);
        assert!(config.file_path.is_none());
        assert!(config.include_targets);
    }

    #[test]
    fn test_invalid_filter_falls_back_to_info() {
        let filter = build_filter("lexis=notalevel");
        assert_eq!(filter.to_string(), "info");
    }
}
