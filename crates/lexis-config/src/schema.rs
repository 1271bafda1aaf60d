//! Configuration schema definitions using serde.

use lexis_common::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure for a lexis host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Locale selection shared by all tenants.
    pub catalog: CatalogConfig,
    /// Tenants whose catalogs are loaded at startup.
    pub tenants: Vec<TenantConfig>,
    /// Logging configuration.
    pub logging: LoggingSettings,
}

/// Locale selection and catalog layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Active locale preference, e.g. `"FR"`.
    pub locale: String,
    /// Locale consulted when the active catalog misses a key.
    pub baseline_locale: String,
    /// Sub-directory of each tenant directory holding `<LOCALE>.json` files.
    pub lang_dir: String,
}

/// One catalog consumer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantConfig {
    /// Tenant identity, e.g. a plugin GUID.
    pub name: String,
    /// Root directory of the tenant.
    pub directory: PathBuf,
    /// Overrides [`CatalogConfig::lang_dir`] for this tenant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang_dir: Option<String>,
    /// Overrides [`CatalogConfig::locale`] for this tenant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
}

impl TenantConfig {
    /// Directory holding this tenant's `<LOCALE>.json` files.
    #[must_use]
    pub fn catalog_dir(&self, catalog: &CatalogConfig) -> PathBuf {
        let lang_dir = self.lang_dir.as_deref().unwrap_or(&catalog.lang_dir);
        if lang_dir.is_empty() {
            self.directory.clone()
        } else {
            Path::new(&self.directory).join(lang_dir)
        }
    }

    /// Active locale for this tenant.
    #[must_use]
    pub fn active_locale<'a>(&'a self, catalog: &'a CatalogConfig) -> &'a str {
        self.locale.as_deref().unwrap_or(&catalog.locale)
    }
}

/// Logging section of the configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Filter directive, e.g. `"info"` or `"lexis_catalog=debug"`.
    pub level: String,
    /// Emit JSON lines instead of human readable output.
    pub json_format: bool,
    /// Append log output to this file instead of standard error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
}

impl LoggingSettings {
    /// Converts the file settings into a subscriber configuration.
    #[must_use]
    pub fn to_logging_config(&self) -> LoggingConfig {
        LoggingConfig {
            level: self.level.clone(),
            json_format: self.json_format,
            file_path: self.file_path.clone(),
            ..LoggingConfig::default()
        }
    }
}
