//! Default values for every configuration section.

use crate::schema::{CatalogConfig, Config, LoggingSettings};

/// Locale used as the fallback tier when nothing else is configured.
pub const DEFAULT_BASELINE_LOCALE: &str = "EN";

/// Name of the per-tenant directory holding catalog files.
pub const DEFAULT_LANG_DIR: &str = "Lang";

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog: CatalogConfig::default(),
            tenants: Vec::new(),
            logging: LoggingSettings::default(),
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            locale: DEFAULT_BASELINE_LOCALE.to_string(),
            baseline_locale: DEFAULT_BASELINE_LOCALE.to_string(),
            lang_dir: DEFAULT_LANG_DIR.to_string(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
            file_path: None,
        }
    }
}
