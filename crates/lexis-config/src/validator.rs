//! Runtime validation of loaded configuration.

use crate::loader::ConfigError;
use crate::schema::Config;
use lexis_common::is_safe_file_stem;
use std::collections::HashSet;

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates a configuration, reporting the first problem found.
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        Self::check_locale("catalog.locale", &config.catalog.locale)?;
        Self::check_locale("catalog.baseline_locale", &config.catalog.baseline_locale)?;

        let mut seen = HashSet::new();
        for (i, tenant) in config.tenants.iter().enumerate() {
            if tenant.name.trim().is_empty() {
                return Err(ConfigError::invalid(
                    format!("tenants[{i}].name"),
                    "tenant name cannot be empty",
                ));
            }
            if !seen.insert(tenant.name.as_str()) {
                return Err(ConfigError::invalid(
                    format!("tenants[{i}].name"),
                    format!("duplicate tenant '{}'", tenant.name),
                ));
            }
            if let Some(locale) = &tenant.locale {
                Self::check_locale(&format!("tenants[{i}].locale"), locale)?;
            }
        }

        Ok(())
    }

    fn check_locale(field: &str, code: &str) -> Result<(), ConfigError> {
        if is_safe_file_stem(code) {
            Ok(())
        } else {
            Err(ConfigError::invalid(
                field,
                format!("'{code}' is not usable as a catalog file name"),
            ))
        }
    }
}

impl Config {
    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigValidator::validate(self)
    }
}
