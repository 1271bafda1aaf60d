//! Loads configured tenants and runs one command against them.

use crate::cli::Command;
use crate::error::{CliError, CliResult};
use lexis_catalog::{CatalogStore, DirectorySource, FormatArg, Resolver, TenantHandle};
use lexis_config::Config;
use std::io::Write;
use std::sync::Arc;
use tracing::{debug, info};

/// A loaded catalog store plus the configuration it came from.
#[derive(Debug)]
pub struct App {
    config: Config,
    resolver: Resolver,
}

impl App {
    /// Load every tenant listed in `config`.
    ///
    /// Missing catalog directories are created, as a host would on first run.
    pub fn from_config(config: Config) -> CliResult<Self> {
        let store = Arc::new(CatalogStore::with_baseline(
            config.catalog.baseline_locale.as_str(),
        ));

        for tenant in &config.tenants {
            let source = DirectorySource::new(tenant.catalog_dir(&config.catalog));
            source.create_if_missing()?;
            store.load(
                tenant.name.as_str(),
                tenant.active_locale(&config.catalog),
                source,
            );
        }

        info!(
            tenants = config.tenants.len(),
            "Loaded catalogs (baseline {})",
            config.catalog.baseline_locale
        );

        Ok(Self {
            config,
            resolver: Resolver::new(store),
        })
    }

    /// The configuration the app was built from
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// The resolver over all loaded tenants
    #[must_use]
    pub const fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    /// Run `command`, writing its output to `out`.
    pub fn run<W: Write>(&self, command: &Command, out: &mut W) -> CliResult<()> {
        debug!(?command, "Running command");
        match command {
            Command::Get { tenant, key } => {
                let tenant = self.tenant(tenant)?;
                writeln!(out, "{}", tenant.get_string(key))?;
            }
            Command::Array { tenant, key } => {
                for item in self.tenant(tenant)?.get_string_array(key) {
                    writeln!(out, "{item}")?;
                }
            }
            Command::Dict { tenant, key } => {
                let mut entries: Vec<_> = self.tenant(tenant)?.get_string_dictionary(key).into_iter().collect();
                entries.sort();
                for (name, value) in entries {
                    writeln!(out, "{name} = {value}")?;
                }
            }
            Command::Entry { tenant, key, entry } => {
                let value = self.tenant(tenant)?.get_dictionary_entry(key, entry)?;
                writeln!(out, "{value}")?;
            }
            Command::Has { tenant, key } => {
                writeln!(out, "{}", self.tenant(tenant)?.has_key(key))?;
            }
            Command::Format { tenant, key, args } => {
                let args: Vec<FormatArg> = args.iter().map(String::as_str).map(parse_format_arg).collect();
                writeln!(out, "{}", self.tenant(tenant)?.get_string_formatted(key, &args))?;
            }
            Command::Audit { tenant } => self.audit(tenant.as_deref(), out)?,
        }
        Ok(())
    }

    fn audit<W: Write>(&self, only: Option<&str>, out: &mut W) -> CliResult<()> {
        let names: Vec<&str> = match only {
            Some(name) => vec![self.tenant(name)?.id()],
            None => self.config.tenants.iter().map(|t| t.name.as_str()).collect(),
        };

        for name in names {
            let missing = self.resolver.untranslated_keys(name);
            let locale = self
                .resolver
                .store()
                .active_locale(name)
                .map(|l| l.to_string())
                .unwrap_or_default();
            writeln!(out, "{name} ({locale}): {} untranslated", missing.len())?;
            for key in missing {
                writeln!(out, "  {key}")?;
            }
        }
        Ok(())
    }

    fn tenant<'a>(&'a self, name: &'a str) -> CliResult<TenantHandle<'a>> {
        if self.resolver.store().contains(name) {
            Ok(self.resolver.tenant(name))
        } else {
            Err(CliError::UnknownTenant(name.to_string()))
        }
    }
}

/// Interpret a command line argument as an integer, a decimal or text.
#[must_use]
pub fn parse_format_arg(raw: &str) -> FormatArg {
    if let Ok(n) = raw.parse::<i64>() {
        return FormatArg::Int(n);
    }
    let numeric = raw.bytes().any(|b| b.is_ascii_digit())
        && raw.bytes().all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'-' | b'+' | b'e' | b'E'));
    match raw.parse::<f64>() {
        Ok(x) if numeric => FormatArg::Float(x),
        _ => FormatArg::from(raw),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_format_arg() {
        assert_eq!(parse_format_arg("42"), FormatArg::Int(42));
        assert_eq!(parse_format_arg("-7"), FormatArg::Int(-7));
        assert_eq!(parse_format_arg("1.5"), FormatArg::Float(1.5));
        assert_eq!(parse_format_arg("Ana"), FormatArg::Str("Ana".to_string()));
        assert_eq!(parse_format_arg("inf"), FormatArg::Str("inf".to_string()));
        assert_eq!(parse_format_arg("NaN"), FormatArg::Str("NaN".to_string()));
        assert_eq!(parse_format_arg(""), FormatArg::Str(String::new()));
    }

    #[test]
    fn test_unknown_tenant_is_an_error() {
        let app = App::from_config(Config::default()).unwrap();
        let mut out = Vec::new();
        let command = Command::Get {
            tenant: "ghost".to_string(),
            key: "k".to_string(),
        };
        assert!(matches!(
            app.run(&command, &mut out),
            Err(CliError::UnknownTenant(ref t)) if t == "ghost"
        ));
        assert!(out.is_empty());
    }
}
