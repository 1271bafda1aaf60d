//! Lexis - Main Entry Point

use anyhow::{Context, Result};
use clap::Parser;
use lexis_cli::{App, Cli};
use lexis_common::init_logging;
use lexis_config::{Config, ConfigLoader};
use std::io::{self, Write};
use tracing::{error, info};

fn main() -> Result<()> {
    let args = Cli::parse();

    let mut config = load_config(&args)?;
    if let Some(locale) = &args.locale {
        config.catalog.locale.clone_from(locale);
        config.tenants.iter_mut().for_each(|t| t.locale = None);
    }
    if let Some(level) = &args.log_level {
        config.logging.level.clone_from(level);
    }
    config.validate().context("Invalid configuration")?;

    init_logging(config.logging.to_logging_config()).context("Failed to initialize logging")?;
    info!("Starting lexis {}", env!("CARGO_PKG_VERSION"));

    let app = App::from_config(config).context("Failed to load tenant catalogs")?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = app.run(&args.command, &mut out) {
        error!("Command failed: {}", e);
        return Err(e.into());
    }
    out.flush()?;

    Ok(())
}

fn load_config(args: &Cli) -> Result<Config> {
    match &args.config {
        Some(path) => ConfigLoader::load_from_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display())),
        None => {
            let mut config = Config::default();
            ConfigLoader::apply_env_overrides(&mut config);
            Ok(config)
        }
    }
}
