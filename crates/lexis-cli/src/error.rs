//! Command line error types using thiserror.

use lexis_catalog::CatalogError;
use lexis_common::LexisError;
use lexis_config::ConfigError;

/// Errors reported by the `lexis` command.
#[derive(thiserror::Error, Debug)]
pub enum CliError {
    /// Configuration could not be loaded or is invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A catalog operation failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Logging could not be initialized.
    #[error(transparent)]
    Lexis(#[from] LexisError),

    /// The tenant is not listed in the configuration.
    #[error("Tenant '{0}' is not configured")]
    UnknownTenant(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for the command line front end.
pub type CliResult<T> = Result<T, CliError>;
