//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Inspect the locale catalogs of configured tenants.
#[derive(Parser, Debug)]
#[command(name = "lexis")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Override the active locale of every tenant
    #[arg(short, long, value_name = "CODE")]
    pub locale: Option<String>,

    /// Override the configured log filter
    #[arg(long, value_name = "FILTER")]
    pub log_level: Option<String>,

    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print the string at KEY
    Get {
        /// Tenant name
        tenant: String,
        /// Key path, e.g. `menu.items[0]`
        key: String,
    },

    /// Print the array at KEY, one element per line
    Array {
        /// Tenant name
        tenant: String,
        /// Key path
        key: String,
    },

    /// Print the dictionary at KEY as sorted `name = value` lines
    Dict {
        /// Tenant name
        tenant: String,
        /// Key path
        key: String,
    },

    /// Print one entry of the dictionary at KEY, failing if it is absent
    Entry {
        /// Tenant name
        tenant: String,
        /// Key path of the dictionary
        key: String,
        /// Entry name
        entry: String,
    },

    /// Print whether KEY resolves in either catalog
    Has {
        /// Tenant name
        tenant: String,
        /// Key path
        key: String,
    },

    /// Substitute ARGS into the template at KEY
    Format {
        /// Tenant name
        tenant: String,
        /// Key path
        key: String,
        /// Positional arguments; integers and decimals are passed as numbers
        args: Vec<String>,
    },

    /// List keys the baseline catalog has but the active catalog lacks
    Audit {
        /// Only audit this tenant
        tenant: Option<String>,
    },
}
