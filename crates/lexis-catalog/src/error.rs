//! Error types for catalog operations

use lexis_common::LexisError;
use thiserror::Error;

/// Errors surfaced by catalog loading and the fallible lookups
///
/// Most lookups never fail: misses resolve to a placeholder or an empty
/// container. Only [`get_dictionary_entry`](crate::Resolver::get_dictionary_entry)
/// and operations naming an unknown tenant return these to the caller.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The entry is absent from the resolved dictionary
    #[error("Key '{entry}' not found in dictionary '{dictionary}'")]
    KeyNotFound {
        /// Key path of the dictionary
        dictionary: String,
        /// Entry that was requested
        entry: String,
    },

    /// No catalogs were ever loaded for this tenant
    #[error("Tenant '{0}' has no loaded catalogs")]
    UnknownTenant(String),

    /// Catalog bytes are not valid JSON
    #[error("Invalid JSON in catalog: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// Catalog parsed, but its top-level value is not an object
    #[error("Catalog must contain a JSON object at the top level, found {found}")]
    NotAnObject {
        /// Kind of the top-level value
        found: &'static str,
    },
}

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors from positional template substitution
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// An opening brace without its closing brace, or a stray closing brace
    #[error("Unbalanced '{brace}' at byte {position}")]
    UnbalancedBrace {
        /// The offending brace
        brace: char,
        /// Byte offset in the template
        position: usize,
    },

    /// The placeholder refers to an argument that was not supplied
    #[error("Argument index {index} is out of range ({count} arguments supplied)")]
    IndexOutOfRange {
        /// Requested index
        index: usize,
        /// Number of supplied arguments
        count: usize,
    },

    /// The placeholder body is not `index[,alignment][:specifier]`
    #[error("Invalid placeholder '{{{0}}}'")]
    InvalidPlaceholder(String),

    /// The specifier does not apply to the argument type
    #[error("Unsupported format specifier '{specifier}' for {kind} argument")]
    UnsupportedSpecifier {
        /// Specifier text after ':'
        specifier: String,
        /// Argument kind
        kind: &'static str,
    },
}

impl From<CatalogError> for LexisError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::UnknownTenant(tenant) => {
                LexisError::catalog("tenant has no loaded catalogs", tenant)
            }
            other => LexisError::Catalog {
                message: other.to_string(),
                tenant: None,
            },
        }
    }
}
