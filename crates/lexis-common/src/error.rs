//! Error types and utilities for lexis

use thiserror::Error;

/// Result type alias for lexis operations
pub type Result<T> = std::result::Result<T, LexisError>;

/// Workspace-wide error type
///
/// Crate-specific errors (catalog, configuration) convert into this type at
/// the boundary where they meet the binary.
#[derive(Error, Debug)]
pub enum LexisError {
    /// Configuration related errors
    #[error("Configuration error: {message}")]
    Config {
        /// Human readable description
        message: String,
        /// Underlying cause, if any
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Catalog loading or lookup errors
    #[error("Catalog error: {message}")]
    Catalog {
        /// Human readable description
        message: String,
        /// Tenant the error relates to, if known
        tenant: Option<String>,
    },

    /// Logging subscriber could not be installed
    #[error("Logging error: {0}")]
    Logging(String),

    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Validation errors for user input or data
    #[error("Validation error: {message}")]
    Validation {
        /// Human readable description
        message: String,
        /// Offending field, if known
        field: Option<String>,
    },
}

impl LexisError {
    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new configuration error with a source
    pub fn config_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new catalog error scoped to a tenant
    pub fn catalog(msg: impl Into<String>, tenant: impl Into<String>) -> Self {
        Self::Catalog {
            message: msg.into(),
            tenant: Some(tenant.into()),
        }
    }

    /// Create a new validation error for a field
    pub fn validation(msg: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
            field: Some(field.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_display_messages() {
        let err = LexisError::config("missing [catalog] table");
        assert_eq!(err.to_string(), "Configuration error: missing [catalog] table");

        let err = LexisError::catalog("no such tenant", "example.plugin");
        assert_eq!(err.to_string(), "Catalog error: no such tenant");
        match err {
            LexisError::Catalog { tenant, .. } => assert_eq!(tenant.as_deref(), Some("example.plugin")),
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn test_source_is_preserved() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "lexis.toml");
        let err = LexisError::config_with_source("cannot read config", io);
        assert!(err.source().is_some());
    }

    #[test]
    fn test_from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: LexisError = io.into();
        assert!(matches!(err, LexisError::Io(_)));
    }
}
