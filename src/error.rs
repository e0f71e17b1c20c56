//! Error types for report-paginator
//!
//! This module defines the error hierarchy for the entire crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use crate::feed::QueryError;
use thiserror::Error;

/// The main error type for report-paginator
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Pagination Errors
    // ============================================================================
    #[error("Invalid page budget {value}: must be -1 (all pages) or a positive number of pages")]
    InvalidPageBudget { value: i64 },

    #[error("Pagination failed on {context}: {source}")]
    Pagination {
        context: String,
        #[source]
        source: QueryError,
    },

    #[error("Invalid total_results in response: '{value}'")]
    InvalidTotalResults { value: String },

    #[error("Invalid query parameter '{key}': {message}")]
    InvalidQueryParam { key: String, message: String },

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Authentication Errors
    // ============================================================================
    #[error("Authentication failed: {message}")]
    Auth { message: String },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Output error: {message}")]
    Output { message: String },

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid config value error
    pub fn invalid_config(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an auth error
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth {
            message: message.into(),
        }
    }

    /// Create an invalid query parameter error
    pub fn invalid_param(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidQueryParam {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Wrap an executor failure with a description of the failing request
    pub fn pagination(context: impl Into<String>, source: QueryError) -> Self {
        Self::Pagination {
            context: context.into(),
            source,
        }
    }

    /// Create an output error
    pub fn output(message: impl Into<String>) -> Self {
        Self::Output {
            message: message.into(),
        }
    }

    /// True when the server rejected the credential.
    ///
    /// Callers should invalidate their stored token when this returns true.
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            Error::Pagination {
                source: QueryError::Unauthorized { .. },
                ..
            }
        )
    }
}

/// Result type alias for report-paginator
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}
