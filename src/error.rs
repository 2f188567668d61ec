//! Error types for cratemap.
//!
//! This module defines the error hierarchy using `thiserror` for proper
//! error handling throughout the application. All errors include context
//! and can be propagated with the `?` operator.
//!
//! # Error Categories
//!
//! - **Config errors**: missing or invalid startup parameters; fatal,
//!   reported before any traversal starts
//! - **Fetch errors**: network failures, unknown packages, malformed
//!   registry responses; recoverable, isolated to a single node during
//!   traversal
//! - **IO errors**: file system operations
//! - **Report errors**: report generation failures

use std::path::PathBuf;
use thiserror::Error;

/// A specialized Result type for cratemap operations.
pub type Result<T> = std::result::Result<T, CratemapError>;

/// The main error type for cratemap.
///
/// This enum covers all error conditions that can occur during
/// configuration loading, dependency fetching, and reporting.
#[derive(Error, Debug)]
pub enum CratemapError {
    // =========================================================================
    // I/O Errors
    // =========================================================================
    /// I/O error with path context.
    #[error("I/O error at '{path}': {source}")]
    Io {
        /// The path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Configuration parsing error.
    #[error("Failed to parse configuration: {message}")]
    ConfigParse {
        /// Error message
        message: String,
        /// The underlying error (if any)
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Invalid configuration value.
    #[error("Invalid configuration value for '{key}': {message}")]
    ConfigValue {
        /// The configuration key
        key: String,
        /// Error message
        message: String,
    },

    /// Missing required configuration.
    #[error("Missing required configuration: {key}")]
    ConfigMissing {
        /// The missing configuration key
        key: String,
    },

    // =========================================================================
    // Fetch Errors
    // =========================================================================
    /// HTTP request error against the registry.
    #[error("HTTP request failed for '{url}': {message}")]
    Http {
        /// The request URL
        url: String,
        /// Error message
        message: String,
        /// HTTP status code (if a response was received)
        status_code: Option<u16>,
    },

    /// Network timeout while talking to the registry.
    #[error("Network timeout for '{url}'")]
    Timeout {
        /// The request URL
        url: String,
    },

    /// The registry does not know the requested package.
    #[error("Package not found: {package}")]
    PackageNotFound {
        /// The unknown package name
        package: String,
    },

    /// The registry answered, but not in the expected shape.
    #[error("Unexpected registry response for '{package}': {message}")]
    ResponseFormat {
        /// The package the request was about
        package: String,
        /// Description of what was missing or malformed
        message: String,
    },

    // =========================================================================
    // Report Errors
    // =========================================================================
    /// Report generation error.
    #[error("Failed to generate report: {message}")]
    ReportGeneration {
        /// Error message
        message: String,
    },
}

impl CratemapError {
    /// Whether the error is recoverable during a traversal.
    ///
    /// Fetch-family errors are caught per node: the node is logged and
    /// omitted from the graph, and the build continues with its siblings.
    /// Everything else aborts the operation that raised it.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Http { .. }
                | Self::Timeout { .. }
                | Self::PackageNotFound { .. }
                | Self::ResponseFormat { .. }
        )
    }

    /// Returns the appropriate process exit code for the error.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConfigParse { .. } => 18,
            Self::ConfigValue { .. } => 19,
            Self::ConfigMissing { .. } => 20,
            _ => 1, // Generic unhandled error
        }
    }
}

impl From<std::io::Error> for CratemapError {
    fn from(source: std::io::Error) -> Self {
        // Used when a PathBuf is not readily available; prefer constructing
        // Io with the offending path where one is known.
        Self::Io {
            path: PathBuf::new(),
            source,
        }
    }
}

impl From<serde_json::Error> for CratemapError {
    fn from(source: serde_json::Error) -> Self {
        Self::ReportGeneration {
            message: format!("JSON serialization error: {source}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_errors_are_recoverable() {
        let err = CratemapError::PackageNotFound {
            package: "nope".to_string(),
        };
        assert!(err.is_recoverable());

        let err = CratemapError::Timeout {
            url: "https://crates.io/api/v1/crates/serde".to_string(),
        };
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_config_errors_are_fatal() {
        let err = CratemapError::ConfigMissing {
            key: "package".to_string(),
        };
        assert!(!err.is_recoverable());
        assert_eq!(err.exit_code(), 20);

        let err = CratemapError::ConfigValue {
            key: "max_depth".to_string(),
            message: "must be -1 or non-negative".to_string(),
        };
        assert_eq!(err.exit_code(), 19);
    }
}
