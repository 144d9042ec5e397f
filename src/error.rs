//! Error types for sqlpipe.
//!
//! Defines the main error enum used throughout the application.

use thiserror::Error;

/// Main error type for sqlpipe operations.
///
/// A final statement that produces no result set is not an error and has no
/// variant here; it is reported as an absent result by the runner.
#[derive(Error, Debug)]
pub enum PipeError {
    /// Database connection errors (host unreachable, auth failed, etc.)
    #[error("Connection error: {0}")]
    Connection(String),

    /// Statement execution errors (syntax errors, constraint violations, etc.)
    #[error("Execution error: {0}")]
    Execution(String),

    /// Configuration errors (invalid config file, missing required fields, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Output errors (rendering or writing the final result failed).
    #[error("Export error: {0}")]
    Export(String),
}

impl PipeError {
    /// Creates a connection error with the given message.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Creates an execution error with the given message.
    pub fn execution(msg: impl Into<String>) -> Self {
        Self::Execution(msg.into())
    }

    /// Creates a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates an export error with the given message.
    pub fn export(msg: impl Into<String>) -> Self {
        Self::Export(msg.into())
    }

    /// Returns the error category as a string for display purposes.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Connection(_) => "Connection Error",
            Self::Execution(_) => "Execution Error",
            Self::Config(_) => "Configuration Error",
            Self::Export(_) => "Export Error",
        }
    }
}

/// Result type alias using PipeError.
pub type Result<T> = std::result::Result<T, PipeError>;
