//! Error types for the window lab.
//!
//! Defines the main error enum used throughout the sandbox.

use thiserror::Error;

/// Main error type for sandbox operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LabError {
    /// The sample dataset violated its own invariants (row counts, column
    /// cardinality, unique ids). The session cannot start.
    #[error("Provisioning error: {0}")]
    Provisioning(String),

    /// The submitted SQL failed to parse, execute, or was rejected as a write.
    /// Carries the engine diagnostic verbatim.
    #[error("Query error: {0}")]
    Query(String),

    /// Configuration errors (invalid config file, unknown values, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal errors (engine could not be opened, unexpected states, etc.)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl LabError {
    /// Creates a provisioning error with the given message.
    pub fn provisioning(msg: impl Into<String>) -> Self {
        Self::Provisioning(msg.into())
    }

    /// Creates a query error with the given message.
    pub fn query(msg: impl Into<String>) -> Self {
        Self::Query(msg.into())
    }

    /// Creates a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates an internal error with the given message.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Returns the error category as a string for display purposes.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Provisioning(_) => "Provisioning Error",
            Self::Query(_) => "Query Error",
            Self::Config(_) => "Configuration Error",
            Self::Internal(_) => "Internal Error",
        }
    }

    /// Returns the bare message without the category prefix.
    pub fn message(&self) -> &str {
        match self {
            Self::Provisioning(msg)
            | Self::Query(msg)
            | Self::Config(msg)
            | Self::Internal(msg) => msg,
        }
    }

    /// Returns true if the session can continue after this error.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Query(_))
    }
}

/// Result type alias using LabError.
pub type Result<T> = std::result::Result<T, LabError>;
