//! Error types for IntelliSQL.
//!
//! Every failure in the question-to-result pipeline is one of these variants.
//! Nothing is retried or recovered inside the core; the presentation layer
//! turns the error into a single inline message.

use thiserror::Error;

/// Main error type for IntelliSQL operations.
#[derive(Error, Debug)]
pub enum IntelliSqlError {
    /// Configuration errors (missing API key, invalid config file, unknown provider).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Translation errors from the hosted model (network, auth, quota).
    #[error("LLM error: {0}")]
    Llm(String),

    /// The database file could not be opened.
    #[error("Connection error: {0}")]
    Connection(String),

    /// The engine rejected the SQL (syntax errors, unknown columns, etc.)
    #[error("Query error: {0}")]
    Query(String),

    /// Internal application errors (unexpected states, I/O on the terminal).
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntelliSqlError {
    /// Creates a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates an LLM error with the given message.
    pub fn llm(msg: impl Into<String>) -> Self {
        Self::Llm(msg.into())
    }

    /// Creates a connection error with the given message.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Creates a query error with the given message.
    pub fn query(msg: impl Into<String>) -> Self {
        Self::Query(msg.into())
    }

    /// Creates an internal error with the given message.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Returns the error category as a string for display purposes.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Config(_) => "Configuration Error",
            Self::Llm(_) => "LLM Error",
            Self::Connection(_) => "Connection Error",
            Self::Query(_) => "Query Error",
            Self::Internal(_) => "Internal Error",
        }
    }
}

/// Result type alias using IntelliSqlError.
pub type Result<T> = std::result::Result<T, IntelliSqlError>;
