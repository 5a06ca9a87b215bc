//! Graph Error Types
//!
//! Error handling for knowledge graph operations. Lookup misses are not
//! errors; they come back as `Ok(None)` or empty collections.

use thiserror::Error;

use uuid::Uuid;

/// Error type for graph engine and storage operations
#[derive(Error, Debug, Clone)]
pub enum GraphError {
    #[error("Storage backend error: {0}")]
    Backend(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("Relationship endpoint missing: {from} -> {to}")]
    MissingEndpoint { from: Uuid, to: Uuid },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Concurrent access error: {0}")]
    ConcurrentAccess(String),

    #[error("Timeout error: operation timed out after {duration_ms}ms")]
    Timeout { duration_ms: u64 },
}

/// Result type for graph operations
pub type GraphResult<T> = Result<T, GraphError>;

impl GraphError {
    /// Create a generic backend error
    pub fn backend<S: Into<String>>(msg: S) -> Self {
        Self::Backend(msg.into())
    }

    /// Create a serialization error
    pub fn serialization<S: Into<String>>(msg: S) -> Self {
        Self::Serialization(msg.into())
    }

    /// Create an invalid operation error
    pub fn invalid_operation<S: Into<String>>(msg: S) -> Self {
        Self::InvalidOperation(msg.into())
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(msg: S) -> Self {
        Self::Configuration(msg.into())
    }

    /// Check if the error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Backend(_) | Self::ConcurrentAccess(_) | Self::Timeout { .. }
        )
    }
}

impl From<serde_json::Error> for GraphError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
