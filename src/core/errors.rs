//! Shared error types for cycle detection

use thiserror::Error;

/// Main error type for cyclemap operations
#[derive(Debug, Error)]
pub enum DetectionError {
    /// Every dependency was filtered away even though the input had edges,
    /// which almost always means the filters are misconfigured
    #[error("dependency graph is empty after filtering: {dropped} of {supplied} edges were dropped")]
    EmptyGraph { supplied: usize, dropped: usize },

    /// Configuration failed validation before the pipeline started
    #[error("invalid detection config: {0}")]
    InvalidConfig(String),

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl DetectionError {
    /// Create an empty-graph error from the builder's edge accounting
    pub fn empty_graph(supplied: usize, dropped: usize) -> Self {
        Self::EmptyGraph { supplied, dropped }
    }

    /// Create a config validation error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, DetectionError>;
