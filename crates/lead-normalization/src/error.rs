//! Error types for lead normalization.

use thiserror::Error;

/// Errors that can occur while normalizing a lead table.
#[derive(Debug, Error)]
pub enum NormalizationError {
    /// Polars DataFrame operation error.
    #[error("DataFrame error: {0}")]
    PolarsError(#[from] polars::error::PolarsError),
}

/// Result type for normalization operations.
pub type Result<T> = std::result::Result<T, NormalizationError>;
