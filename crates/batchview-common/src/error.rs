//! Error types for the batchview data model

use thiserror::Error;

/// Result type alias for model operations
pub type Result<T> = std::result::Result<T, ModelError>;

/// Errors raised while constructing model values
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("Batch id cannot be empty")]
    EmptyBatchId,

    #[error("Upload progress must be between 0 and 100, got {0}")]
    ProgressOutOfRange(u32),

    #[error("Page size must be greater than zero")]
    ZeroPageSize,
}
