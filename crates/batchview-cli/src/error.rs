//! Error types for the batchview client
//!
//! Remote failures are converted to one of three component-level kinds at the
//! component boundary: [`CliError::Registry`], [`CliError::Upload`] and
//! [`CliError::Fetch`]. The lower-level variants describe what went wrong
//! underneath and are folded into those messages.

use batchview_common::{BatchId, ModelError};
use std::fmt;
use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Step of the upload sequence that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadStage {
    Init,
    Process,
    Fetch,
    /// Another upload was already in flight
    Busy,
}

impl fmt::Display for UploadStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            UploadStage::Init => "init",
            UploadStage::Process => "process",
            UploadStage::Fetch => "fetch",
            UploadStage::Busy => "busy",
        };
        f.write_str(name)
    }
}

/// Error type for client operations
///
/// All errors are user-facing with a clear message and, where possible, a hint.
#[derive(Error, Debug)]
pub enum CliError {
    /// Batch list retrieval failed
    #[error("Could not load the batch list: {0}. Check that the server is running and BATCHVIEW_API_URL points to it.")]
    Registry(String),

    /// One step of the upload sequence failed
    #[error("Upload failed at the {stage} step: {message}{}", upload_hint(.stage, .batch_id.as_ref()))]
    Upload {
        stage: UploadStage,
        /// Batch registered by a successful init step, if any
        batch_id: Option<BatchId>,
        message: String,
    },

    /// Row retrieval for a selected batch failed
    #[error("Could not load batch '{batch_id}': {message}. Select the batch again to retry.")]
    Fetch { batch_id: BatchId, message: String },

    /// Server answered with a non-success status
    #[error("server responded with {status}: {detail}")]
    Status { status: u16, detail: String },

    /// Server answered with a body the client does not understand
    #[error("unexpected server response: {0}")]
    Api(String),

    /// HTTP request failed
    #[error("network request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// File system operation failed
    #[error("File operation failed: {0}. Check the path and file permissions.")]
    Io(#[from] std::io::Error),

    /// Configuration is missing or invalid
    #[error("Configuration error: {0}. Check your environment variables or .env file.")]
    Config(String),

    /// JSON serialization failed
    #[error("Failed to encode JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// A value did not satisfy the data model
    #[error(transparent)]
    Model(#[from] ModelError),

    /// Generic anyhow error wrapper
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

fn upload_hint(stage: &UploadStage, batch_id: Option<&BatchId>) -> String {
    match (stage, batch_id) {
        (UploadStage::Busy, _) => ". Wait for the current upload to finish.".to_string(),
        (_, Some(id)) => format!(
            ". Batch '{}' is registered on the server; retry to process and load it.",
            id
        ),
        _ => ". Check the file and try again.".to_string(),
    }
}

impl CliError {
    pub fn registry(cause: impl fmt::Display) -> Self {
        Self::Registry(cause.to_string())
    }

    pub fn upload(stage: UploadStage, batch_id: Option<BatchId>, cause: impl fmt::Display) -> Self {
        Self::Upload {
            stage,
            batch_id,
            message: cause.to_string(),
        }
    }

    pub fn busy() -> Self {
        Self::upload(UploadStage::Busy, None, "another upload is already in progress")
    }

    pub fn fetch(batch_id: BatchId, cause: impl fmt::Display) -> Self {
        Self::Fetch {
            batch_id,
            message: cause.to_string(),
        }
    }

    pub fn api(msg: impl Into<String>) -> Self {
        Self::Api(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Stage of a failed upload, if this is an upload error
    pub fn upload_stage(&self) -> Option<UploadStage> {
        match self {
            Self::Upload { stage, .. } => Some(*stage),
            _ => None,
        }
    }

    /// True for a 404 answer from the server
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Status { status, .. } => *status == 404,
            Self::Http(e) => e.status().is_some_and(|s| s.as_u16() == 404),
            _ => false,
        }
    }
}
