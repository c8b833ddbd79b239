//! The collaborator seam
//!
//! Registry, orchestrator and fetcher receive an `Arc<dyn BatchService>`, so
//! tests can substitute an in-memory service for [`ApiClient`](super::ApiClient).

use crate::api::types::{BatchEntry, UploadInitResponse, UploadStatus, UploadSummary};
use crate::error::Result;
use crate::file::FileHandle;
use async_trait::async_trait;
use batchview_common::{BatchId, Row};
use std::sync::Arc;

/// Called with `(sent_bytes, total_bytes)` while a file is transferred.
pub type ProgressFn = Arc<dyn Fn(u64, u64) + Send + Sync>;

/// Remote operations of the batch service
#[async_trait]
pub trait BatchService: Send + Sync {
    /// Known batches, in server order
    async fn list_batches(&self) -> Result<Vec<BatchEntry>>;

    /// Transfer `file` and register a new batch
    async fn init_upload(&self, file: &FileHandle, on_progress: ProgressFn)
        -> Result<UploadInitResponse>;

    /// Process an initialized batch. The summary is `None` when the server
    /// sends no body the client understands.
    async fn process_batch(&self, batch_id: &BatchId) -> Result<Option<UploadSummary>>;

    /// Up to `limit` rows of a batch, in server order
    async fn fetch_rows(&self, batch_id: &BatchId, limit: usize) -> Result<Vec<Row>>;

    /// Server-side processing progress
    async fn upload_status(&self, batch_id: &BatchId) -> Result<UploadStatus>;
}
