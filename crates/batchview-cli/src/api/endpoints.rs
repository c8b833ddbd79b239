//! API endpoint URL builders
//!
//! Batch ids are opaque, so they are percent-encoded as path segments.

use batchview_common::BatchId;

fn segment(batch_id: &BatchId) -> String {
    urlencoding::encode(batch_id.as_str()).into_owned()
}

/// Known batches
pub fn batches_url(base_url: &str) -> String {
    format!("{}/upload/batches", base_url)
}

/// Multipart upload that registers a new batch
pub fn init_url(base_url: &str) -> String {
    format!("{}/upload/init", base_url)
}

/// Server-side processing of an initialized batch
pub fn process_url(base_url: &str, batch_id: &BatchId) -> String {
    format!("{}/upload/process/{}", base_url, segment(batch_id))
}

/// Processing progress of a batch
pub fn status_url(base_url: &str, batch_id: &BatchId) -> String {
    format!("{}/upload/status/{}", base_url, segment(batch_id))
}

/// Rows of a batch, capped at `limit`
pub fn batch_data_url(base_url: &str, batch_id: &BatchId, limit: usize) -> String {
    format!("{}/data/batch/{}?limit={}", base_url, segment(batch_id), limit)
}
