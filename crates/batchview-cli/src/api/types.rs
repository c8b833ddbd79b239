//! API request and response types
//!
//! Matches the collaborator service's JSON bodies.

use batchview_common::BatchId;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// One entry of `GET /upload/batches`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchEntry {
    pub batch_id: BatchId,
}

/// Response of `POST /upload/init`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadInitResponse {
    pub batch_id: BatchId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Final report of `POST /upload/process/{batch_id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadSummary {
    pub batch_id: BatchId,
    #[serde(default)]
    pub filename: Option<String>,
    pub total_records: u64,
    pub successful_records: u64,
    pub failed_records: u64,
    pub status: String,
    /// Per-record rejection details, passed through as sent
    #[serde(default)]
    pub errors: Vec<serde_json::Value>,
    #[serde(default)]
    pub completed_at: Option<String>,
    #[serde(default)]
    pub duration_seconds: Option<f64>,
}

impl UploadSummary {
    /// Completion time, accepting both offset and naive (UTC) timestamps
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        let raw = self.completed_at.as_deref()?;
        DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.with_timezone(&Utc))
            .ok()
            .or_else(|| {
                NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                    .ok()
                    .map(|naive| naive.and_utc())
            })
    }
}

/// Server-side processing progress of `GET /upload/status/{batch_id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadStatus {
    pub batch_id: BatchId,
    pub processed: u64,
    pub total: u64,
    pub successful: u64,
    pub failed: u64,
    pub percentage: f64,
    pub status: String,
    #[serde(default)]
    pub current_record: Option<String>,
    /// Records per second
    #[serde(default)]
    pub speed: Option<f64>,
    #[serde(default)]
    pub estimated_time_remaining: Option<f64>,
    #[serde(default)]
    pub errors: Vec<serde_json::Value>,
}

/// Error document returned with non-success statuses
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub detail: serde_json::Value,
}

impl ErrorBody {
    /// Human-readable detail; validation errors arrive as a list of objects
    pub fn message(&self) -> String {
        match &self.detail {
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Array(items) => items
                .iter()
                .map(|item| {
                    item.get("msg")
                        .and_then(|m| m.as_str())
                        .map(str::to_string)
                        .unwrap_or_else(|| item.to_string())
                })
                .collect::<Vec<_>>()
                .join("; "),
            other => other.to_string(),
        }
    }
}
