//! In-memory batch service for unit tests

use crate::api::{BatchEntry, BatchService, ProgressFn, UploadInitResponse, UploadStatus, UploadSummary};
use crate::error::{CliError, Result};
use crate::file::FileHandle;
use async_trait::async_trait;
use batchview_common::{BatchId, Row};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

pub fn batch(id: &str) -> BatchId {
    BatchId::new(id).unwrap()
}

pub fn rows(n: usize) -> Vec<Row> {
    (0..n)
        .map(|i| Row {
            client_code: Some(format!("C-{:04}", i)),
            full_name: Some(format!("Client {}", i)),
            ..Row::default()
        })
        .collect()
}

pub fn spreadsheet(size: usize) -> FileHandle {
    FileHandle::new("clients.xlsx", vec![7; size])
}

/// Operation names accepted by [`FakeService::fail`]
pub const LIST: &str = "list";
pub const INIT: &str = "init";
pub const PROCESS: &str = "process";
pub const FETCH: &str = "fetch";

pub struct FakeService {
    batches: Vec<BatchId>,
    rows: Mutex<HashMap<BatchId, Vec<Row>>>,
    new_batch: BatchId,
    failing: Mutex<HashSet<&'static str>>,
    calls: Mutex<Vec<String>>,
    init_gate: Option<Arc<Notify>>,
}

impl FakeService {
    pub fn new() -> Self {
        Self {
            batches: Vec::new(),
            rows: Mutex::new(HashMap::new()),
            new_batch: batch("new-batch"),
            failing: Mutex::new(HashSet::new()),
            calls: Mutex::new(Vec::new()),
            init_gate: None,
        }
    }

    pub fn with_batches(mut self, ids: &[&str]) -> Self {
        self.batches = ids.iter().map(|id| batch(id)).collect();
        self
    }

    pub fn with_rows(self, id: &str, n: usize) -> Self {
        self.rows.lock().unwrap().insert(batch(id), rows(n));
        self
    }

    /// Hold every init call until the returned handle is notified
    pub fn gated(mut self) -> (Self, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        self.init_gate = Some(gate.clone());
        (self, gate)
    }

    pub fn fail(&self, op: &'static str) {
        self.failing.lock().unwrap().insert(op);
    }

    pub fn heal(&self, op: &'static str) {
        self.failing.lock().unwrap().remove(op);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn call(&self, op: &'static str, detail: impl std::fmt::Display) -> Result<()> {
        self.calls.lock().unwrap().push(format!("{} {}", op, detail));
        if self.failing.lock().unwrap().contains(op) {
            return Err(CliError::Status {
                status: 500,
                detail: format!("{} exploded", op),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl BatchService for FakeService {
    async fn list_batches(&self) -> Result<Vec<BatchEntry>> {
        self.call(LIST, "")?;
        Ok(self
            .batches
            .iter()
            .map(|id| BatchEntry { batch_id: id.clone() })
            .collect())
    }

    async fn init_upload(&self, file: &FileHandle, on_progress: ProgressFn) -> Result<UploadInitResponse> {
        let total = file.size();
        for quarter in 1..=4u64 {
            on_progress(total * quarter / 4, total);
        }
        if let Some(ref gate) = self.init_gate {
            gate.notified().await;
        }
        self.call(INIT, file.name())?;
        Ok(UploadInitResponse {
            batch_id: self.new_batch.clone(),
            message: None,
        })
    }

    async fn process_batch(&self, batch_id: &BatchId) -> Result<Option<UploadSummary>> {
        self.call(PROCESS, batch_id)?;
        let count = self.rows.lock().unwrap().get(batch_id).map_or(0, Vec::len) as u64;
        Ok(Some(UploadSummary {
            batch_id: batch_id.clone(),
            filename: Some("clients.xlsx".to_string()),
            total_records: count,
            successful_records: count,
            failed_records: 0,
            status: "completed".to_string(),
            errors: Vec::new(),
            completed_at: None,
            duration_seconds: Some(0.1),
        }))
    }

    async fn fetch_rows(&self, batch_id: &BatchId, limit: usize) -> Result<Vec<Row>> {
        self.call(FETCH, format!("{} {}", batch_id, limit))?;
        let mut rows = self.rows.lock().unwrap().get(batch_id).cloned().unwrap_or_default();
        rows.truncate(limit);
        Ok(rows)
    }

    async fn upload_status(&self, batch_id: &BatchId) -> Result<UploadStatus> {
        self.call("status", batch_id)?;
        Ok(UploadStatus {
            batch_id: batch_id.clone(),
            processed: 1,
            total: 1,
            successful: 1,
            failed: 0,
            percentage: 100.0,
            status: "completed".to_string(),
            current_record: None,
            speed: None,
            estimated_time_remaining: None,
            errors: Vec::new(),
        })
    }
}
