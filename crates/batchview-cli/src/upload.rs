//! Upload orchestration
//!
//! Drives init → process → fetch for a new file. Steps run strictly in order
//! and the first failure ends the sequence; nothing is retried automatically.
//! Only the init step reports incremental progress.
//!
//! One orchestrator runs at most one sequence at a time: a call made while
//! another is pending is rejected with [`UploadStage::Busy`].

use crate::api::{BatchService, ProgressFn, UploadSummary};
use crate::error::{CliError, Result, UploadStage};
use crate::file::FileHandle;
use batchview_common::{BatchId, Row, UploadProgress};
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Milestones reported while a sequence runs
#[derive(Debug, Clone)]
pub enum UploadEvent {
    /// Init-step transfer progress; starts at 0, never decreases, ends at 100
    Progress(UploadProgress),
    /// Batch registered; processing starts next
    Initialized(BatchId),
    /// Processing finished
    Processed(Option<UploadSummary>),
}

/// Receives [`UploadEvent`]s
pub type UploadListener = Arc<dyn Fn(UploadEvent) + Send + Sync>;

/// Result of a completed sequence
#[derive(Debug, Clone)]
pub struct UploadOutcome {
    pub batch_id: BatchId,
    pub rows: Vec<Row>,
    pub summary: Option<UploadSummary>,
}

/// Clears the in-flight flag when a sequence ends, however it ends.
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct UploadOrchestrator {
    service: Arc<dyn BatchService>,
    fetch_limit: usize,
    max_upload_bytes: u64,
    in_flight: AtomicBool,
}

impl UploadOrchestrator {
    pub fn new(service: Arc<dyn BatchService>, fetch_limit: usize, max_upload_bytes: u64) -> Self {
        Self {
            service,
            fetch_limit,
            max_upload_bytes,
            in_flight: AtomicBool::new(false),
        }
    }

    /// True while a sequence is running
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    fn begin(&self) -> Result<InFlight<'_>> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| InFlight(&self.in_flight))
            .map_err(|_| {
                warn!("Upload rejected, another upload is in progress");
                CliError::busy()
            })
    }

    /// Upload `file` and return the new batch with its rows.
    pub async fn upload(&self, file: &FileHandle, listener: UploadListener) -> Result<UploadOutcome> {
        let _guard = self.begin()?;

        file.validate(self.max_upload_bytes)?;

        listener(UploadEvent::Progress(UploadProgress::ZERO));

        let reported = Arc::new(AtomicU8::new(0));
        let on_progress: ProgressFn = {
            let listener = listener.clone();
            let reported = reported.clone();
            Arc::new(move |sent, total| {
                let progress = UploadProgress::from_ratio(sent, total);
                if reported.fetch_max(progress.percent(), Ordering::AcqRel) < progress.percent() {
                    listener(UploadEvent::Progress(progress));
                }
            })
        };

        info!(file = %file.name(), bytes = file.size(), "Starting upload");

        let init = self
            .service
            .init_upload(file, on_progress)
            .await
            .map_err(|e| CliError::upload(UploadStage::Init, None, e))?;

        if reported.fetch_max(100, Ordering::AcqRel) < 100 {
            listener(UploadEvent::Progress(UploadProgress::COMPLETE));
        }

        info!(batch_id = %init.batch_id, "File accepted");
        self.process_and_fetch(init.batch_id, &listener).await
    }

    /// Continue a sequence for a batch whose init step already succeeded,
    /// starting at `from` (the process or fetch step).
    pub async fn resume(
        &self,
        batch_id: BatchId,
        from: UploadStage,
        listener: UploadListener,
    ) -> Result<UploadOutcome> {
        let _guard = self.begin()?;

        info!(batch_id = %batch_id, stage = %from, "Resuming upload");
        match from {
            UploadStage::Process => self.process_and_fetch(batch_id, &listener).await,
            UploadStage::Fetch => {
                let rows = self.fetch(&batch_id).await?;
                Ok(UploadOutcome {
                    batch_id,
                    rows,
                    summary: None,
                })
            },
            other => Err(CliError::upload(
                other,
                Some(batch_id),
                "only the process and fetch steps can be resumed",
            )),
        }
    }

    async fn process_and_fetch(
        &self,
        batch_id: BatchId,
        listener: &UploadListener,
    ) -> Result<UploadOutcome> {
        listener(UploadEvent::Initialized(batch_id.clone()));

        let summary = self
            .service
            .process_batch(&batch_id)
            .await
            .map_err(|e| CliError::upload(UploadStage::Process, Some(batch_id.clone()), e))?;

        if let Some(ref s) = summary {
            info!(
                batch_id = %batch_id,
                total = s.total_records,
                successful = s.successful_records,
                failed = s.failed_records,
                "Batch processed"
            );
        }
        listener(UploadEvent::Processed(summary.clone()));

        let rows = self.fetch(&batch_id).await?;

        Ok(UploadOutcome {
            batch_id,
            rows,
            summary,
        })
    }

    async fn fetch(&self, batch_id: &BatchId) -> Result<Vec<Row>> {
        let rows = self
            .service
            .fetch_rows(batch_id, self.fetch_limit)
            .await
            .map_err(|e| CliError::upload(UploadStage::Fetch, Some(batch_id.clone()), e))?;

        debug!(batch_id = %batch_id, rows = rows.len(), "Upload rows retrieved");
        Ok(rows)
    }
}
