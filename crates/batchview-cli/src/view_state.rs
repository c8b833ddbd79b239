//! View state and its coordinator
//!
//! [`ViewStateManager`] is the only holder of mutable state. It runs the
//! other components and applies each completed operation to the
//! [`ViewState`] under one lock acquisition, then publishes a [`ViewChange`].
//! Subscribers re-read the state with [`ViewStateManager::snapshot`].
//!
//! Phases:
//!
//! ```text
//! Idle ──upload──▶ Uploading ──init ok──▶ Processing ──fetch ok──▶ Loaded
//!  │                   │                      │
//!  └──select ok──▶ Loaded                     │
//!  any stage error ───────────────────────────┴──▶ Failed ──next action──▶ Idle
//! ```

use crate::api::{BatchService, UploadSummary};
use crate::config::Config;
use crate::error::{CliError, Result, UploadStage};
use crate::fetcher::DataFetcher;
use crate::file::FileHandle;
use crate::registry::BatchRegistry;
use crate::upload::{UploadEvent, UploadListener, UploadOrchestrator, UploadOutcome};
use batchview_common::{BatchId, PageState, Row, UploadProgress};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

/// Buffered notifications per subscriber before it starts lagging
const CHANGE_CHANNEL_CAPACITY: usize = 64;

/// Which component-level operation failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Registry,
    Upload,
    Fetch,
    /// Not attributed to a component
    Other,
}

/// What the last failed operation was and why
#[derive(Debug, Clone, PartialEq)]
pub struct Failure {
    pub kind: FailureKind,
    pub stage: Option<UploadStage>,
    pub batch_id: Option<BatchId>,
    pub message: String,
}

impl From<&CliError> for Failure {
    fn from(err: &CliError) -> Self {
        let (kind, stage, batch_id) = match err {
            CliError::Registry(_) => (FailureKind::Registry, None, None),
            CliError::Upload { stage, batch_id, .. } => {
                (FailureKind::Upload, Some(*stage), batch_id.clone())
            },
            CliError::Fetch { batch_id, .. } => (FailureKind::Fetch, None, Some(batch_id.clone())),
            CliError::Status { .. }
            | CliError::Api(_)
            | CliError::Http(_)
            | CliError::Io(_)
            | CliError::Config(_)
            | CliError::JsonParse(_)
            | CliError::Model(_)
            | CliError::Other(_) => (FailureKind::Other, None, None),
        };
        Self {
            kind,
            stage,
            batch_id,
            message: err.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    Idle,
    Uploading,
    Processing,
    Loaded,
    Failed(Failure),
}

/// The three renderable situations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewStatus {
    /// Nothing to show: no batch loaded yet, or the loaded batch is empty
    NoData,
    /// The last operation failed
    Failed,
    /// Rows are available
    Loaded,
}

/// Published after every applied mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewChange {
    Batches,
    Phase,
    Progress,
    Rows,
    Page,
}

/// An upload whose batch is registered but not yet loaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingUpload {
    pub batch_id: BatchId,
    /// Step a retry continues from
    pub resume_at: UploadStage,
}

/// Everything the renderer needs
#[derive(Debug, Clone)]
pub struct ViewState {
    phase: Phase,
    selected_batch: Option<BatchId>,
    rows: Vec<Row>,
    page: PageState,
    known_batches: Vec<BatchId>,
    progress: UploadProgress,
    pending_upload: Option<PendingUpload>,
    last_summary: Option<UploadSummary>,
}

impl ViewState {
    fn new(rows_per_page: usize) -> Result<Self> {
        Ok(Self {
            phase: Phase::Idle,
            selected_batch: None,
            rows: Vec::new(),
            page: PageState::new(rows_per_page, 0)?,
            known_batches: Vec::new(),
            progress: UploadProgress::ZERO,
            pending_upload: None,
            last_summary: None,
        })
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn selected_batch(&self) -> Option<&BatchId> {
        self.selected_batch.as_ref()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn page(&self) -> PageState {
        self.page
    }

    pub fn known_batches(&self) -> &[BatchId] {
        &self.known_batches
    }

    pub fn progress(&self) -> UploadProgress {
        self.progress
    }

    /// Upload that can be retried without sending the file again
    pub fn pending_upload(&self) -> Option<&PendingUpload> {
        self.pending_upload.as_ref()
    }

    pub fn last_summary(&self) -> Option<&UploadSummary> {
        self.last_summary.as_ref()
    }

    pub fn failure(&self) -> Option<&Failure> {
        match &self.phase {
            Phase::Failed(failure) => Some(failure),
            _ => None,
        }
    }

    /// Rows of the current page
    pub fn page_rows(&self) -> &[Row] {
        self.page.slice(&self.rows)
    }

    pub fn status(&self) -> ViewStatus {
        match self.phase {
            Phase::Failed(_) => ViewStatus::Failed,
            _ if self.rows.is_empty() => ViewStatus::NoData,
            _ => ViewStatus::Loaded,
        }
    }

    /// True while an upload sequence is running
    pub fn is_busy(&self) -> bool {
        matches!(self.phase, Phase::Uploading | Phase::Processing)
    }

    /// Row set and page position always change together.
    fn load(&mut self, batch_id: BatchId, rows: Vec<Row>) {
        self.page = self.page.reset(rows.len());
        self.rows = rows;
        self.selected_batch = Some(batch_id);
        self.phase = Phase::Loaded;
    }

    fn remember(&mut self, batch_id: &BatchId) {
        if !self.known_batches.contains(batch_id) {
            self.known_batches.push(batch_id.clone());
        }
    }

    /// A new upload starts from zero and supersedes any interrupted one.
    fn begin_upload(&mut self) {
        self.acknowledge_failure();
        self.progress = UploadProgress::ZERO;
        self.pending_upload = None;
    }

    /// A new user action clears a previous failure.
    fn acknowledge_failure(&mut self) {
        if matches!(self.phase, Phase::Failed(_)) {
            self.phase = Phase::Idle;
        }
    }
}

/// State plus its change channel, shared with upload listeners
struct Shared {
    state: Mutex<ViewState>,
    changes: broadcast::Sender<ViewChange>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, ViewState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Apply `update` atomically, then notify subscribers.
    fn apply<R>(&self, change: ViewChange, update: impl FnOnce(&mut ViewState) -> R) -> R {
        let result = {
            let mut state = self.lock();
            update(&mut state)
        };
        // No subscribers is fine.
        let _ = self.changes.send(change);
        result
    }

    fn on_upload_event(&self, event: UploadEvent) {
        match event {
            UploadEvent::Progress(progress) => self.apply(ViewChange::Progress, |state| {
                state.phase = Phase::Uploading;
                state.progress = progress;
            }),
            UploadEvent::Initialized(batch_id) => self.apply(ViewChange::Phase, |state| {
                state.phase = Phase::Processing;
                state.remember(&batch_id);
                state.pending_upload = Some(PendingUpload {
                    batch_id,
                    resume_at: UploadStage::Process,
                });
            }),
            UploadEvent::Processed(summary) => self.apply(ViewChange::Phase, |state| {
                if let Some(ref mut pending) = state.pending_upload {
                    pending.resume_at = UploadStage::Fetch;
                }
                state.last_summary = summary;
            }),
        }
    }
}

/// Coordinates registry, orchestrator, fetcher and pagination over one
/// [`ViewState`]
pub struct ViewStateManager {
    shared: Arc<Shared>,
    registry: BatchRegistry,
    orchestrator: UploadOrchestrator,
    fetcher: DataFetcher,
    fetch_limit: usize,
    batches_requested: AtomicBool,
}

impl ViewStateManager {
    pub fn new(service: Arc<dyn BatchService>, config: &Config) -> Result<Self> {
        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);

        Ok(Self {
            shared: Arc::new(Shared {
                state: Mutex::new(ViewState::new(config.rows_per_page)?),
                changes,
            }),
            registry: BatchRegistry::new(service.clone()),
            orchestrator: UploadOrchestrator::new(
                service.clone(),
                config.fetch_limit,
                config.max_upload_bytes,
            ),
            fetcher: DataFetcher::new(service),
            fetch_limit: config.fetch_limit,
            batches_requested: AtomicBool::new(false),
        })
    }

    /// Notifications of every applied mutation
    pub fn subscribe(&self) -> broadcast::Receiver<ViewChange> {
        self.shared.changes.subscribe()
    }

    /// Consistent copy of the current state
    pub fn snapshot(&self) -> ViewState {
        self.shared.lock().clone()
    }

    /// Populate the batch list. Only the first call reaches the server;
    /// later calls return immediately.
    pub async fn startup(&self) -> Result<()> {
        if self.batches_requested.swap(true, Ordering::AcqRel) {
            debug!("Batch list already requested");
            return Ok(());
        }

        match self.registry.list_batches().await {
            Ok(batches) => {
                info!(count = batches.len(), "Known batches loaded");
                self.shared.apply(ViewChange::Batches, |state| {
                    state.known_batches = batches;
                });
                Ok(())
            },
            Err(e) => {
                self.fail(&e);
                Err(e)
            },
        }
    }

    /// Run the upload sequence for `file` and show its rows from page 0.
    ///
    /// A call made while another upload is running is rejected and leaves
    /// the state untouched.
    pub async fn upload(&self, file: FileHandle) -> Result<()> {
        if self.orchestrator.is_busy() {
            return Err(self.orchestrator_busy());
        }
        self.shared.apply(ViewChange::Progress, ViewState::begin_upload);

        let result = self.orchestrator.upload(&file, self.listener()).await;
        self.finish_upload(result)
    }

    /// Continue the upload left behind by a failed process or fetch step,
    /// without sending the file again.
    pub async fn retry_upload(&self) -> Result<()> {
        let pending = self.shared.lock().pending_upload.clone();
        let Some(pending) = pending else {
            return Err(CliError::config("There is no interrupted upload to retry"));
        };
        if self.orchestrator.is_busy() {
            return Err(self.orchestrator_busy());
        }
        self.shared.apply(ViewChange::Phase, ViewState::acknowledge_failure);

        let result = self
            .orchestrator
            .resume(pending.batch_id, pending.resume_at, self.listener())
            .await;
        self.finish_upload(result)
    }

    /// Load `batch_id` and reset to page 0. The batch does not have to be in
    /// the known list. On failure the previous rows stay in place.
    pub async fn select_batch(&self, batch_id: BatchId) -> Result<()> {
        self.shared.apply(ViewChange::Phase, ViewState::acknowledge_failure);

        match self.fetcher.fetch_rows(&batch_id, self.fetch_limit).await {
            Ok(rows) => {
                info!(batch_id = %batch_id, rows = rows.len(), "Batch selected");
                self.shared.apply(ViewChange::Rows, |state| state.load(batch_id, rows));
                Ok(())
            },
            Err(e) => {
                self.fail(&e);
                Err(e)
            },
        }
    }

    /// Back to the empty selection; nothing is fetched.
    pub fn clear_selection(&self) {
        self.shared.apply(ViewChange::Rows, |state| {
            state.acknowledge_failure();
            state.selected_batch = None;
            state.rows.clear();
            state.page = state.page.reset(0);
        });
    }

    pub fn next_page(&self) -> PageState {
        self.navigate(PageState::next)
    }

    pub fn prev_page(&self) -> PageState {
        self.navigate(PageState::prev)
    }

    /// Jump to `index`, clamped to the available pages
    pub fn go_to_page(&self, index: usize) -> PageState {
        self.navigate(|page| page.go_to(index))
    }

    fn navigate(&self, step: impl FnOnce(PageState) -> PageState) -> PageState {
        self.shared.apply(ViewChange::Page, |state| {
            state.page = step(state.page);
            state.page
        })
    }

    fn listener(&self) -> UploadListener {
        let shared = self.shared.clone();
        Arc::new(move |event| shared.on_upload_event(event))
    }

    fn orchestrator_busy(&self) -> CliError {
        warn!("Upload requested while another is running");
        CliError::busy()
    }

    fn finish_upload(&self, result: Result<UploadOutcome>) -> Result<()> {
        match result {
            Ok(outcome) => {
                info!(batch_id = %outcome.batch_id, rows = outcome.rows.len(), "Upload loaded");
                self.shared.apply(ViewChange::Rows, |state| {
                    state.pending_upload = None;
                    state.remember(&outcome.batch_id);
                    state.load(outcome.batch_id, outcome.rows);
                });
                Ok(())
            },
            // The running upload owns the state.
            Err(e) if e.upload_stage() == Some(UploadStage::Busy) => Err(e),
            Err(e) => {
                self.fail(&e);
                Err(e)
            },
        }
    }

    fn fail(&self, err: &CliError) {
        warn!(error = %err, "Operation failed");
        let failure = Failure::from(err);
        self.shared.apply(ViewChange::Phase, |state| {
            state.phase = Phase::Failed(failure);
        });
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::testing::{self, batch, spreadsheet, FakeService};

    fn manager(service: Arc<FakeService>) -> ViewStateManager {
        ViewStateManager::new(service, &Config::default()).unwrap()
    }

    #[tokio::test]
    async fn test_initial_state_is_empty() {
        let view = manager(Arc::new(FakeService::new())).snapshot();
        assert_eq!(view.phase(), &Phase::Idle);
        assert_eq!(view.status(), ViewStatus::NoData);
        assert_eq!(view.page().rows_per_page, 30);
        assert_eq!(view.page().total_pages(), 0);
        assert!(view.selected_batch().is_none());
    }

    #[tokio::test]
    async fn test_startup_loads_batches_once() {
        let service = Arc::new(FakeService::new().with_batches(&["b-1", "b-2"]));
        let manager = manager(service.clone());

        manager.startup().await.unwrap();
        manager.startup().await.unwrap();

        assert_eq!(manager.snapshot().known_batches(), [batch("b-1"), batch("b-2")]);
        assert_eq!(service.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_empty_batch_list_fetches_nothing() {
        let service = Arc::new(FakeService::new());
        let manager = manager(service.clone());

        manager.startup().await.unwrap();
        let view = manager.snapshot();
        assert!(view.known_batches().is_empty());
        assert_eq!(view.status(), ViewStatus::NoData);
        assert!(!service.calls().iter().any(|c| c.starts_with("fetch")));
    }

    #[tokio::test]
    async fn test_startup_failure_keeps_list_and_reports() {
        let service = Arc::new(FakeService::new().with_batches(&["b-1"]));
        service.fail(testing::LIST);
        let manager = manager(service);

        assert!(manager.startup().await.is_err());
        let view = manager.snapshot();
        assert!(view.known_batches().is_empty());
        assert_eq!(view.status(), ViewStatus::Failed);
        assert_eq!(view.failure().unwrap().kind, FailureKind::Registry);
    }

    #[tokio::test]
    async fn test_selection_resets_page() {
        let service = Arc::new(FakeService::new().with_rows("b-1", 100).with_rows("b-2", 45));
        let manager = manager(service);

        manager.select_batch(batch("b-1")).await.unwrap();
        manager.go_to_page(3);
        assert_eq!(manager.snapshot().page().current_page, 3);

        manager.select_batch(batch("b-2")).await.unwrap();
        let view = manager.snapshot();
        assert_eq!(view.page().current_page, 0);
        assert_eq!(view.page().total_rows, 45);
        assert_eq!(view.selected_batch(), Some(&batch("b-2")));
        assert_eq!(view.phase(), &Phase::Loaded);
        assert_eq!(view.page_rows().len(), 30);
    }

    #[tokio::test]
    async fn test_selecting_unknown_batch_is_allowed() {
        let service = Arc::new(FakeService::new().with_batches(&["b-1"]).with_rows("elsewhere", 2));
        let manager = manager(service);
        manager.startup().await.unwrap();

        manager.select_batch(batch("elsewhere")).await.unwrap();
        let view = manager.snapshot();
        assert_eq!(view.selected_batch(), Some(&batch("elsewhere")));
        assert_eq!(view.known_batches(), [batch("b-1")]);
    }

    #[tokio::test]
    async fn test_failed_selection_keeps_previous_rows() {
        let service = Arc::new(FakeService::new().with_rows("b-1", 40));
        let manager = manager(service.clone());
        manager.select_batch(batch("b-1")).await.unwrap();
        manager.next_page();

        service.fail(testing::FETCH);
        let err = manager.select_batch(batch("b-2")).await.unwrap_err();
        assert!(matches!(err, CliError::Fetch { .. }));

        let view = manager.snapshot();
        assert_eq!(view.status(), ViewStatus::Failed);
        assert_eq!(view.rows().len(), 40);
        assert_eq!(view.page().current_page, 1);
        assert_eq!(view.selected_batch(), Some(&batch("b-1")));

        // next action clears the failure
        service.heal(testing::FETCH);
        manager.select_batch(batch("b-1")).await.unwrap();
        assert_eq!(manager.snapshot().status(), ViewStatus::Loaded);
    }

    #[tokio::test]
    async fn test_empty_batch_renders_no_data() {
        let manager = manager(Arc::new(FakeService::new()));
        manager.select_batch(batch("empty")).await.unwrap();

        let view = manager.snapshot();
        assert_eq!(view.phase(), &Phase::Loaded);
        assert_eq!(view.status(), ViewStatus::NoData);
        assert_eq!(view.page().total_pages(), 0);
        assert!(!view.page().has_next() && !view.page().has_prev());
    }

    #[tokio::test]
    async fn test_navigation_boundaries() {
        let manager = manager(Arc::new(FakeService::new().with_rows("b-1", 1000)));
        manager.select_batch(batch("b-1")).await.unwrap();

        assert_eq!(manager.prev_page().current_page, 0);
        assert_eq!(manager.go_to_page(33).current_page, 33);
        assert_eq!(manager.next_page().current_page, 33);

        let view = manager.snapshot();
        assert_eq!(view.page().total_pages(), 34);
        assert_eq!(view.page_rows().len(), 10);
        assert_eq!(view.page_rows()[0].client_code.as_deref(), Some("C-0990"));
    }

    #[tokio::test]
    async fn test_upload_loads_rows_and_notifies() {
        let service = Arc::new(FakeService::new().with_rows("new-batch", 31));
        let manager = manager(service);
        let mut changes = manager.subscribe();

        manager.upload(spreadsheet(64)).await.unwrap();

        let view = manager.snapshot();
        assert_eq!(view.phase(), &Phase::Loaded);
        assert_eq!(view.selected_batch(), Some(&batch("new-batch")));
        assert_eq!(view.progress(), UploadProgress::COMPLETE);
        assert_eq!(view.page().total_pages(), 2);
        assert!(view.known_batches().contains(&batch("new-batch")));
        assert!(view.pending_upload().is_none());
        assert_eq!(view.last_summary().unwrap().total_records, 31);

        let mut seen = Vec::new();
        while let Ok(change) = changes.try_recv() {
            seen.push(change);
        }
        assert!(seen.contains(&ViewChange::Progress));
        assert_eq!(seen.last(), Some(&ViewChange::Rows));
    }

    #[tokio::test]
    async fn test_process_failure_keeps_batch_for_retry() {
        let service = Arc::new(FakeService::new().with_rows("new-batch", 3));
        service.fail(testing::PROCESS);
        let manager = manager(service.clone());

        let err = manager.upload(spreadsheet(10)).await.unwrap_err();
        assert_eq!(err.upload_stage(), Some(UploadStage::Process));

        let view = manager.snapshot();
        let failure = view.failure().unwrap();
        assert_eq!(failure.stage, Some(UploadStage::Process));
        assert_eq!(failure.batch_id, Some(batch("new-batch")));
        assert_eq!(
            view.pending_upload(),
            Some(&PendingUpload {
                batch_id: batch("new-batch"),
                resume_at: UploadStage::Process,
            })
        );
        assert!(view.known_batches().contains(&batch("new-batch")));

        service.heal(testing::PROCESS);
        manager.retry_upload().await.unwrap();
        let view = manager.snapshot();
        assert_eq!(view.phase(), &Phase::Loaded);
        assert_eq!(view.rows().len(), 3);
        assert_eq!(service.calls().iter().filter(|c| c.starts_with("init")).count(), 1);
    }

    #[tokio::test]
    async fn test_fetch_failure_retry_skips_processing() {
        let service = Arc::new(FakeService::new().with_rows("new-batch", 3));
        service.fail(testing::FETCH);
        let manager = manager(service.clone());

        manager.upload(spreadsheet(10)).await.unwrap_err();
        assert_eq!(
            manager.snapshot().pending_upload().map(|p| p.resume_at),
            Some(UploadStage::Fetch)
        );

        service.heal(testing::FETCH);
        manager.retry_upload().await.unwrap();
        assert_eq!(service.calls().iter().filter(|c| c.starts_with("process")).count(), 1);
        assert_eq!(manager.snapshot().rows().len(), 3);
    }

    #[tokio::test]
    async fn test_retry_without_pending_upload() {
        let manager = manager(Arc::new(FakeService::new()));
        assert!(matches!(manager.retry_upload().await, Err(CliError::Config(_))));
    }

    #[tokio::test]
    async fn test_rejected_upload_resets_progress() {
        let manager = manager(Arc::new(FakeService::new().with_rows("new-batch", 2)));
        manager.upload(spreadsheet(10)).await.unwrap();
        assert_eq!(manager.snapshot().progress(), UploadProgress::COMPLETE);

        let err = manager
            .upload(FileHandle::new("notes.txt", vec![1]))
            .await
            .unwrap_err();
        assert_eq!(err.upload_stage(), Some(UploadStage::Init));

        let view = manager.snapshot();
        assert_eq!(view.status(), ViewStatus::Failed);
        assert_eq!(view.progress(), UploadProgress::ZERO);
    }

    #[tokio::test]
    async fn test_new_upload_supersedes_interrupted_one() {
        let service = Arc::new(FakeService::new().with_rows("new-batch", 3));
        service.fail(testing::PROCESS);
        let manager = manager(service.clone());

        manager.upload(spreadsheet(10)).await.unwrap_err();
        assert!(manager.snapshot().pending_upload().is_some());

        service.heal(testing::PROCESS);
        service.fail(testing::INIT);
        let err = manager.upload(spreadsheet(10)).await.unwrap_err();
        assert_eq!(err.upload_stage(), Some(UploadStage::Init));
        assert!(manager.snapshot().pending_upload().is_none());

        let calls = service.calls().len();
        assert!(matches!(manager.retry_upload().await, Err(CliError::Config(_))));
        assert_eq!(service.calls().len(), calls);
    }

    #[test]
    fn test_failure_kind_of_lower_level_error() {
        let failure = Failure::from(&CliError::api("bad body"));
        assert_eq!(failure.kind, FailureKind::Other);
        assert_eq!(failure.batch_id, None);

        let failure = Failure::from(&CliError::fetch(batch("b-1"), "boom"));
        assert_eq!(failure.kind, FailureKind::Fetch);
        assert_eq!(failure.batch_id, Some(batch("b-1")));
    }

    #[tokio::test]
    async fn test_busy_upload_leaves_state_untouched() {
        let (service, gate) = FakeService::new().with_rows("new-batch", 2).gated();
        let manager = manager(Arc::new(service));

        let (first, second, _) = tokio::join!(
            manager.upload(spreadsheet(10)),
            async {
                tokio::task::yield_now().await;
                let busy = manager.upload(spreadsheet(10)).await;
                (busy, manager.snapshot().phase().clone())
            },
            async {
                tokio::task::yield_now().await;
                tokio::task::yield_now().await;
                gate.notify_one();
            }
        );

        assert!(first.is_ok());
        let (busy, phase_during) = second;
        assert_eq!(busy.unwrap_err().upload_stage(), Some(UploadStage::Busy));
        assert_eq!(phase_during, Phase::Uploading);
        assert_eq!(manager.snapshot().phase(), &Phase::Loaded);
    }

    #[tokio::test]
    async fn test_clear_selection() {
        let service = Arc::new(FakeService::new().with_rows("b-1", 5));
        let manager = manager(service.clone());
        manager.select_batch(batch("b-1")).await.unwrap();
        let calls = service.calls().len();

        manager.clear_selection();
        let view = manager.snapshot();
        assert!(view.selected_batch().is_none());
        assert_eq!(view.status(), ViewStatus::NoData);
        assert_eq!(service.calls().len(), calls);
    }
}
