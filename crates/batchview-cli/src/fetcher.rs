//! Row retrieval for a selected batch
//!
//! A single bounded call per selection. Pagination happens client-side over
//! whatever this returns.

use crate::api::BatchService;
use crate::config::MAX_FETCH_LIMIT;
use crate::error::{CliError, Result};
use batchview_common::{BatchId, Row};
use std::sync::Arc;
use tracing::{debug, warn};

/// Retrieves the row set of a batch
pub struct DataFetcher {
    service: Arc<dyn BatchService>,
}

impl DataFetcher {
    pub fn new(service: Arc<dyn BatchService>) -> Self {
        Self { service }
    }

    /// Up to `limit` rows (capped at [`MAX_FETCH_LIMIT`]) in server order.
    /// Any failure becomes [`CliError::Fetch`].
    pub async fn fetch_rows(&self, batch_id: &BatchId, limit: usize) -> Result<Vec<Row>> {
        let limit = limit.clamp(1, MAX_FETCH_LIMIT);

        let rows = self.service.fetch_rows(batch_id, limit).await.map_err(|e| {
            warn!(batch_id = %batch_id, error = %e, "Row retrieval failed");
            CliError::fetch(batch_id.clone(), e)
        })?;

        debug!(batch_id = %batch_id, rows = rows.len(), limit, "Rows retrieved");
        Ok(rows)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::testing::{self, batch, FakeService};

    #[tokio::test]
    async fn test_fetch_rows_respects_limit() {
        let service = Arc::new(FakeService::new().with_rows("b-1", 40));
        let fetcher = DataFetcher::new(service.clone());

        let rows = fetcher.fetch_rows(&batch("b-1"), 25).await.unwrap();
        assert_eq!(rows.len(), 25);
        assert_eq!(rows[0].client_code.as_deref(), Some("C-0000"));
    }

    #[tokio::test]
    async fn test_limit_is_clamped() {
        let service = Arc::new(FakeService::new().with_rows("b-1", 3));
        let fetcher = DataFetcher::new(service.clone());

        fetcher.fetch_rows(&batch("b-1"), 50_000).await.unwrap();
        fetcher.fetch_rows(&batch("b-1"), 0).await.unwrap();
        assert_eq!(service.calls(), ["fetch b-1 1000", "fetch b-1 1"]);
    }

    #[tokio::test]
    async fn test_empty_batch_is_not_an_error() {
        let fetcher = DataFetcher::new(Arc::new(FakeService::new()));
        assert!(fetcher.fetch_rows(&batch("empty"), 1000).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failure_is_fetch_error() {
        let service = Arc::new(FakeService::new());
        service.fail(testing::FETCH);
        let fetcher = DataFetcher::new(service);

        match fetcher.fetch_rows(&batch("b-9"), 10).await.unwrap_err() {
            CliError::Fetch { batch_id, message } => {
                assert_eq!(batch_id.as_str(), "b-9");
                assert!(message.contains("500"));
            },
            other => panic!("unexpected error: {other}"),
        }
    }
}
