//! Batch registry
//!
//! Retrieves the list of batches the server knows about.

use crate::api::BatchService;
use crate::error::{CliError, Result};
use batchview_common::BatchId;
use std::sync::Arc;
use tracing::{debug, warn};

/// Retrieves known batch identifiers from the batch service
pub struct BatchRegistry {
    service: Arc<dyn BatchService>,
}

impl BatchRegistry {
    pub fn new(service: Arc<dyn BatchService>) -> Self {
        Self { service }
    }

    /// One retrieval call; any failure becomes [`CliError::Registry`].
    pub async fn list_batches(&self) -> Result<Vec<BatchId>> {
        let entries = self.service.list_batches().await.map_err(|e| {
            warn!(error = %e, "Batch list retrieval failed");
            CliError::registry(e)
        })?;

        let batches: Vec<BatchId> = entries.into_iter().map(|entry| entry.batch_id).collect();
        debug!(count = batches.len(), "Batch list loaded");
        Ok(batches)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::testing::{self, FakeService};

    #[tokio::test]
    async fn test_list_batches_preserves_order() {
        let service = Arc::new(FakeService::new().with_batches(&["b-2", "b-1", "b-3"]));
        let registry = BatchRegistry::new(service.clone());

        let batches = registry.list_batches().await.unwrap();
        let ids: Vec<&str> = batches.iter().map(BatchId::as_str).collect();
        assert_eq!(ids, ["b-2", "b-1", "b-3"]);
        assert_eq!(service.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_list_batches_failure_is_registry_error() {
        let service = Arc::new(FakeService::new());
        service.fail(testing::LIST);
        let registry = BatchRegistry::new(service);

        let err = registry.list_batches().await.unwrap_err();
        assert!(matches!(err, CliError::Registry(_)));
        assert!(err.to_string().contains("list exploded"));
    }
}
