//! HTTP API client for the batch service
//!
//! Production [`BatchService`] over `reqwest`.

use crate::api::service::{BatchService, ProgressFn};
use crate::api::{endpoints, types::*};
use crate::config::{Config, MAX_FETCH_LIMIT};
use crate::error::{CliError, Result};
use crate::file::FileHandle;
use async_trait::async_trait;
use batchview_common::{BatchId, Row};
use futures::StreamExt;
use reqwest::multipart::{Form, Part};
use reqwest::{Body, Client, Response};
use tracing::{debug, warn};

// ============================================================================
// API Client Constants
// ============================================================================

/// Bytes handed to the transport per progress notification.
pub const UPLOAD_CHUNK_SIZE: usize = 64 * 1024;

/// Multipart field carrying the spreadsheet.
const FILE_FIELD: &str = "file";

/// API client for the batch service
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the configured base URL and timeout
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client,
            base_url: config.api_url().to_string(),
        })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Pass through success responses; turn anything else into
    /// [`CliError::Status`] with the server's detail message.
    async fn check(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let detail = match serde_json::from_str::<ErrorBody>(&body) {
            Ok(error) => error.message(),
            Err(_) if body.trim().is_empty() => status
                .canonical_reason()
                .unwrap_or("no details")
                .to_string(),
            Err(_) => body,
        };

        Err(CliError::Status {
            status: status.as_u16(),
            detail,
        })
    }
}

#[async_trait]
impl BatchService for ApiClient {
    async fn list_batches(&self) -> Result<Vec<BatchEntry>> {
        let url = endpoints::batches_url(&self.base_url);

        let response = Self::check(self.client.get(&url).send().await?).await?;
        let batches: Vec<BatchEntry> = response.json().await?;

        debug!(count = batches.len(), "Fetched batch list");
        Ok(batches)
    }

    async fn init_upload(
        &self,
        file: &FileHandle,
        on_progress: ProgressFn,
    ) -> Result<UploadInitResponse> {
        let url = endpoints::init_url(&self.base_url);
        let total = file.size();

        let chunks: Vec<Vec<u8>> = file
            .bytes()
            .chunks(UPLOAD_CHUNK_SIZE)
            .map(<[u8]>::to_vec)
            .collect();

        // Each chunk counts as sent once the transport pulls it from the stream.
        let mut sent = 0u64;
        let stream = futures::stream::iter(chunks).map(move |chunk| {
            sent += chunk.len() as u64;
            on_progress(sent, total);
            Ok::<_, std::io::Error>(chunk)
        });

        let part = Part::stream_with_length(Body::wrap_stream(stream), total)
            .file_name(file.name().to_string())
            .mime_str(file.mime_type())?;
        let form = Form::new().part(FILE_FIELD, part);

        debug!(file = %file.name(), bytes = total, "Uploading file");

        let response = Self::check(self.client.post(&url).multipart(form).send().await?).await?;
        let init: UploadInitResponse = response.json().await?;

        Ok(init)
    }

    async fn process_batch(&self, batch_id: &BatchId) -> Result<Option<UploadSummary>> {
        let url = endpoints::process_url(&self.base_url, batch_id);

        let response = Self::check(self.client.post(&url).send().await?).await?;
        let body = response.text().await?;

        match serde_json::from_str::<UploadSummary>(&body) {
            Ok(summary) => Ok(Some(summary)),
            Err(e) => {
                if !body.trim().is_empty() {
                    warn!(batch_id = %batch_id, error = %e, "Unrecognized process response body");
                }
                Ok(None)
            },
        }
    }

    async fn fetch_rows(&self, batch_id: &BatchId, limit: usize) -> Result<Vec<Row>> {
        let limit = limit.clamp(1, MAX_FETCH_LIMIT);
        let url = endpoints::batch_data_url(&self.base_url, batch_id, limit);

        let response = match Self::check(self.client.get(&url).send().await?).await {
            Ok(response) => response,
            // The data endpoint answers 404 for a batch without rows.
            Err(e) if e.is_not_found() => {
                debug!(batch_id = %batch_id, "Batch has no rows");
                return Ok(Vec::new());
            },
            Err(e) => return Err(e),
        };

        let rows: Option<Vec<Row>> = response.json().await?;
        Ok(rows.unwrap_or_default())
    }

    async fn upload_status(&self, batch_id: &BatchId) -> Result<UploadStatus> {
        let url = endpoints::status_url(&self.base_url, batch_id);

        let response = Self::check(self.client.get(&url).send().await?).await?;
        Ok(response.json().await?)
    }
}
