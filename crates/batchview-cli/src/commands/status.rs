//! `batchview status` command implementation
//!
//! Shows server-side processing progress of a batch.

use crate::api::{ApiClient, BatchService};
use crate::config::Config;
use crate::error::Result;
use crate::render::render_status;
use batchview_common::BatchId;

pub async fn run(config: &Config, batch_id: &str) -> Result<()> {
    let batch_id = BatchId::new(batch_id)?;
    let client = ApiClient::new(config)?;

    let status = client.upload_status(&batch_id).await?;
    println!("{}", render_status(&status));

    Ok(())
}
