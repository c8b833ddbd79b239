//! `batchview show` command implementation
//!
//! Loads one batch and prints a single page of it.

use crate::config::Config;
use crate::error::Result;
use crate::OutputFormat;
use batchview_common::BatchId;

pub async fn run(config: &Config, batch_id: &str, page: usize, format: OutputFormat) -> Result<()> {
    let batch_id = BatchId::new(batch_id)?;
    let manager = super::connect(config)?;

    manager.select_batch(batch_id).await?;
    manager.go_to_page(page);

    super::print_page(&manager.snapshot(), format)
}
