//! `batchview upload` command implementation
//!
//! Sends a spreadsheet, waits for processing and prints the first page.

use crate::config::Config;
use crate::error::Result;
use crate::file::FileHandle;
use crate::progress::{create_spinner, create_upload_progress};
use crate::render::render_summary;
use crate::view_state::{Phase, ViewChange, ViewStateManager};
use crate::OutputFormat;
use indicatif::ProgressBar;
use std::path::Path;
use tokio::sync::broadcast::error::RecvError;

pub async fn run(config: &Config, path: &Path, page: usize, format: OutputFormat) -> Result<()> {
    let file = FileHandle::open(path).await?;
    let manager = super::connect(config)?;

    upload_with_progress(&manager, file).await?;

    let view = manager.snapshot();
    if let (OutputFormat::Table, Some(summary)) = (format, view.last_summary()) {
        println!("{}", render_summary(summary));
    }

    manager.go_to_page(page);
    super::print_page(&manager.snapshot(), format)
}

/// Run an upload while mirroring its progress on the terminal
pub(crate) async fn upload_with_progress(manager: &ViewStateManager, file: FileHandle) -> Result<()> {
    let mut changes = manager.subscribe();
    let bar = create_upload_progress(file.name());
    let mut spinner: Option<ProgressBar> = None;

    let upload = manager.upload(file);
    tokio::pin!(upload);

    let result = loop {
        tokio::select! {
            result = &mut upload => break result,
            change = changes.recv() => match change {
                Ok(ViewChange::Progress) => {
                    bar.set_position(u64::from(manager.snapshot().progress().percent()));
                },
                Ok(ViewChange::Phase) => {
                    if spinner.is_none() && *manager.snapshot().phase() == Phase::Processing {
                        bar.finish_and_clear();
                        spinner = Some(create_spinner("Processing batch..."));
                    }
                },
                Ok(_) | Err(RecvError::Lagged(_)) => {},
                Err(RecvError::Closed) => break (&mut upload).await,
            },
        }
    };

    bar.finish_and_clear();
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
    result
}
