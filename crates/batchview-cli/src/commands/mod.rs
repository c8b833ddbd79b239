//! CLI command implementations
//!
//! Each subcommand has its own module with a `run` function. All of them
//! work through a [`ViewStateManager`] backed by the HTTP client.

pub mod batches;
pub mod browse;
pub mod config;
pub mod show;
pub mod status;
pub mod upload;

use crate::api::ApiClient;
use crate::config::Config;
use crate::error::Result;
use crate::render::{render_view, PageDocument};
use crate::view_state::{ViewState, ViewStateManager};
use crate::OutputFormat;
use std::sync::Arc;

/// View state manager talking to the configured server
pub(crate) fn connect(config: &Config) -> Result<ViewStateManager> {
    let client = ApiClient::new(config)?;
    ViewStateManager::new(Arc::new(client), config)
}

/// Print the current page in the requested format
pub(crate) fn print_page(view: &ViewState, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => print!("{}", render_view(view)),
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&PageDocument::new(view))?);
        },
    }
    Ok(())
}
