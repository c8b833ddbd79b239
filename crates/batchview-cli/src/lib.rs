//! Batchview CLI Library
//!
//! Client for a batch-ingestion service: upload a spreadsheet, let the
//! server process it into a batch, and browse the batch rows page by page.
//!
//! # Overview
//!
//! - **Batch list**: Known batches from the server (`batchview batches`)
//! - **Upload**: Send, process and load a spreadsheet (`batchview upload`)
//! - **Browse**: Show one page of a batch (`batchview show`)
//! - **Progress**: Server-side processing status (`batchview status`)
//! - **Interactive**: Menu-driven session over one view state (`batchview browse`)
//! - **Configuration**: Resolved settings (`batchview config show`)
//!
//! All commands go through [`view_state::ViewStateManager`], which owns the
//! view state and talks to the server through [`api::BatchService`].

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod file;
pub mod progress;
pub mod registry;
pub mod render;
pub mod upload;
pub mod view_state;

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
pub(crate) mod testing;

// Re-export commonly used types
pub use api::{ApiClient, BatchService};
pub use config::Config;
pub use error::{CliError, Result, UploadStage};
pub use file::FileHandle;
pub use view_state::{ViewState, ViewStateManager, ViewStatus};

use clap::{Parser, Subcommand, ValueEnum};

/// Batchview - upload spreadsheets and browse processed batches
#[derive(Parser, Debug)]
#[command(name = "batchview")]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Server URL (overrides BATCHVIEW_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the batches known to the server
    Batches,

    /// Upload a spreadsheet, process it and show its first page
    Upload {
        /// Spreadsheet to upload (.xls or .xlsx)
        file: std::path::PathBuf,

        /// Zero-based page to show once loaded
        #[arg(short, long, default_value = "0")]
        page: usize,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Show one page of a batch
    Show {
        /// Batch identifier
        batch_id: String,

        /// Zero-based page to show
        #[arg(short, long, default_value = "0")]
        page: usize,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Show server-side processing progress of a batch
    Status {
        /// Batch identifier
        batch_id: String,
    },

    /// Interactive session: select batches, upload files, page through rows
    Browse,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Configuration subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show all configuration
    Show,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}
