//! Batchview CLI - Main entry point

use batchview_cli::{Cli, Commands, Config, ConfigCommand};
use batchview_common::logging::{init_logging, LogConfig, LogLevel, LogOutput};
use clap::Parser;
use std::process;
use tracing::error;

#[tokio::main]
async fn main() {
    // .env is optional
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Normal mode only shows warnings; environment variables take precedence
    let log_config = LogConfig::builder()
        .level(if cli.verbose { LogLevel::Debug } else { LogLevel::Warn })
        .output(LogOutput::Console)
        .log_file_prefix("batchview")
        .build();
    let log_config = log_config.clone().merge_env().unwrap_or(log_config);

    // The CLI works without logging; keep the guard so file logs flush on exit
    let _guard = init_logging(&log_config).ok().flatten();

    if let Err(e) = execute_command(&cli).await {
        error!(error = %e, "Command failed");
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Execute the CLI command
async fn execute_command(cli: &Cli) -> batchview_cli::Result<()> {
    let mut config = Config::from_env()?;
    if let Some(ref url) = cli.api_url {
        config.set_api_url(url)?;
    }

    match &cli.command {
        Commands::Batches => batchview_cli::commands::batches::run(&config).await,

        Commands::Upload { file, page, format } => {
            batchview_cli::commands::upload::run(&config, file, *page, *format).await
        },

        Commands::Show {
            batch_id,
            page,
            format,
        } => batchview_cli::commands::show::run(&config, batch_id, *page, *format).await,

        Commands::Status { batch_id } => {
            batchview_cli::commands::status::run(&config, batch_id).await
        },

        Commands::Browse => batchview_cli::commands::browse::run(&config).await,

        Commands::Config { command } => match command {
            ConfigCommand::Show => batchview_cli::commands::config::show(&config),
        },
    }
}
