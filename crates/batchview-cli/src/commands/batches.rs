//! `batchview batches` command implementation

use crate::config::Config;
use crate::error::Result;
use colored::Colorize;

/// List the batches known to the server
pub async fn run(config: &Config) -> Result<()> {
    let manager = super::connect(config)?;
    manager.startup().await?;

    let view = manager.snapshot();
    let batches = view.known_batches();

    if batches.is_empty() {
        println!("No batches found.");
        println!("Run 'batchview upload <FILE>' to create one.");
        return Ok(());
    }

    println!("{}", "Batches:".cyan().bold());
    for batch_id in batches {
        println!("  {}", batch_id);
    }
    println!();
    println!("Total: {}", batches.len());

    Ok(())
}
