//! `batchview config` command implementation

use crate::config::Config;
use crate::error::Result;
use crate::progress::format_bytes;
use colored::Colorize;

/// Show all configuration
pub fn show(config: &Config) -> Result<()> {
    println!("{}", "Batchview Configuration:".cyan().bold());
    println!();
    println!("{:<18} {}", "api_url:", config.api_url());
    println!("{:<18} {}s", "timeout:", config.timeout.as_secs());
    println!(
        "{:<18} {}",
        "max_upload_bytes:",
        format_bytes(config.max_upload_bytes)
    );
    println!("{:<18} {}", "rows_per_page:", config.rows_per_page);
    println!("{:<18} {}", "fetch_limit:", config.fetch_limit);
    println!();
    println!("{}", "Environment Variables:".cyan());
    println!("  BATCHVIEW_API_URL           - Server URL");
    println!("  BATCHVIEW_API_TIMEOUT_SECS  - Per-request timeout");
    println!("  BATCHVIEW_MAX_UPLOAD_BYTES  - Largest accepted file");
    println!("  BATCHVIEW_ROWS_PER_PAGE     - Rows per page");
    println!("  BATCHVIEW_FETCH_LIMIT       - Rows loaded per batch (1-1000)");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_show() {
        assert!(show(&Config::default()).is_ok());
    }
}
