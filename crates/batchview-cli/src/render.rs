//! Terminal rendering of the view state
//!
//! Three situations render differently: no data yet (or an empty batch), a
//! failed last operation, and loaded rows. Missing field values show as `-`.

use crate::api::{UploadStatus, UploadSummary};
use crate::view_state::{ViewState, ViewStatus};
use batchview_common::types::RowField;
use batchview_common::{BatchId, Row};
use colored::Colorize;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Table};
use serde::Serialize;
use std::fmt::Write;

/// Label of the empty choice in batch selectors
pub const NO_SELECTION: &str = "-- select a batch --";

/// Rows as a table with one column per displayable field
pub fn rows_table(rows: &[Row]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(RowField::ALL.iter().map(|f| f.label()));

    for row in rows {
        table.add_row(row.cells());
    }

    table
}

/// "Page 2 of 34", or nothing to page through
pub fn page_footer(view: &ViewState) -> String {
    let page = view.page();
    if page.total_pages() == 0 {
        return "No pages".to_string();
    }

    let mut footer = format!(
        "Page {} of {} ({} rows)",
        page.current_page + 1,
        page.total_pages(),
        page.total_rows
    );
    if !page.has_prev() {
        footer.push_str(" · first page");
    }
    if !page.has_next() {
        footer.push_str(" · last page");
    }
    footer
}

/// Full text rendering of the current page
pub fn render_view(view: &ViewState) -> String {
    let mut out = String::new();

    match view.status() {
        ViewStatus::Failed => {
            if let Some(failure) = view.failure() {
                let _ = writeln!(out, "{} {}", "✗".red(), failure.message);
            }
            if !view.rows().is_empty() {
                let _ = writeln!(out, "Showing the previously loaded rows.");
                render_rows(&mut out, view);
            }
        },
        ViewStatus::NoData => {
            let message = match view.selected_batch() {
                Some(batch_id) => format!("Batch '{}' has no rows.", batch_id),
                None => "No data loaded yet.".to_string(),
            };
            let _ = writeln!(out, "{}", message.dimmed());
        },
        ViewStatus::Loaded => render_rows(&mut out, view),
    }

    out
}

fn render_rows(out: &mut String, view: &ViewState) {
    if let Some(batch_id) = view.selected_batch() {
        let _ = writeln!(out, "{} {}", "Batch".bold(), batch_id.to_string().cyan());
    }
    let _ = writeln!(out, "{}", rows_table(view.page_rows()));
    let _ = writeln!(out, "{}", page_footer(view));
}

/// Batch selector lines; the first entry is always the empty choice
pub fn batch_choices(batches: &[BatchId]) -> Vec<String> {
    std::iter::once(NO_SELECTION.to_string())
        .chain(batches.iter().map(BatchId::to_string))
        .collect()
}

pub fn render_summary(summary: &UploadSummary) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS);

    table.add_row(vec!["Batch".to_string(), summary.batch_id.to_string()]);
    if let Some(ref filename) = summary.filename {
        table.add_row(vec!["File".to_string(), filename.clone()]);
    }
    table.add_row(vec!["Status".to_string(), summary.status.clone()]);
    table.add_row(vec!["Records".to_string(), summary.total_records.to_string()]);
    table.add_row(vec!["Accepted".to_string(), summary.successful_records.to_string()]);
    table.add_row(vec!["Rejected".to_string(), summary.failed_records.to_string()]);
    if let Some(seconds) = summary.duration_seconds {
        table.add_row(vec!["Duration".to_string(), format!("{:.2}s", seconds)]);
    }
    if let Some(at) = summary.completed_at() {
        table.add_row(vec!["Completed".to_string(), at.to_rfc3339()]);
    }

    table.to_string()
}

pub fn render_status(status: &UploadStatus) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS);

    table.add_row(vec!["Batch".to_string(), status.batch_id.to_string()]);
    table.add_row(vec!["Status".to_string(), status.status.clone()]);
    table.add_row(vec![
        "Progress".to_string(),
        format!("{}/{} ({:.2}%)", status.processed, status.total, status.percentage),
    ]);
    table.add_row(vec!["Accepted".to_string(), status.successful.to_string()]);
    table.add_row(vec!["Rejected".to_string(), status.failed.to_string()]);
    if let Some(speed) = status.speed {
        table.add_row(vec!["Speed".to_string(), format!("{:.2} records/s", speed)]);
    }
    if let Some(eta) = status.estimated_time_remaining {
        table.add_row(vec!["Remaining".to_string(), format!("{:.0}s", eta)]);
    }

    table.to_string()
}

/// JSON document for `--format json`
#[derive(Debug, Serialize)]
pub struct PageDocument<'a> {
    pub batch_id: Option<&'a BatchId>,
    pub page: usize,
    pub total_pages: usize,
    pub total_rows: usize,
    pub rows: &'a [Row],
}

impl<'a> PageDocument<'a> {
    pub fn new(view: &'a ViewState) -> Self {
        let page = view.page();
        Self {
            batch_id: view.selected_batch(),
            page: page.current_page,
            total_pages: page.total_pages(),
            total_rows: page.total_rows,
            rows: view.page_rows(),
        }
    }
}
