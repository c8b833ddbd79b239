//! Client-side pagination over a retrieved row set
//!
//! All rows of a batch are fetched in one call; pages are slices of that
//! in-memory set. [`page`] and [`page_count`] are pure and never panic on an
//! out-of-range index or a zero page size.

use crate::error::{ModelError, Result};
use serde::Serialize;

/// Rows shown per page unless configured otherwise.
pub const DEFAULT_ROWS_PER_PAGE: usize = 30;

/// Slice `rows[index * page_size .. (index + 1) * page_size]`, clamped to the
/// available length. Out-of-range pages are empty.
pub fn page<T>(rows: &[T], page_size: usize, index: usize) -> &[T] {
    if page_size == 0 {
        return &[];
    }
    let Some(start) = index.checked_mul(page_size) else {
        return &[];
    };
    if start >= rows.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(rows.len());
    &rows[start..end]
}

/// `ceil(total_rows / page_size)`, 0 for an empty set.
pub fn page_count(total_rows: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total_rows.div_ceil(page_size)
}

/// Current page position over a row set of known size.
///
/// Invariant: `current_page <= max(total_pages() - 1, 0)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageState {
    pub current_page: usize,
    pub rows_per_page: usize,
    pub total_rows: usize,
}

impl PageState {
    /// Start at page 0 of `total_rows` rows
    pub fn new(rows_per_page: usize, total_rows: usize) -> Result<Self> {
        if rows_per_page == 0 {
            return Err(ModelError::ZeroPageSize);
        }
        Ok(Self {
            current_page: 0,
            rows_per_page,
            total_rows,
        })
    }

    pub fn total_pages(&self) -> usize {
        page_count(self.total_rows, self.rows_per_page)
    }

    fn last_page(&self) -> usize {
        self.total_pages().saturating_sub(1)
    }

    /// Same page size over a new row count, back at page 0.
    pub fn reset(self, total_rows: usize) -> Self {
        Self {
            current_page: 0,
            total_rows,
            ..self
        }
    }

    /// Move to `index`, clamped into range.
    pub fn go_to(self, index: usize) -> Self {
        Self {
            current_page: index.min(self.last_page()),
            ..self
        }
    }

    /// Next page; unchanged on the last page.
    pub fn next(self) -> Self {
        self.go_to(self.current_page.saturating_add(1))
    }

    /// Previous page; unchanged on page 0.
    pub fn prev(self) -> Self {
        self.go_to(self.current_page.saturating_sub(1))
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.last_page()
    }

    pub fn has_prev(&self) -> bool {
        self.current_page > 0
    }

    /// Rows of the current page
    pub fn slice<'a, T>(&self, rows: &'a [T]) -> &'a [T] {
        page(rows, self.rows_per_page, self.current_page)
    }
}
