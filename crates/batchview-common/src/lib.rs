//! Batchview Common Library
//!
//! Shared data model, pagination and logging for the batchview workspace.
//!
//! # Overview
//!
//! - **Data model**: [`Row`], [`BatchId`] and [`UploadProgress`]
//! - **Pagination**: [`PageState`] and the pure [`pagination::page`] /
//!   [`pagination::page_count`] functions
//! - **Logging**: a `tracing` subscriber bootstrap shared by binaries
//!
//! # Example
//!
//! ```
//! use batchview_common::{pagination, PageState, Row};
//!
//! # fn main() -> batchview_common::Result<()> {
//! let rows = vec![Row::default(); 45];
//! let state = PageState::new(30, rows.len())?;
//! assert_eq!(pagination::page_count(rows.len(), 30), 2);
//!
//! let state = state.next();
//! assert_eq!(state.slice(&rows).len(), 15);
//! # Ok(())
//! # }
//! ```

#![deny(clippy::unwrap_used, clippy::expect_used)]

pub mod error;
pub mod logging;
pub mod pagination;
pub mod types;

// Re-export commonly used types
pub use error::{ModelError, Result};
pub use pagination::PageState;
pub use types::{BatchId, Row, UploadProgress};
