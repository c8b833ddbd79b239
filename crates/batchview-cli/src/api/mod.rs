//! API client module
//!
//! HTTP client for the collaborator service, and the [`BatchService`] seam the
//! components are written against.

pub mod client;
pub mod endpoints;
pub mod service;
pub mod types;

pub use client::ApiClient;
pub use service::{BatchService, ProgressFn};
pub use types::*;
