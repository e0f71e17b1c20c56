//! # report-paginator
//!
//! Fetch complete result sets from reporting APIs that cap every response
//! at a fixed number of rows, and present them as if one unbounded request
//! had been made.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use report_paginator::{
//!     AuthProvider, PageBudget, Paginator, Query, ReportClient, ReportClientConfig, Result,
//!     StaticToken,
//! };
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let auth: Arc<dyn AuthProvider> = Arc::new(StaticToken::new("ya29..."));
//!     let config = ReportClientConfig::builder("https://reports.example.com/feeds/data").build();
//!     let paginator = Paginator::new(ReportClient::new(config, auth)?);
//!
//!     let mut query = Query::for_ids("ga:12345")
//!         .date_range("2010-10-01", "2010-10-30")
//!         .dimensions("ga:source,ga:medium,ga:keyword")
//!         .metrics("ga:visits")
//!         .sort("-ga:visits");
//!
//!     let feed = paginator.fetch_all(&mut query, PageBudget::All).await?;
//!     println!("{} rows", feed.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │ Paginator: fetch_all(query, budget) → Page               │
//! │  first request → total → offsets → sequential requests   │
//! └──────────────────────────┬───────────────────────────────┘
//!                            │ QueryExecutor
//!              ┌─────────────┴─────────────┐
//!              │ ReportClient (reqwest)    │──── AuthProvider
//!              │ timeout, query quota      │     StaticToken / TokenFile
//!              └───────────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Report query parameters
pub mod query;

/// Response pages and the query executor interface
pub mod feed;

/// Pagination controller
pub mod pagination;

/// Credential providers
pub mod auth;

/// HTTP query executor
pub mod http;

/// Delimited text output
pub mod output;

/// Client configuration file
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use auth::{AuthProvider, StaticToken, TokenFile};
pub use config::Config;
pub use error::{Error, Result};
pub use feed::{Entry, Field, Page, QueryError, QueryExecutor};
pub use http::{ReportClient, ReportClientConfig};
pub use output::{Delimiter, FeedPrinter};
pub use pagination::{PageBudget, PaginationState, Paginator, PaginatorConfig};
pub use query::Query;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
