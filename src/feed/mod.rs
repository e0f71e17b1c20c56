//! Report feed module
//!
//! Response types returned by the reporting API and the narrow
//! `QueryExecutor` interface the paginator drives.
//!
//! # Overview
//!
//! - `Page` - one bounded response: entries plus the server's total count
//! - `Entry` - one result row (dimensions and metrics)
//! - `QueryExecutor` - executes a single query, returning one page

mod executor;
mod types;

pub use executor::{QueryError, QueryExecutor};
pub use types::{Entry, Field, Page};
