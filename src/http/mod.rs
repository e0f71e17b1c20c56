//! HTTP module
//!
//! `ReportClient` is the production `QueryExecutor`: it sends each query to
//! the reporting API over HTTPS, attaching the bearer token from an
//! `AuthProvider` and respecting an optional per-second query quota.

mod client;
mod rate_limit;

pub use client::{ReportClient, ReportClientConfig, ReportClientConfigBuilder};
pub use rate_limit::{RateLimiter, RateLimiterConfig};
