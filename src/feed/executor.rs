//! Query executor interface
//!
//! The paginator never talks to the network directly; it hands each query
//! to a `QueryExecutor` and receives a single `Page` back.

use super::types::Page;
use crate::query::Query;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Failure of a single query execution
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// The credential is no longer valid and should be discarded
    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    /// Transport, validation or server failure
    #[error("Request failed: {message}")]
    Request {
        message: String,
        /// HTTP status, when the server answered
        status: Option<u16>,
    },
}

impl QueryError {
    /// Create an unauthorized error
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    /// Create a request error without a status
    pub fn request(message: impl Into<String>) -> Self {
        Self::Request {
            message: message.into(),
            status: None,
        }
    }

    /// Create a request error for an HTTP status
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self::Request {
            message: format!("HTTP {status}: {}", body.into()),
            status: Some(status),
        }
    }

    /// Check if the credential was rejected
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }
}

/// Executes one report query and returns one page of results
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    /// Execute the query as given
    async fn execute(&self, query: &Query) -> Result<Page, QueryError>;
}

#[async_trait]
impl<T: QueryExecutor + ?Sized> QueryExecutor for Arc<T> {
    async fn execute(&self, query: &Query) -> Result<Page, QueryError> {
        (**self).execute(query).await
    }
}

#[async_trait]
impl<T: QueryExecutor + ?Sized> QueryExecutor for &T {
    async fn execute(&self, query: &Query) -> Result<Page, QueryError> {
        (**self).execute(query).await
    }
}
