//! HTTP query executor for the reporting API
//!
//! Issues one `GET {endpoint}?{query}` per call with a bearer token from the
//! configured `AuthProvider`, and classifies failures:
//! - 401 means the credential was rejected (`QueryError::Unauthorized`)
//! - anything else that is not a 2xx JSON page is a `QueryError::Request`
//!
//! There are no retries; a failed request fails the whole fetch.

use super::rate_limit::{RateLimiter, RateLimiterConfig};
use crate::auth::AuthProvider;
use crate::error::{Error, Result};
use crate::feed::{Page, QueryError, QueryExecutor};
use crate::query::Query;
use crate::types::StringMap;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Configuration for the report client
#[derive(Debug, Clone)]
pub struct ReportClientConfig {
    /// Data feed endpoint URL
    pub endpoint: String,
    /// Request timeout
    pub timeout: Duration,
    /// Optional query quota
    pub rate_limit: Option<RateLimiterConfig>,
    /// Default headers for all requests
    pub default_headers: StringMap,
    /// User agent string
    pub user_agent: String,
}

impl Default for ReportClientConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            timeout: Duration::from_secs(30),
            rate_limit: None,
            default_headers: StringMap::new(),
            user_agent: format!("report-paginator/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ReportClientConfig {
    /// Create a new config builder
    pub fn builder(endpoint: impl Into<String>) -> ReportClientConfigBuilder {
        ReportClientConfigBuilder {
            config: Self {
                endpoint: endpoint.into(),
                ..Self::default()
            },
        }
    }
}

/// Builder for report client config
#[derive(Debug)]
pub struct ReportClientConfigBuilder {
    config: ReportClientConfig,
}

impl ReportClientConfigBuilder {
    /// Set the request timeout
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the query quota
    #[must_use]
    pub fn rate_limit(mut self, config: RateLimiterConfig) -> Self {
        self.config.rate_limit = Some(config);
        self
    }

    /// Add a default header
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(key.into(), value.into());
        self
    }

    /// Set user agent
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> ReportClientConfig {
        self.config
    }
}

/// Executes report queries over HTTP
pub struct ReportClient {
    client: Client,
    config: ReportClientConfig,
    auth: Arc<dyn AuthProvider>,
    rate_limiter: Option<RateLimiter>,
}

impl ReportClient {
    /// Create a client for the configured endpoint
    pub fn new(config: ReportClientConfig, auth: Arc<dyn AuthProvider>) -> Result<Self> {
        url::Url::parse(&config.endpoint)
            .map_err(|e| Error::invalid_config("endpoint", format!("{e}: '{}'", config.endpoint)))?;

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {e}")))?;

        let rate_limiter = config.rate_limit.as_ref().map(RateLimiter::new);

        Ok(Self {
            client,
            config,
            auth,
            rate_limiter,
        })
    }

    /// Get the configuration
    pub fn config(&self) -> &ReportClientConfig {
        &self.config
    }

    /// Get the auth provider
    pub fn auth(&self) -> &Arc<dyn AuthProvider> {
        &self.auth
    }

    /// Check if rate limiting is enabled
    pub fn has_rate_limiter(&self) -> bool {
        self.rate_limiter.is_some()
    }
}

#[async_trait]
impl QueryExecutor for ReportClient {
    async fn execute(&self, query: &Query) -> std::result::Result<Page, QueryError> {
        if let Some(ref limiter) = self.rate_limiter {
            limiter.wait().await;
        }

        let token = self
            .auth
            .token()
            .await
            .map_err(|e| QueryError::unauthorized(e.to_string()))?;

        let mut req = self
            .client
            .get(&self.config.endpoint)
            .query(&query.iter().collect::<Vec<_>>())
            .bearer_auth(token);
        for (key, value) in &self.config.default_headers {
            req = req.header(key.as_str(), value.as_str());
        }

        let response = req.send().await.map_err(|e| {
            if e.is_timeout() {
                QueryError::request(format!(
                    "Request timeout after {}ms",
                    self.config.timeout.as_millis()
                ))
            } else {
                QueryError::request(format!("HTTP request failed: {e}"))
            }
        })?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            let body = response.text().await.unwrap_or_default();
            warn!("Server rejected credential: {body}");
            return Err(QueryError::unauthorized(if body.is_empty() {
                "HTTP 401".to_string()
            } else {
                body
            }));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(QueryError::status(status.as_u16(), body));
        }

        let page: Page = response
            .json()
            .await
            .map_err(|e| QueryError::request(format!("Failed to decode response: {e}")))?;

        debug!(
            "Received {} entries (total_results {})",
            page.len(),
            page.total_results
        );
        Ok(page)
    }
}

impl std::fmt::Debug for ReportClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReportClient")
            .field("config", &self.config)
            .field("has_rate_limiter", &self.rate_limiter.is_some())
            .finish_non_exhaustive()
    }
}
