//! Client configuration file
//!
//! Describes where the reporting API lives and how to talk to it, loaded
//! from YAML (`.yaml`/`.yml`) or JSON (anything else).
//!
//! ```yaml
//! endpoint: https://reports.example.com/feeds/data
//! page_size: 10000
//! timeout_seconds: 30
//! token_file: /home/me/.report_token.json
//! rate_limit:
//!   requests_per_second: 10
//!   burst_size: 10
//! headers:
//!   X-Trace: "on"
//! ```

use crate::error::{Error, Result, ResultExt};
use crate::http::{RateLimiterConfig, ReportClientConfig};
use crate::pagination::{PaginatorConfig, DEFAULT_PAGE_SIZE};
use crate::types::StringMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Complete client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Data feed endpoint URL
    pub endpoint: String,

    /// Rows requested per page
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// User agent sent with every request
    #[serde(default)]
    pub user_agent: Option<String>,

    /// File holding the persisted access token
    #[serde(default)]
    pub token_file: Option<PathBuf>,

    /// Query quota
    #[serde(default)]
    pub rate_limit: Option<RateLimiterConfig>,

    /// Extra headers for every request
    #[serde(default)]
    pub headers: StringMap,
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

fn default_timeout_seconds() -> u64 {
    30
}

impl Config {
    /// Create a config for an endpoint with default settings
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            page_size: default_page_size(),
            timeout_seconds: default_timeout_seconds(),
            user_agent: None,
            token_file: None,
            rate_limit: None,
            headers: StringMap::new(),
        }
    }

    /// Load and validate a config file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::config(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let is_yaml = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"));
        if is_yaml {
            Self::from_yaml(&contents)
        } else {
            Self::from_json(&contents)
        }
    }

    /// Parse and validate YAML
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check field values
    pub fn validate(&self) -> Result<()> {
        if self.endpoint.trim().is_empty() {
            return Err(Error::invalid_config("endpoint", "must not be empty"));
        }
        url::Url::parse(&self.endpoint)
            .map_err(|e| Error::invalid_config("endpoint", e.to_string()))?;
        if self.page_size == 0 {
            return Err(Error::invalid_config("page_size", "must be greater than 0"));
        }
        if self.timeout_seconds == 0 {
            return Err(Error::invalid_config(
                "timeout_seconds",
                "must be greater than 0",
            ));
        }
        if let Some(rate_limit) = &self.rate_limit {
            if rate_limit.requests_per_second == 0 {
                return Err(Error::invalid_config(
                    "rate_limit.requests_per_second",
                    "must be greater than 0",
                ));
            }
        }
        Ok(())
    }

    /// Paginator settings
    pub fn paginator_config(&self) -> Result<PaginatorConfig> {
        PaginatorConfig::with_page_size(self.page_size)
    }

    /// HTTP client settings
    pub fn client_config(&self) -> ReportClientConfig {
        let mut builder = ReportClientConfig::builder(&self.endpoint)
            .timeout(Duration::from_secs(self.timeout_seconds));
        if let Some(agent) = &self.user_agent {
            builder = builder.user_agent(agent);
        }
        if let Some(rate_limit) = self.rate_limit {
            builder = builder.rate_limit(rate_limit);
        }
        for (key, value) in &self.headers {
            builder = builder.header(key, value);
        }
        builder.build()
    }
}
