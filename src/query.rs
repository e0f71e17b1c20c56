//! Report query parameters
//!
//! A `Query` is a free-form mapping of parameter names to string values.
//! Two keys have a meaning the paginator relies on:
//!
//! - `start-index`: 1-based offset of the first row, a positive integer
//!   (defaults to 1 when absent)
//! - `max-results`: rows per request, a positive integer
//!
//! Every other key is passed through to the server untouched.

use crate::error::{Error, Result};
use std::collections::BTreeMap;
use std::fmt;

/// Query parameter holding the 1-based offset of the first row
pub const START_INDEX: &str = "start-index";

/// Query parameter holding the page size
pub const MAX_RESULTS: &str = "max-results";

/// Start index the server assumes when `start-index` is absent
pub const DEFAULT_START_INDEX: u64 = 1;

/// Mutable set of report query parameters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    params: BTreeMap<String, String>,
}

impl Query {
    /// Create an empty query
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a query for the given table/profile ids (e.g. `ga:12345`)
    pub fn for_ids(ids: impl Into<String>) -> Self {
        Self::new().param("ids", ids)
    }

    /// Add a parameter
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Set the reporting date range (inclusive, `YYYY-MM-DD`)
    #[must_use]
    pub fn date_range(self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.param("start-date", start).param("end-date", end)
    }

    /// Set the comma-separated dimension selectors
    #[must_use]
    pub fn dimensions(self, dimensions: impl Into<String>) -> Self {
        self.param("dimensions", dimensions)
    }

    /// Set the comma-separated metric selectors
    #[must_use]
    pub fn metrics(self, metrics: impl Into<String>) -> Self {
        self.param("metrics", metrics)
    }

    /// Set the sort order (prefix a field with `-` for descending)
    #[must_use]
    pub fn sort(self, sort: impl Into<String>) -> Self {
        self.param("sort", sort)
    }

    /// Set the row filter expression
    #[must_use]
    pub fn filters(self, filters: impl Into<String>) -> Self {
        self.param("filters", filters)
    }

    /// Set the first row to fetch
    #[must_use]
    pub fn starting_at(mut self, start_index: u64) -> Self {
        self.set_start_index(start_index);
        self
    }

    /// Set or replace a parameter
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.params.insert(key.into(), value.into());
    }

    /// Get a parameter value
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Remove a parameter, returning its previous value
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.params.remove(key)
    }

    /// Iterate parameters in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of parameters
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Whether no parameters are set
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// The 1-based start index, or [`DEFAULT_START_INDEX`] when absent or blank
    pub fn start_index(&self) -> Result<u64> {
        match self.get(START_INDEX).map(str::trim) {
            None | Some("") => Ok(DEFAULT_START_INDEX),
            Some(raw) => {
                let start_index = parse_positive(START_INDEX, raw)?;
                if i64::try_from(start_index).is_err() {
                    return Err(Error::invalid_param(
                        START_INDEX,
                        format!("{raw} exceeds the largest supported start index"),
                    ));
                }
                Ok(start_index)
            }
        }
    }

    /// Set the start index
    pub fn set_start_index(&mut self, start_index: u64) {
        self.set(START_INDEX, start_index.to_string());
    }

    /// The page size, if one has been set
    pub fn max_results(&self) -> Result<Option<u64>> {
        self.get(MAX_RESULTS)
            .map(|raw| parse_positive(MAX_RESULTS, raw.trim()))
            .transpose()
    }

    /// Set the page size
    pub fn set_max_results(&mut self, max_results: u32) {
        self.set(MAX_RESULTS, max_results.to_string());
    }

    /// Render as an URL-encoded query string (without the leading `?`)
    pub fn to_query_string(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.iter())
            .finish()
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_string())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Query {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            params: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

fn parse_positive(key: &str, raw: &str) -> Result<u64> {
    match raw.parse::<u64>() {
        Ok(0) | Err(_) => Err(Error::invalid_param(
            key,
            format!("expected a positive integer, found '{raw}'"),
        )),
        Ok(value) => Ok(value),
    }
}
