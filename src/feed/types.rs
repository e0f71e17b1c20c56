//! Feed response types
//!
//! Wire shape of a single response:
//!
//! ```json
//! {
//!   "total_results": "20000",
//!   "entries": [
//!     {
//!       "dimensions": [{"name": "ga:source", "value": "google"}],
//!       "metrics": [{"name": "ga:visits", "value": "512"}]
//!     }
//!   ]
//! }
//! ```
//!
//! Any other top-level fields are kept in `Page::metadata`.

use crate::types::{JsonObject, JsonValue};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// A named value within an entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// Field name (e.g. `ga:source`)
    pub name: String,
    /// Field value as rendered by the server
    pub value: String,
}

impl Field {
    /// Create a new field
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// One row of report data
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Dimension values, in query order
    #[serde(default, alias = "dimension")]
    pub dimensions: Vec<Field>,
    /// Metric values, in query order
    #[serde(default, alias = "metric")]
    pub metrics: Vec<Field>,
}

impl Entry {
    /// Create an empty entry
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a dimension value
    #[must_use]
    pub fn dimension(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.dimensions.push(Field::new(name, value));
        self
    }

    /// Add a metric value
    #[must_use]
    pub fn metric(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.metrics.push(Field::new(name, value));
        self
    }

    /// All fields, dimensions first
    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.dimensions.iter().chain(self.metrics.iter())
    }

    /// Field names, dimensions first
    pub fn field_names(&self) -> Vec<&str> {
        self.fields().map(|f| f.name.as_str()).collect()
    }

    /// Field values, dimensions first
    pub fn field_values(&self) -> Vec<&str> {
        self.fields().map(|f| f.value.as_str()).collect()
    }
}

/// A single bounded response from the reporting API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Server count of all matching rows, independent of the page window
    #[serde(alias = "totalResults", deserialize_with = "string_or_number")]
    pub total_results: String,
    /// Rows in this page, in server order
    #[serde(default, alias = "entry")]
    pub entries: Vec<Entry>,
    /// Remaining response fields, passed through untouched
    #[serde(flatten)]
    pub metadata: JsonObject,
}

impl Page {
    /// Create a page with the given total and entries
    pub fn new(total_results: impl Into<String>, entries: Vec<Entry>) -> Self {
        Self {
            total_results: total_results.into(),
            entries,
            metadata: JsonObject::new(),
        }
    }

    /// Number of entries in this page
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the page has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append another page's entries to this one
    pub fn extend(&mut self, other: Page) {
        self.entries.extend(other.entries);
    }
}

/// Accept the total either as a JSON string or a bare number
fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match JsonValue::deserialize(deserializer)? {
        JsonValue::String(s) => Ok(s),
        JsonValue::Number(n) => Ok(n.to_string()),
        other => Err(D::Error::custom(format!(
            "total_results must be a string or number, found {other}"
        ))),
    }
}
