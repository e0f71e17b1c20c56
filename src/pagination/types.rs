//! Pagination types
//!
//! Page budgets, paginator configuration and the per-run pagination state.

use crate::error::{Error, Result};
use std::fmt;
use std::num::NonZeroU64;

/// Maximum rows the reporting API returns for a single request
pub const DEFAULT_PAGE_SIZE: u32 = 10_000;

/// Raw page budget value meaning "fetch every available page"
pub const ALL_PAGES: i64 = -1;

/// How many pages a fetch may issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageBudget {
    /// Fetch every page the server reports
    #[default]
    All,
    /// Fetch at most this many pages
    Pages(NonZeroU64),
}

impl PageBudget {
    /// Cap the fetch at `pages` pages
    pub fn pages(pages: u64) -> Result<Self> {
        NonZeroU64::new(pages)
            .map(Self::Pages)
            .ok_or(Error::InvalidPageBudget { value: 0 })
    }

    /// Check if this is the "all pages" sentinel
    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

impl TryFrom<i64> for PageBudget {
    type Error = Error;

    /// `-1` fetches everything, positive values cap the page count
    fn try_from(value: i64) -> Result<Self> {
        match value {
            ALL_PAGES => Ok(Self::All),
            n if n > 0 => Self::pages(n as u64),
            n => Err(Error::InvalidPageBudget { value: n }),
        }
    }
}

impl fmt::Display for PageBudget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Pages(n) => write!(f, "{n}"),
        }
    }
}

/// Configuration for the paginator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginatorConfig {
    /// Rows requested per page (`max-results`)
    pub page_size: u32,
}

impl Default for PaginatorConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PaginatorConfig {
    /// Create a config with the given page size
    pub fn with_page_size(page_size: u32) -> Result<Self> {
        if page_size == 0 {
            return Err(Error::invalid_config("page_size", "must be greater than 0"));
        }
        Ok(Self { page_size })
    }
}

/// Pagination plan derived from the first response of a fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PaginationState {
    /// 1-based offset of the first requested row
    pub start_index: u64,
    /// Matching rows from `start_index` onward (negative if the server
    /// reported fewer rows than `start_index - 1`)
    pub total_results: i64,
    /// Pages needed to cover `total_results`
    pub max_pages: u64,
    /// Pages actually fetched, never more than `max_pages`
    pub num_pages: u64,
}

impl PaginationState {
    /// Number of requests issued for this plan, including the first
    pub fn requests(&self) -> u64 {
        self.num_pages.max(1)
    }

    /// Check if the budget stopped the fetch before the last page
    pub fn is_truncated(&self) -> bool {
        self.num_pages < self.max_pages
    }
}
