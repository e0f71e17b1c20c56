//! Paginator implementation
//!
//! Turns one "fetch everything matching this query" request into the
//! minimum sequence of page-sized requests and merges the pages.

use super::plan::{max_pages, page_offset_iter, remaining_total, resolve_page_count};
use super::types::{PageBudget, PaginationState, PaginatorConfig};
use crate::error::{Error, Result};
use crate::feed::{Page, QueryExecutor};
use crate::query::Query;
use tracing::{debug, info, warn};

/// Fetches every page of a report query and merges them into one `Page`
#[derive(Debug, Clone)]
pub struct Paginator<E> {
    executor: E,
    config: PaginatorConfig,
}

impl<E: QueryExecutor> Paginator<E> {
    /// Create a paginator using the default page size
    pub fn new(executor: E) -> Self {
        Self::with_config(executor, PaginatorConfig::default())
    }

    /// Create a paginator with custom configuration
    pub fn with_config(executor: E, config: PaginatorConfig) -> Self {
        Self { executor, config }
    }

    /// Get the configuration
    pub fn config(&self) -> &PaginatorConfig {
        &self.config
    }

    /// Get the underlying executor
    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Fetch up to `budget` pages and return them as a single page.
    ///
    /// `query.max-results` is overwritten with the page size and
    /// `query.start-index` is left at the offset of the last page fetched.
    /// Any executor failure aborts the whole fetch.
    pub async fn fetch_all(&self, query: &mut Query, budget: PageBudget) -> Result<Page> {
        self.fetch_all_with_state(query, budget)
            .await
            .map(|(page, _)| page)
    }

    /// Like [`fetch_all`](Self::fetch_all), validating a raw page budget
    /// (`-1` for every page, otherwise a positive count) before any request.
    pub async fn fetch_pages(&self, query: &mut Query, requested: i64) -> Result<Page> {
        let budget = PageBudget::try_from(requested)?;
        self.fetch_all(query, budget).await
    }

    /// Fetch pages and also return the pagination plan that was executed
    pub async fn fetch_all_with_state(
        &self,
        query: &mut Query,
        budget: PageBudget,
    ) -> Result<(Page, PaginationState)> {
        let page_size = self.config.page_size;
        if page_size == 0 {
            return Err(Error::invalid_config("page_size", "must be greater than 0"));
        }

        let start_index = query.start_index()?;
        query.set_max_results(page_size);

        let mut feed = self.fetch_page(query, 1, start_index).await?;

        let total_results = remaining_total(&feed.total_results, start_index)?;
        if total_results < 0 {
            warn!(
                "Server reported {} results, fewer than start-index {}; no further pages",
                feed.total_results, start_index
            );
        }
        let max_pages = max_pages(total_results, page_size);
        let num_pages = resolve_page_count(budget, max_pages);
        let state = PaginationState {
            start_index,
            total_results,
            max_pages,
            num_pages,
        };

        info!(
            total_results,
            max_pages,
            num_pages,
            budget = %budget,
            "Planned pagination"
        );

        for (page, offset) in (2u64..).zip(page_offset_iter(num_pages, start_index, page_size)) {
            query.set_start_index(offset);
            let next = self.fetch_page(query, page, offset).await?;
            feed.extend(next);
        }

        debug!(
            "Fetched {} entries in {} requests",
            feed.len(),
            state.requests()
        );

        Ok((feed, state))
    }

    /// Execute a single page request, tagging failures with the page position
    async fn fetch_page(&self, query: &Query, page: u64, start_index: u64) -> Result<Page> {
        debug!("Executing query (page {page}): {query}");
        self.executor
            .execute(query)
            .await
            .map_err(|e| Error::pagination(format!("page {page} (start-index {start_index})"), e))
    }
}
