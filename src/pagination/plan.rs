//! Pagination arithmetic
//!
//! Pure functions that turn a reported total into a list of page offsets.
//! All offsets are 1-based, matching the API's `start-index` parameter.

use super::types::PageBudget;
use crate::error::{Error, Result};
use crate::query::START_INDEX;

/// Rows matching the query from `start_index` onward.
///
/// `reported_total` is the server's string-encoded count of every matching
/// row. The result is negative when the server reports fewer rows than
/// `start_index - 1`.
pub fn remaining_total(reported_total: &str, start_index: u64) -> Result<i64> {
    let invalid_total = || Error::InvalidTotalResults {
        value: reported_total.to_string(),
    };
    let total: i64 = reported_total.trim().parse().map_err(|_| invalid_total())?;
    let start_index = i64::try_from(start_index).map_err(|_| {
        Error::invalid_param(
            START_INDEX,
            format!("{start_index} exceeds the largest supported start index"),
        )
    })?;
    total.checked_sub(start_index - 1).ok_or_else(invalid_total)
}

/// Pages of `page_size` rows needed to cover `remaining` rows.
///
/// Zero or negative remaining rows need no pages.
pub fn max_pages(remaining: i64, page_size: u32) -> u64 {
    if remaining <= 0 || page_size == 0 {
        return 0;
    }
    (remaining as u64).div_ceil(u64::from(page_size))
}

/// Pages to fetch for a budget, never more than `max_pages`
pub fn resolve_page_count(budget: PageBudget, max_pages: u64) -> u64 {
    match budget {
        PageBudget::All => max_pages,
        PageBudget::Pages(n) => n.get().min(max_pages),
    }
}

/// Like [`resolve_page_count`], validating a raw budget first.
///
/// `-1` means every page; any other value must be positive.
pub fn resolve_requested_pages(requested: i64, max_pages: u64) -> Result<u64> {
    let budget = PageBudget::try_from(requested)?;
    Ok(resolve_page_count(budget, max_pages))
}

/// Start offsets for pages `2..=num_pages`.
///
/// The first page is fetched at `start_index` itself and is not included.
/// Offsets past `u64::MAX` cannot be addressed and end the sequence.
pub fn page_offsets(num_pages: u64, start_index: u64, page_size: u32) -> Vec<u64> {
    page_offset_iter(num_pages, start_index, page_size).collect()
}

/// Lazy form of [`page_offsets`]
pub fn page_offset_iter(
    num_pages: u64,
    start_index: u64,
    page_size: u32,
) -> impl Iterator<Item = u64> {
    (1..num_pages).map_while(move |page| {
        page.checked_mul(u64::from(page_size))?
            .checked_add(start_index)
    })
}
