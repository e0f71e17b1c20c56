//! Pagination module
//!
//! # Overview
//!
//! The reporting API caps every response at a fixed number of rows. The
//! `Paginator` issues a first request, reads the server's total result
//! count, computes the start offset of every remaining page and fetches
//! them one after another, returning a single merged `Page`.
//!
//! The arithmetic lives in free functions (`remaining_total`, `max_pages`,
//! `resolve_page_count`, `page_offsets`) so it can be used and tested
//! without an executor.

mod paginator;
mod plan;
mod types;

pub use paginator::Paginator;
pub use plan::{
    max_pages, page_offset_iter, page_offsets, remaining_total, resolve_page_count,
    resolve_requested_pages,
};
pub use types::{PageBudget, PaginationState, PaginatorConfig, ALL_PAGES, DEFAULT_PAGE_SIZE};

#[cfg(test)]
mod tests;
