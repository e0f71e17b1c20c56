//! Tests for pagination module

use super::*;
use crate::error::Error;
use crate::feed::{Entry, Page, QueryError, QueryExecutor};
use crate::query::{Query, MAX_RESULTS, START_INDEX};
use async_trait::async_trait;
use std::sync::Mutex;
use test_case::test_case;

// ============================================================================
// Mock Executor
// ============================================================================

/// Answers every query with two entries tagged by the requested start index
struct MockExecutor {
    total_results: String,
    fail_on_request: Option<(usize, QueryError)>,
    requests: Mutex<Vec<Query>>,
}

impl MockExecutor {
    fn new(total_results: &str) -> Self {
        Self {
            total_results: total_results.to_string(),
            fail_on_request: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Fail the n-th request (1-based)
    fn failing_on(mut self, request: usize, error: QueryError) -> Self {
        self.fail_on_request = Some((request, error));
        self
    }

    fn requests(&self) -> Vec<Query> {
        self.requests.lock().unwrap().clone()
    }

    fn requested_offsets(&self) -> Vec<Option<String>> {
        self.requests()
            .iter()
            .map(|q| q.get(START_INDEX).map(String::from))
            .collect()
    }
}

#[async_trait]
impl QueryExecutor for MockExecutor {
    async fn execute(&self, query: &Query) -> Result<Page, QueryError> {
        let mut requests = self.requests.lock().unwrap();
        requests.push(query.clone());

        if let Some((n, error)) = &self.fail_on_request {
            if *n == requests.len() {
                return Err(error.clone());
            }
        }

        let start = query.get(START_INDEX).unwrap_or("1").to_string();
        Ok(Page::new(
            self.total_results.clone(),
            vec![
                Entry::new().dimension("start", start.clone()).metric("row", "a"),
                Entry::new().dimension("start", start).metric("row", "b"),
            ],
        ))
    }
}

fn rows(page: &Page) -> Vec<String> {
    page.entries
        .iter()
        .map(|e| format!("{}{}", e.dimensions[0].value, e.metrics[0].value))
        .collect()
}

// ============================================================================
// Remaining Total Tests
// ============================================================================

#[test_case("20000", 1 => 20000 ; "from the first row")]
#[test_case("30000", 10001 => 20000 ; "from the second page")]
#[test_case("5000", 1001 => 4000 ; "from an arbitrary offset")]
#[test_case(" 42 ", 1 => 42 ; "surrounding whitespace")]
#[test_case("0", 1 => 0 ; "empty result")]
#[test_case("10", 101 => -90 ; "start index past the end")]
#[test_case("-5", 1 => -5 ; "negative reported total")]
#[test_case("9223372036854775807", 1 => i64::MAX ; "largest reported total")]
#[test_case("9223372036854775807", i64::MAX as u64 => 1 ; "largest start index")]
#[test_case("20000", i64::MAX as u64 => 20001 - i64::MAX ; "largest start index past the end")]
#[test_case("-9223372036854775808", 1 => i64::MIN ; "smallest reported total")]
fn test_remaining_total(reported: &str, start_index: u64) -> i64 {
    remaining_total(reported, start_index).unwrap()
}

#[test]
fn test_remaining_total_rejects_non_numeric() {
    let err = remaining_total("lots", 1).unwrap_err();
    assert!(matches!(err, Error::InvalidTotalResults { ref value } if value == "lots"));
}

#[test_case("-9223372036854775808", 2 ; "smallest total below start")]
#[test_case("-9223372036854775807", 3 ; "near smallest total below start")]
#[test_case("9223372036854775808", 1 ; "total above i64 range")]
fn test_remaining_total_rejects_out_of_range_total(reported: &str, start_index: u64) {
    let err = remaining_total(reported, start_index).unwrap_err();
    assert!(matches!(err, Error::InvalidTotalResults { ref value } if value == reported));
}

#[test_case(u64::MAX ; "u64 max")]
#[test_case(1 << 63 ; "one past i64 max")]
fn test_remaining_total_rejects_huge_start_index(start_index: u64) {
    let err = remaining_total("20000", start_index).unwrap_err();
    assert!(matches!(err, Error::InvalidQueryParam { ref key, .. } if key == START_INDEX));
}

#[test]
fn test_remaining_total_never_negative_when_total_covers_start() {
    for start_index in [1u64, 2, 1001, 10001, 30001] {
        for extra in [0u64, 1, 9999, 10000, 123_456] {
            let reported = (start_index - 1 + extra).to_string();
            let remaining = remaining_total(&reported, start_index).unwrap();
            assert_eq!(remaining, extra as i64);
            assert!(remaining >= 0);
        }
    }
}

// ============================================================================
// Max Pages Tests
// ============================================================================

#[test_case(100_000, 10_000 => 10 ; "exact multiple")]
#[test_case(90_000, 10_000 => 9 ; "nine pages")]
#[test_case(4000, 10_000 => 1 ; "partial single page")]
#[test_case(10_000, 10_000 => 1 ; "one full page")]
#[test_case(10_001, 10_000 => 2 ; "one row over")]
#[test_case(0, 10_000 => 0 ; "no rows")]
#[test_case(-90, 10_000 => 0 ; "negative remaining is clamped")]
#[test_case(250, 100 => 3 ; "custom page size")]
#[test_case(i64::MIN, 10_000 => 0 ; "smallest remaining")]
#[test_case(i64::MAX, 1 => i64::MAX as u64 ; "largest remaining single rows")]
#[test_case(i64::MAX, 10_000 => 922_337_203_685_478 ; "largest remaining default size")]
#[test_case(i64::MAX, u32::MAX => 2_147_483_649 ; "largest remaining largest size")]
fn test_max_pages(remaining: i64, page_size: u32) -> u64 {
    max_pages(remaining, page_size)
}

#[test]
fn test_max_pages_from_reported_totals() {
    let remaining = remaining_total("100000", 10001).unwrap();
    assert_eq!(remaining, 90000);
    assert_eq!(max_pages(remaining, DEFAULT_PAGE_SIZE), 9);

    let remaining = remaining_total("5000", 1001).unwrap();
    assert_eq!(remaining, 4000);
    assert_eq!(max_pages(remaining, DEFAULT_PAGE_SIZE), 1);
}

// ============================================================================
// Page Budget Tests
// ============================================================================

#[test]
fn test_resolve_page_count() {
    assert_eq!(resolve_page_count(PageBudget::All, 10), 10);
    assert_eq!(resolve_page_count(PageBudget::pages(5).unwrap(), 10), 5);
    assert_eq!(resolve_page_count(PageBudget::pages(11).unwrap(), 10), 10);
    assert_eq!(resolve_page_count(PageBudget::All, 1), 1);
    assert_eq!(resolve_page_count(PageBudget::pages(3).unwrap(), 0), 0);
}

#[test_case(ALL_PAGES, 10 => 10 ; "sentinel takes every page")]
#[test_case(5, 10 => 5 ; "budget below max")]
#[test_case(11, 10 => 10 ; "budget clamped to max")]
#[test_case(ALL_PAGES, 1 => 1 ; "sentinel single page")]
fn test_resolve_requested_pages(requested: i64, max: u64) -> u64 {
    resolve_requested_pages(requested, max).unwrap()
}

#[test_case(0 ; "zero")]
#[test_case(-2 ; "negative")]
#[test_case(i64::MIN ; "minimum")]
fn test_resolve_requested_pages_rejects(requested: i64) {
    let err = resolve_requested_pages(requested, 10).unwrap_err();
    assert!(matches!(err, Error::InvalidPageBudget { value } if value == requested));
}

#[test]
fn test_page_budget_conversions() {
    assert_eq!(PageBudget::try_from(-1).unwrap(), PageBudget::All);
    assert_eq!(PageBudget::try_from(7).unwrap(), PageBudget::pages(7).unwrap());
    assert!(PageBudget::pages(0).is_err());
    assert!(PageBudget::default().is_all());
    assert_eq!(PageBudget::All.to_string(), "all");
    assert_eq!(PageBudget::pages(3).unwrap().to_string(), "3");
}

// ============================================================================
// Offset Tests
// ============================================================================

#[test]
fn test_page_offsets_from_first_row() {
    assert_eq!(page_offsets(5, 1, 10_000), vec![10001, 20001, 30001, 40001]);
}

#[test]
fn test_page_offsets_from_later_row() {
    assert_eq!(page_offsets(3, 30001, 10_000), vec![40001, 50001]);
}

#[test]
fn test_page_offsets_single_or_no_page() {
    assert!(page_offsets(1, 1, 10_000).is_empty());
    assert!(page_offsets(0, 1, 10_000).is_empty());
}

#[test_case(3, u64::MAX - 10, 5 => vec![u64::MAX - 5, u64::MAX] ; "last offset is u64 max")]
#[test_case(4, u64::MAX - 10, 5 => vec![u64::MAX - 5, u64::MAX] ; "overflowing offset ends sequence")]
#[test_case(u64::MAX, u64::MAX - 1, u32::MAX => Vec::<u64>::new() ; "first offset overflows")]
#[test_case(3, i64::MAX as u64, u32::MAX => vec![i64::MAX as u64 + 4_294_967_295, i64::MAX as u64 + 8_589_934_590] ; "from largest start index")]
fn test_page_offsets_near_u64_max(num_pages: u64, start_index: u64, page_size: u32) -> Vec<u64> {
    page_offsets(num_pages, start_index, page_size)
}

#[test]
fn test_page_offset_iter_is_lazy() {
    let offsets: Vec<u64> = page_offset_iter(u64::MAX, 1, 10_000).take(3).collect();
    assert_eq!(offsets, vec![10001, 20001, 30001]);
}

#[test]
fn test_page_offsets_length_and_stride() {
    for num_pages in 0u64..8 {
        for (start_index, page_size) in [(1u64, 10_000u32), (501, 100), (7, 1)] {
            let offsets = page_offsets(num_pages, start_index, page_size);
            assert_eq!(offsets.len() as u64, num_pages.saturating_sub(1));
            if let Some(first) = offsets.first() {
                assert_eq!(*first, start_index + u64::from(page_size));
            }
            for pair in offsets.windows(2) {
                assert_eq!(pair[1] - pair[0], u64::from(page_size));
            }
        }
    }
}

// ============================================================================
// Paginator Tests
// ============================================================================

#[tokio::test]
async fn test_fetch_two_pages() {
    let paginator = Paginator::new(MockExecutor::new("15000"));
    let mut query = Query::for_ids("ga:1234").metrics("ga:visits");

    let (page, state) = paginator
        .fetch_all_with_state(&mut query, PageBudget::All)
        .await
        .unwrap();

    let executor = paginator.executor();
    assert_eq!(executor.requests().len(), 2);
    assert_eq!(
        executor.requested_offsets(),
        vec![None, Some("10001".to_string())]
    );
    for request in executor.requests() {
        assert_eq!(request.get(MAX_RESULTS), Some("10000"));
        assert_eq!(request.get("ids"), Some("ga:1234"));
    }

    assert_eq!(rows(&page), vec!["1a", "1b", "10001a", "10001b"]);
    assert_eq!(page.total_results, "15000");
    assert_eq!(
        state,
        PaginationState {
            start_index: 1,
            total_results: 15000,
            max_pages: 2,
            num_pages: 2,
        }
    );

    // The caller's query keeps the last offset and the page size
    assert_eq!(query.get(START_INDEX), Some("10001"));
    assert_eq!(query.get(MAX_RESULTS), Some("10000"));
}

#[tokio::test]
async fn test_fetch_respects_page_budget() {
    let paginator = Paginator::new(MockExecutor::new("100000"));
    let mut query = Query::for_ids("ga:1234");

    let (page, state) = paginator
        .fetch_all_with_state(&mut query, PageBudget::pages(3).unwrap())
        .await
        .unwrap();

    assert_eq!(
        paginator.executor().requested_offsets(),
        vec![None, Some("10001".to_string()), Some("20001".to_string())]
    );
    assert_eq!(page.len(), 6);
    assert_eq!(state.max_pages, 10);
    assert_eq!(state.num_pages, 3);
    assert!(state.is_truncated());
}

#[tokio::test]
async fn test_fetch_from_start_index() {
    let paginator = Paginator::new(MockExecutor::new("55000"));
    let mut query = Query::for_ids("ga:1234").starting_at(30001);

    let (page, state) = paginator
        .fetch_all_with_state(&mut query, PageBudget::All)
        .await
        .unwrap();

    assert_eq!(
        paginator.executor().requested_offsets(),
        vec![
            Some("30001".to_string()),
            Some("40001".to_string()),
            Some("50001".to_string())
        ]
    );
    assert_eq!(state.total_results, 25000);
    assert_eq!(state.num_pages, 3);
    assert_eq!(
        rows(&page),
        vec!["30001a", "30001b", "40001a", "40001b", "50001a", "50001b"]
    );
}

#[tokio::test]
async fn test_fetch_single_page() {
    let paginator = Paginator::new(MockExecutor::new("4000"));
    let mut query = Query::for_ids("ga:1234");

    let page = paginator.fetch_all(&mut query, PageBudget::All).await.unwrap();

    assert_eq!(paginator.executor().requests().len(), 1);
    assert_eq!(page.len(), 2);
    assert_eq!(query.get(START_INDEX), None);
}

#[tokio::test]
async fn test_fetch_empty_result_issues_one_request() {
    let paginator = Paginator::new(MockExecutor::new("0"));
    let mut query = Query::for_ids("ga:1234");

    let (_, state) = paginator
        .fetch_all_with_state(&mut query, PageBudget::All)
        .await
        .unwrap();

    assert_eq!(paginator.executor().requests().len(), 1);
    assert_eq!(state.max_pages, 0);
    assert_eq!(state.num_pages, 0);
    assert_eq!(state.requests(), 1);
}

#[tokio::test]
async fn test_fetch_start_index_past_total() {
    let paginator = Paginator::new(MockExecutor::new("10"));
    let mut query = Query::for_ids("ga:1234").starting_at(101);

    let (page, state) = paginator
        .fetch_all_with_state(&mut query, PageBudget::All)
        .await
        .unwrap();

    assert_eq!(paginator.executor().requests().len(), 1);
    assert_eq!(state.total_results, -90);
    assert_eq!(state.max_pages, 0);
    assert_eq!(page.len(), 2);
}

#[tokio::test]
async fn test_fetch_custom_page_size() {
    let config = PaginatorConfig::with_page_size(100).unwrap();
    let paginator = Paginator::with_config(MockExecutor::new("250"), config);
    let mut query = Query::for_ids("ga:1234");

    paginator.fetch_all(&mut query, PageBudget::All).await.unwrap();

    let executor = paginator.executor();
    assert_eq!(
        executor.requested_offsets(),
        vec![None, Some("101".to_string()), Some("201".to_string())]
    );
    assert!(executor
        .requests()
        .iter()
        .all(|q| q.get(MAX_RESULTS) == Some("100")));
}

#[tokio::test]
async fn test_fetch_overwrites_caller_max_results() {
    let paginator = Paginator::new(MockExecutor::new("5"));
    let mut query = Query::for_ids("ga:1234").param(MAX_RESULTS, "50");

    paginator.fetch_all(&mut query, PageBudget::All).await.unwrap();

    assert_eq!(
        paginator.executor().requests()[0].get(MAX_RESULTS),
        Some("10000")
    );
}

#[tokio::test]
async fn test_invalid_budget_issues_no_request() {
    let paginator = Paginator::new(MockExecutor::new("100000"));
    let mut query = Query::for_ids("ga:1234");

    let err = paginator.fetch_pages(&mut query, 0).await.unwrap_err();
    assert!(matches!(err, Error::InvalidPageBudget { value: 0 }));

    let err = paginator.fetch_pages(&mut query, -5).await.unwrap_err();
    assert!(matches!(err, Error::InvalidPageBudget { value: -5 }));

    assert!(paginator.executor().requests().is_empty());
    assert_eq!(query.get(MAX_RESULTS), None);
}

#[tokio::test]
async fn test_fetch_pages_sentinel() {
    let paginator = Paginator::new(MockExecutor::new("20000"));
    let mut query = Query::for_ids("ga:1234");

    let page = paginator.fetch_pages(&mut query, ALL_PAGES).await.unwrap();
    assert_eq!(page.len(), 4);
    assert_eq!(paginator.executor().requests().len(), 2);
}

#[tokio::test]
async fn test_invalid_start_index_issues_no_request() {
    let paginator = Paginator::new(MockExecutor::new("100"));
    let mut query = Query::for_ids("ga:1234").param(START_INDEX, "0");

    let err = paginator
        .fetch_all(&mut query, PageBudget::All)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidQueryParam { .. }));
    assert!(paginator.executor().requests().is_empty());
}

#[tokio::test]
async fn test_failure_on_later_page_aborts() {
    let executor =
        MockExecutor::new("30000").failing_on(2, QueryError::status(500, "backend error"));
    let paginator = Paginator::new(executor);
    let mut query = Query::for_ids("ga:1234");

    let err = paginator
        .fetch_all(&mut query, PageBudget::All)
        .await
        .unwrap_err();

    match &err {
        Error::Pagination { context, source } => {
            assert_eq!(context, "page 2 (start-index 10001)");
            assert_eq!(source, &QueryError::status(500, "backend error"));
        }
        other => panic!("Expected Pagination error, got {other:?}"),
    }
    assert!(!err.is_unauthorized());
    // The third page is never requested
    assert_eq!(paginator.executor().requests().len(), 2);
}

#[tokio::test]
async fn test_unauthorized_on_first_page() {
    let executor = MockExecutor::new("30000").failing_on(1, QueryError::unauthorized("Token invalid"));
    let paginator = Paginator::new(executor);
    let mut query = Query::for_ids("ga:1234");

    let err = paginator
        .fetch_all(&mut query, PageBudget::All)
        .await
        .unwrap_err();

    assert!(err.is_unauthorized());
    assert!(err.to_string().contains("page 1 (start-index 1)"));
    assert_eq!(paginator.executor().requests().len(), 1);
}

#[tokio::test]
async fn test_invalid_total_results() {
    let paginator = Paginator::new(MockExecutor::new("n/a"));
    let mut query = Query::for_ids("ga:1234");

    let err = paginator
        .fetch_all(&mut query, PageBudget::All)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidTotalResults { .. }));
}

#[tokio::test]
async fn test_paginator_is_reusable() {
    let paginator = Paginator::new(MockExecutor::new("12000"));

    let mut first = Query::for_ids("ga:1");
    let mut second = Query::for_ids("ga:2");
    paginator.fetch_all(&mut first, PageBudget::All).await.unwrap();
    paginator
        .fetch_all(&mut second, PageBudget::pages(1).unwrap())
        .await
        .unwrap();

    let ids: Vec<String> = paginator
        .executor()
        .requests()
        .iter()
        .map(|q| q.get("ids").unwrap().to_string())
        .collect();
    assert_eq!(ids, vec!["ga:1", "ga:1", "ga:2"]);
}

#[test_case("18446744073709551615" ; "u64 max")]
#[test_case("9223372036854775808" ; "one past i64 max")]
#[tokio::test]
async fn test_huge_start_index_issues_no_request(raw: &str) {
    let paginator = Paginator::new(MockExecutor::new("20000"));
    let mut query = Query::for_ids("ga:1234").param(START_INDEX, raw);

    let err = paginator
        .fetch_all(&mut query, PageBudget::All)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidQueryParam { ref key, .. } if key == START_INDEX));
    assert!(paginator.executor().requests().is_empty());
}

#[tokio::test]
async fn test_fetch_from_largest_start_index() {
    let paginator = Paginator::new(MockExecutor::new("20000"));
    let mut query = Query::for_ids("ga:1234").starting_at(i64::MAX as u64);

    let (page, state) = paginator
        .fetch_all_with_state(&mut query, PageBudget::All)
        .await
        .unwrap();

    assert_eq!(paginator.executor().requests().len(), 1);
    assert!(state.total_results < 0);
    assert_eq!(state.num_pages, 0);
    assert_eq!(page.len(), 2);
}

#[tokio::test]
async fn test_fetch_negative_reported_total() {
    let paginator = Paginator::new(MockExecutor::new("-5"));
    let mut query = Query::for_ids("ga:1234");

    let (_, state) = paginator
        .fetch_all_with_state(&mut query, PageBudget::All)
        .await
        .unwrap();

    assert_eq!(paginator.executor().requests().len(), 1);
    assert_eq!(state.total_results, -5);
    assert_eq!(state.max_pages, 0);
}

#[tokio::test]
async fn test_fetch_reported_total_underflow() {
    let paginator = Paginator::new(MockExecutor::new("-9223372036854775808"));
    let mut query = Query::for_ids("ga:1234").starting_at(2);

    let err = paginator
        .fetch_all(&mut query, PageBudget::All)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidTotalResults { .. }));
    assert_eq!(paginator.executor().requests().len(), 1);
}

#[tokio::test]
async fn test_fetch_largest_reported_total_with_budget() {
    let paginator = Paginator::new(MockExecutor::new("9223372036854775807"));
    let mut query = Query::for_ids("ga:1234");

    let (page, state) = paginator
        .fetch_all_with_state(&mut query, PageBudget::pages(2).unwrap())
        .await
        .unwrap();

    assert_eq!(
        paginator.executor().requested_offsets(),
        vec![None, Some("10001".to_string())]
    );
    assert_eq!(state.max_pages, 922_337_203_685_478);
    assert_eq!(state.num_pages, 2);
    assert_eq!(page.len(), 4);
}
