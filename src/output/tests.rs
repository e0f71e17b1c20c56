//! Tests for output module

use super::*;
use crate::feed::{Entry, Page};
use pretty_assertions::assert_eq;
use tempfile::tempdir;

fn sample_feed() -> Page {
    Page::new(
        "2",
        vec![
            Entry::new()
                .dimension("ga:source", "google")
                .dimension("ga:medium", "organic")
                .metric("ga:visits", "1200"),
            Entry::new()
                .dimension("ga:source", "news.example.com")
                .dimension("ga:medium", "referral")
                .metric("ga:visits", "87"),
        ],
    )
}

fn render(feed: &Page, delimiter: Delimiter) -> String {
    let mut printer = FeedPrinter::new(Vec::new(), delimiter);
    printer.print(feed).unwrap();
    String::from_utf8(printer.into_inner()).unwrap()
}

#[test]
fn test_print_tsv() {
    let output = render(&sample_feed(), Delimiter::Tsv);
    assert_eq!(
        output,
        "ga:source\tga:medium\tga:visits\r\n\
         google\torganic\t1200\r\n\
         news.example.com\treferral\t87\r\n"
    );
}

#[test]
fn test_print_csv() {
    let output = render(&sample_feed(), Delimiter::Csv);
    assert_eq!(
        output,
        "ga:source,ga:medium,ga:visits\r\n\
         google,organic,1200\r\n\
         news.example.com,referral,87\r\n"
    );
}

#[test]
fn test_print_returns_row_count() {
    let mut printer = FeedPrinter::new(Vec::new(), Delimiter::Tsv);
    assert_eq!(printer.print(&sample_feed()).unwrap(), 2);
}

#[test]
fn test_print_empty_feed_writes_nothing() {
    let output = render(&Page::new("0", Vec::new()), Delimiter::Tsv);
    assert!(output.is_empty());
}

#[test]
fn test_print_quotes_special_fields() {
    let feed = Page::new(
        "1",
        vec![Entry::new()
            .dimension("ga:keyword", "shoes, red")
            .dimension("ga:pageTitle", "The \"best\" page")
            .metric("ga:visits", "3")],
    );

    let csv = render(&feed, Delimiter::Csv);
    assert_eq!(
        csv,
        "ga:keyword,ga:pageTitle,ga:visits\r\n\
         \"shoes, red\",\"The \"\"best\"\" page\",3\r\n"
    );

    // A comma is not special in TSV
    let tsv = render(&feed, Delimiter::Tsv);
    assert!(tsv.contains("shoes, red\t\"The \"\"best\"\" page\"\t3"));
}

#[test]
fn test_print_utf8() {
    let feed = Page::new(
        "1",
        vec![Entry::new().dimension("ga:city", "Zürich").metric("ga:visits", "5")],
    );
    assert_eq!(
        render(&feed, Delimiter::Tsv),
        "ga:city\tga:visits\r\nZürich\t5\r\n"
    );
}

#[test]
fn test_print_to_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("report.tsv");

    let mut printer = FeedPrinter::to_file(&path, Delimiter::Tsv).unwrap();
    printer.print(&sample_feed()).unwrap();
    drop(printer);

    let contents = std::fs::read_to_string(&path).unwrap();
    assert_eq!(contents.lines().count(), 3);
    assert!(contents.starts_with("ga:source\tga:medium\tga:visits"));
}

#[test]
fn test_print_to_missing_dir_fails() {
    let dir = tempdir().unwrap();
    let result = FeedPrinter::to_file(dir.path().join("nope/report.tsv"), Delimiter::Tsv);
    assert!(result.is_err());
}
