//! Output module
//!
//! Renders an aggregated feed as delimited text (TSV or CSV).
//!
//! # Overview
//!
//! - One header row built from the first entry's dimension and metric names
//! - One row per entry with the field values in the same order
//! - Excel dialect quoting, UTF-8 output

mod printer;

pub use printer::{Delimiter, FeedPrinter};

#[cfg(test)]
mod tests;
