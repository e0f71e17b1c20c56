//! CLI module
//!
//! Command-line interface for exporting reports.
//!
//! # Commands
//!
//! - `fetch` - Fetch every page of a report query and write it as TSV/CSV
//! - `plan` - Show the pagination plan for a reported total, without requests

mod commands;
mod runner;

pub use commands::{Cli, Commands, FetchArgs, OutputFormat};
pub use runner::Runner;
