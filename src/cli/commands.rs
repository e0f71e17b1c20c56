//! CLI commands and argument parsing

use crate::output::Delimiter;
use crate::pagination::ALL_PAGES;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Export complete result sets from a page-capped reporting API
#[derive(Parser, Debug)]
#[command(name = "report-paginator")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML or JSON)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output (log every query)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch all pages of a query and write them as delimited text
    Fetch(FetchArgs),

    /// Show how a reported total would be split into pages
    Plan {
        /// Total results reported by the server
        #[arg(long)]
        total: String,

        /// First row to fetch (1-based)
        #[arg(long, default_value = "1")]
        start_index: u64,

        /// Pages to fetch (-1 = all)
        #[arg(long, default_value_t = ALL_PAGES, allow_hyphen_values = true)]
        pages: i64,

        /// Rows per page (defaults to the config value or 10000)
        #[arg(long)]
        page_size: Option<u32>,
    },
}

/// Arguments for the `fetch` command
#[derive(Args, Debug, Clone)]
pub struct FetchArgs {
    /// Data feed endpoint (overrides the config file)
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Bearer token
    #[arg(long, env = "REPORT_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// File holding a persisted token (overrides the config file)
    #[arg(long)]
    pub token_file: Option<PathBuf>,

    /// Table/profile ids (e.g. ga:12345)
    #[arg(long)]
    pub ids: String,

    /// First day of the report (YYYY-MM-DD)
    #[arg(long)]
    pub start_date: Option<String>,

    /// Last day of the report (YYYY-MM-DD)
    #[arg(long)]
    pub end_date: Option<String>,

    /// Comma-separated dimensions
    #[arg(long)]
    pub dimensions: Option<String>,

    /// Comma-separated metrics
    #[arg(long)]
    pub metrics: Option<String>,

    /// Sort order
    #[arg(long, allow_hyphen_values = true)]
    pub sort: Option<String>,

    /// Row filter expression
    #[arg(long)]
    pub filters: Option<String>,

    /// First row to fetch (1-based)
    #[arg(long)]
    pub start_index: Option<u64>,

    /// Extra query parameter as key=value (repeatable)
    #[arg(long = "param", value_name = "KEY=VALUE")]
    pub params: Vec<String>,

    /// Pages to fetch (-1 = all)
    #[arg(long, default_value_t = ALL_PAGES, allow_hyphen_values = true)]
    pub pages: i64,

    /// Rows per page (overrides the config file)
    #[arg(long)]
    pub page_size: Option<u32>,

    /// Output file (stdout if omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "tsv")]
    pub format: OutputFormat,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Tab separated values
    Tsv,
    /// Comma separated values
    Csv,
}

impl From<OutputFormat> for Delimiter {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Tsv => Delimiter::Tsv,
            OutputFormat::Csv => Delimiter::Csv,
        }
    }
}
