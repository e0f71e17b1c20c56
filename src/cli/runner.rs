//! CLI runner - executes commands

use crate::auth::{AuthProvider, StaticToken, TokenFile};
use crate::cli::commands::{Cli, Commands, FetchArgs};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::http::ReportClient;
use crate::output::FeedPrinter;
use crate::pagination::{
    max_pages, page_offset_iter, remaining_total, resolve_requested_pages, PageBudget, Paginator,
    DEFAULT_PAGE_SIZE,
};
use crate::query::Query;
use std::sync::Arc;
use tracing::{info, warn};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Fetch(args) => self.fetch(args).await,
            Commands::Plan {
                total,
                start_index,
                pages,
                page_size,
            } => self.plan(total, *start_index, *pages, *page_size),
        }
    }

    /// Load the config file, if one was given
    fn load_config(&self) -> Result<Option<Config>> {
        self.cli.config.as_ref().map(Config::from_file).transpose()
    }

    /// Merge the config file with command-line overrides
    fn resolve_config(&self, args: &FetchArgs) -> Result<Config> {
        let mut config = match (self.load_config()?, &args.endpoint) {
            (Some(mut config), Some(endpoint)) => {
                config.endpoint.clone_from(endpoint);
                config
            }
            (Some(config), None) => config,
            (None, Some(endpoint)) => Config::new(endpoint),
            (None, None) => {
                return Err(Error::config(
                    "No endpoint configured (use --endpoint or a config file)",
                ))
            }
        };

        if let Some(page_size) = args.page_size {
            config.page_size = page_size;
        }
        if let Some(token_file) = &args.token_file {
            config.token_file = Some(token_file.clone());
        }
        config.validate()?;
        Ok(config)
    }

    /// Fetch every requested page and write the merged feed
    async fn fetch(&self, args: &FetchArgs) -> Result<()> {
        let budget = PageBudget::try_from(args.pages)?;
        let config = self.resolve_config(args)?;
        let mut query = build_query(args)?;

        let auth = build_auth(args.token.as_deref(), &config)?;
        let client = ReportClient::new(config.client_config(), Arc::clone(&auth))?;
        let paginator = Paginator::with_config(client, config.paginator_config()?);

        let (feed, state) = match paginator.fetch_all_with_state(&mut query, budget).await {
            Ok(result) => result,
            Err(e) if e.is_unauthorized() => {
                warn!("Credential rejected by server, invalidating stored token");
                auth.invalidate().await?;
                eprintln!("Deleted stored token.");
                return Err(e);
            }
            Err(e) => return Err(e),
        };

        eprintln!("\nTotal results found: {}", state.total_results);
        eprintln!(
            "Total pages needed, with one page per API request: {}\n",
            state.num_pages
        );

        let delimiter = args.format.into();
        match &args.output {
            Some(path) => {
                let rows = FeedPrinter::to_file(path, delimiter)?.print(&feed)?;
                info!("Wrote {rows} rows to {}", path.display());
            }
            None => {
                FeedPrinter::to_stdout(delimiter).print(&feed)?;
            }
        }
        Ok(())
    }

    /// Print the pagination plan for a reported total
    fn plan(
        &self,
        total: &str,
        start_index: u64,
        pages: i64,
        page_size: Option<u32>,
    ) -> Result<()> {
        let page_size = match page_size {
            Some(size) => size,
            None => self
                .load_config()?
                .map_or(DEFAULT_PAGE_SIZE, |config| config.page_size),
        };
        if page_size == 0 || start_index == 0 {
            return Err(Error::config(
                "page size and start index must be greater than 0",
            ));
        }

        let remaining = remaining_total(total, start_index)?;
        let max = max_pages(remaining, page_size);
        let num_pages = resolve_requested_pages(pages, max)?;

        println!("Remaining results: {remaining}");
        println!("Max pages: {max}");
        println!("Pages to fetch: {num_pages}");
        println!("Start indices:");
        if num_pages > 0 {
            println!("  {start_index}");
        }
        for offset in page_offset_iter(num_pages, start_index, page_size) {
            println!("  {offset}");
        }
        Ok(())
    }
}

/// Build the report query from command-line arguments
pub(crate) fn build_query(args: &FetchArgs) -> Result<Query> {
    let mut query = Query::for_ids(&args.ids);

    let optional = [
        ("start-date", &args.start_date),
        ("end-date", &args.end_date),
        ("dimensions", &args.dimensions),
        ("metrics", &args.metrics),
        ("sort", &args.sort),
        ("filters", &args.filters),
    ];
    for (key, value) in optional {
        if let Some(value) = value {
            query.set(key, value.as_str());
        }
    }

    for param in &args.params {
        let (key, value) = param
            .split_once('=')
            .filter(|(key, _)| !key.trim().is_empty())
            .ok_or_else(|| Error::invalid_param(param.as_str(), "expected KEY=VALUE"))?;
        query.set(key.trim(), value);
    }

    if let Some(start_index) = args.start_index {
        query.set_start_index(start_index);
    }
    // Reject a bad start-index before any request
    query.start_index()?;

    Ok(query)
}

/// Pick the credential source: an explicit token wins over a token file
pub(crate) fn build_auth(token: Option<&str>, config: &Config) -> Result<Arc<dyn AuthProvider>> {
    if let Some(token) = token {
        return Ok(Arc::new(StaticToken::new(token)));
    }
    if let Some(path) = &config.token_file {
        return Ok(Arc::new(TokenFile::new(path)));
    }
    Err(Error::auth(
        "No credential available (use --token, REPORT_TOKEN or --token-file)",
    ))
}
