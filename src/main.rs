mod config;
mod crawler;
mod enrich;
mod model;
mod parser;
mod scraper;
mod table;
mod utils;

use clap::{Parser as ClapParser, Subcommand};
use crate::config::{resolve_config, AppConfig};
use crate::crawler::Crawler;
use crate::enrich::{enrich_records, PlacesClient};
use crate::model::ConfigError;
use crate::parser::BobParser;
use crate::scraper::{HttpFetcher, PageCache};
use std::collections::HashSet;
use std::error::Error;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const EXIT_FAILURE: u8 = 1;
const EXIT_MISSING_API_KEY: u8 = 2;

#[derive(Debug, ClapParser)]
#[command(name = "bob-scraper", about = "Scrape Best of Boston winners and enrich them with places data")]
struct Cli {
    /// JSON config file (defaults to ./config.json when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Crawl every award category linked from a saved theme page
    Scrape {
        #[arg(long)]
        theme: Option<PathBuf>,
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Crawl the businesses linked from one saved category page
    Category {
        page: PathBuf,
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Add places search results to a scraped CSV
    Enrich {
        #[arg(long)]
        input: Option<PathBuf>,
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    std::panic::set_hook(Box::new(|panic_info| {
        error!("Panic occurred: {}", panic_info);
    }));

    let cli = Cli::parse();

    let config = match resolve_config(cli.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Config load error: {}", e);
            return ExitCode::from(EXIT_FAILURE);
        }
    };

    let result = match cli.command {
        Command::Scrape { theme, output } => run_scrape(
            &config,
            theme.unwrap_or_else(|| config.theme_page.clone()),
            output.unwrap_or_else(|| config.scrape_output.clone()),
        ),
        Command::Category { page, output } => run_category(
            &config,
            page,
            output.unwrap_or_else(|| config.scrape_output.clone()),
        ),
        Command::Enrich { input, output } => {
            let api_key = match config.api_key() {
                Ok(key) => key,
                Err(e @ ConfigError::MissingApiKey(_)) => {
                    error!("Error: {}", e);
                    return ExitCode::from(EXIT_MISSING_API_KEY);
                }
                Err(e) => {
                    error!("Error: {}", e);
                    return ExitCode::from(EXIT_FAILURE);
                }
            };
            run_enrich(
                &config,
                &api_key,
                input.unwrap_or_else(|| config.enrich_input.clone()),
                output.unwrap_or_else(|| config.enrich_output.clone()),
            )
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Run failed: {}", e);
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

fn run_scrape(config: &AppConfig, theme: PathBuf, output: PathBuf) -> Result<(), Box<dyn Error>> {
    info!("Reading theme page {}", theme.display());
    let theme_html = fs::read_to_string(&theme)?;

    let cache = PageCache::new(&config.data_dir, HttpFetcher::new(config)?);
    let parser = BobParser::new()?;
    let report = Crawler::new(&cache, &parser).crawl_theme(&theme_html)?;
    report.log_summary();

    table::save_business_table(&output, &report.records)?;
    info!("Wrote {} rows to {}", report.records.len(), output.display());
    Ok(())
}

fn run_category(config: &AppConfig, page: PathBuf, output: PathBuf) -> Result<(), Box<dyn Error>> {
    info!("Reading category page {}", page.display());
    let category_html = fs::read_to_string(&page)?;

    let cache = PageCache::new(&config.data_dir, HttpFetcher::new(config)?);
    let parser = BobParser::new()?;
    let report = Crawler::new(&cache, &parser).crawl_category(&category_html)?;
    report.log_summary();

    table::save_business_table(&output, &report.records)?;
    info!("Wrote {} rows to {}", report.records.len(), output.display());
    Ok(())
}

fn run_enrich(
    config: &AppConfig,
    api_key: &str,
    input: PathBuf,
    output: PathBuf,
) -> Result<(), Box<dyn Error>> {
    let records = table::load_business_table(&input)?;
    info!("Loaded {} rows from {}", records.len(), input.display());

    let client = PlacesClient::new(HttpFetcher::new(config)?, config.places_api_base.as_str(), api_key);
    let mut bad_queries = HashSet::new();
    let (enriched, _stats) = enrich_records(&client, &records, &mut bad_queries);

    table::save_enriched_table(&output, &enriched)?;
    info!("Wrote {} rows to {}", enriched.len(), output.display());
    Ok(())
}
