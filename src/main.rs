//! backlog-postman main entry point
//!
//! This is the command-line interface for turning the Backlog API reference
//! into a Postman collection.

use backlog_postman::config::{load_config_with_hash, resolve_locale, Config, Locale, SiteProfile};
use backlog_postman::crawler::run_crawl;
use backlog_postman::output::{write_collection, write_report};
use backlog_postman::CollectorError;
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// backlog-postman: Backlog API reference to Postman collection
///
/// Crawls the Backlog developer documentation in the chosen language,
/// extracts every endpoint's method, URL and parameters, and writes a
/// Postman v2.1 collection.
#[derive(Parser, Debug)]
#[command(name = "backlog-postman")]
#[command(version)]
#[command(about = "Builds a Postman collection from the Backlog API reference", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Documentation language (overrides the config file)
    #[arg(short, long, value_enum)]
    language: Option<Locale>,

    /// Where to write the collection (overrides the config file)
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without fetching anything
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let (mut config, config_hash) = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            match load_config_with_hash(path) {
                Ok((cfg, hash)) => {
                    tracing::info!("Configuration loaded successfully (hash: {})", hash);
                    (cfg, Some(hash))
                }
                Err(e) => {
                    tracing::error!("Failed to load configuration: {}", e);
                    return Err(CollectorError::from(e).into());
                }
            }
        }
        None => (Config::default(), None),
    };

    if let Some(output) = &cli.output {
        config.output.path = output.display().to_string();
    }

    let locale = resolve_locale(cli.language, config.language).map_err(|e| {
        tracing::error!("{}", e);
        e
    })?;
    let profile = SiteProfile::for_locale(locale).with_overrides(&config.site);

    if cli.dry_run {
        handle_dry_run(&config, locale, &profile);
    } else {
        handle_crawl(config, profile, config_hash, cli.quiet).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("backlog_postman=info,warn"),
            1 => EnvFilter::new("backlog_postman=debug,info"),
            2 => EnvFilter::new("backlog_postman=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: shows the resolved profile and settings
fn handle_dry_run(config: &Config, locale: Locale, profile: &SiteProfile) {
    println!("=== backlog-postman Dry Run ===\n");

    println!("Site ({}):", locale);
    println!("  Index page: {}", profile.root_url);
    println!("  Link selector: {}", profile.link_selector);
    println!("  Content: {}", profile.content_selectors.join(", "));
    println!("  Method anchor: {}", profile.selectors.method);
    println!("  Query parameter anchor: {}", profile.selectors.query_parameter);
    println!("  Form parameter anchor: {}", profile.selectors.request_parameter);
    println!("  URL parameter anchor: {}", profile.selectors.url_parameter);

    println!("\nCrawler Configuration:");
    println!("  Allowed domain: {}", config.crawler.allowed_domain);
    println!(
        "  Max concurrent fetches: {}",
        config.crawler.max_concurrent_fetches
    );
    println!("  Request timeout: {}s", config.crawler.request_timeout);
    println!(
        "  On endpoint error: {:?}",
        config.crawler.on_endpoint_error
    );
    println!("  Deduplicate links: {}", config.crawler.deduplicate);
    println!("  Item order: {:?}", config.crawler.order);

    println!("\nUser Agent:");
    println!("  Name: {}", config.user_agent.crawler_name);
    println!("  Version: {}", config.user_agent.crawler_version);

    println!("\nOutput:");
    println!("  Collection: {}", config.output.collection_name);
    println!("  Path: {}", config.output.path);

    println!("\n✓ Configuration is valid");
}

/// Handles the main collection run
async fn handle_crawl(
    config: Config,
    profile: SiteProfile,
    config_hash: Option<String>,
    quiet: bool,
) -> Result<(), CollectorError> {
    let output_path = PathBuf::from(&config.output.path);

    tracing::info!(
        "Collecting from {} into {}",
        profile.root_url,
        output_path.display()
    );

    // Run the crawler
    let mut output = match run_crawl(config, profile).await {
        Ok(output) => output,
        Err(e) => {
            tracing::error!("Collection failed: {}", e);
            return Err(e);
        }
    };

    write_output(&output.collection, &output_path)?;

    output.report.config_hash = config_hash;
    write_report(&output.report, quiet, &mut std::io::stdout())?;

    Ok(())
}

fn write_output(
    collection: &backlog_postman::Collection,
    path: &Path,
) -> Result<(), CollectorError> {
    write_collection(collection, path).map_err(|e| {
        tracing::error!("{}", e);
        e
    })
}
