//! Topic-Harvester main entry point
//!
//! This is the command-line interface for the Topic-Harvester page harvester.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use topic_harvester::config::{load_config_with_hash, Config};
use topic_harvester::crawler::run_crawl;
use topic_harvester::output::print_summary;
use tracing_subscriber::EnvFilter;

/// Topic-Harvester: a polite namespace-bounded page harvester
///
/// Walks every page reachable from the seed URL inside one URL namespace
/// and writes a Title/URL/Content row for each page to a CSV file.
#[derive(Parser, Debug)]
#[command(name = "topic-harvester")]
#[command(version)]
#[command(about = "A polite namespace-bounded page harvester", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (built-in defaults when omitted)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => {
            tracing::info!("No configuration file given, using built-in defaults");
            Config::default()
        }
    };

    if cli.dry_run {
        handle_dry_run(&config)
    } else {
        handle_crawl(&config, cli.quiet).await
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("topic_harvester=info,warn"),
            1 => EnvFilter::new("topic_harvester=debug,info"),
            2 => EnvFilter::new("topic_harvester=trace,debug"),
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

/// Handles the --dry-run mode: validates config and shows what would be crawled
fn handle_dry_run(config: &Config) -> anyhow::Result<()> {
    topic_harvester::config::validate(config).context("Configuration is invalid")?;

    println!("=== Topic-Harvester Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Base URL: {}", config.crawler.base_url);
    println!("  Seed URL: {}", config.crawler.seed_url);
    println!("  Politeness delay: {}ms", config.crawler.politeness_delay);
    println!("  Request timeout: {}s", config.crawler.request_timeout);

    println!("\nScope:");
    println!("  Path prefix: {}", config.scope.path_prefix);
    println!(
        "  Excluded keywords: {}",
        config.scope.excluded_keywords.join(", ")
    );

    println!("\nExtraction:");
    println!("  Content selector: {}", config.extraction.content_selector);
    println!("  Fallback selector: {}", config.extraction.fallback_selector);
    println!(
        "  Stripped elements: {}",
        config.extraction.stripped_elements.join(", ")
    );

    println!("\nUser Agent: {}", config.user_agent.header_value());

    println!("\nOutput:");
    println!("  CSV: {}", config.output.csv_path);

    println!("\n✓ Configuration is valid");

    Ok(())
}

/// Handles the main crawl operation
async fn handle_crawl(config: &Config, quiet: bool) -> anyhow::Result<()> {
    tracing::info!("Starting crawl at {}", config.crawler.seed_url);

    let summary = run_crawl(config).await.context("Crawl failed")?;

    if !quiet {
        print_summary(&summary);
    }

    Ok(())
}
