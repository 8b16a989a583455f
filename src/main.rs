//! Spindrift command-line interface

use anyhow::{bail, Context};
use clap::Parser;
use spindrift::config::{load_config_with_hash, Config};
use spindrift::engine::build_engine;
use spindrift::url::ResourceId;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Spindrift: a concurrent, deduplicated link crawler
///
/// Crawls from a seed URL up to a bounded depth, memoizing fetched content
/// on disk so nothing is fetched twice, and reports the outcome of every
/// visited resource.
#[derive(Parser, Debug)]
#[command(name = "spindrift")]
#[command(version)]
#[command(about = "A concurrent, deduplicated link crawler", long_about = None)]
struct Cli {
    /// Seed URL to crawl from (falls back to the config's seeds)
    #[arg(value_name = "SEED")]
    seed: Option<String>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Maximum link depth to follow (overrides config)
    #[arg(short, long)]
    depth: Option<u32>,

    /// Cache directory for fetched content (overrides config)
    #[arg(long, value_name = "DIR")]
    cache_dir: Option<String>,

    /// Maximum number of pages to visit (overrides config)
    #[arg(long, value_name = "N")]
    max_pages: Option<usize>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    // Load configuration, then let CLI flags override it.
    let mut config = match &cli.config {
        Some(path) => {
            let (config, hash) =
                load_config_with_hash(path).context("failed to load configuration")?;
            tracing::info!("Loaded {} (hash: {})", path.display(), hash);
            config
        }
        None => Config::default(),
    };

    if let Some(depth) = cli.depth {
        config.crawler.max_depth = depth;
    }
    if let Some(cache_dir) = cli.cache_dir {
        config.storage.cache_dir = cache_dir;
    }
    if let Some(max_pages) = cli.max_pages {
        config.crawler.max_pages = Some(max_pages);
    }

    let seed_urls: Vec<String> = match cli.seed {
        Some(seed) => vec![seed],
        None => config.seeds.clone(),
    };
    if seed_urls.is_empty() {
        bail!("no seed URL given on the command line or in the configuration");
    }

    let mut seeds = Vec::new();
    for raw in &seed_urls {
        let id = ResourceId::parse(raw).with_context(|| format!("invalid seed URL: {}", raw))?;
        seeds.push(id);
    }

    let engine = build_engine(&config).context("failed to initialize crawler")?;

    // Ctrl-C requests a graceful stop: in-flight fetches settle and the
    // partial report is still printed.
    let token = engine.cancellation_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Interrupt received, letting in-flight fetches settle");
            token.cancel();
        }
    });

    for seed in seeds {
        let report = engine.crawl(seed.clone(), config.crawler.max_depth).await;

        println!("{}: {}", seed, report.summary());
        for (id, error) in report.errors() {
            println!("  failed: {} ({})", id, error);
        }
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("spindrift=info,warn"),
            1 => EnvFilter::new("spindrift=debug,info"),
            2 => EnvFilter::new("spindrift=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
