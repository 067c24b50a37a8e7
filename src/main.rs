//! Site-Sitemap main entry point
//!
//! This is the command-line interface for the Site-Sitemap crawler.

use anyhow::Context;
use clap::Parser;
use site_sitemap::config::{load_config_with_hash, CrawlerConfig, SitemapOutput};
use site_sitemap::crawler::{CrawlProgress, Crawler, StepOutcome};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Site-Sitemap: crawl one host and write its sitemap
///
/// Starting from URL, every page on the same host reachable through links is
/// visited, and every discovered URL is listed in a sitemaps.org XML file.
#[derive(Parser, Debug)]
#[command(name = "site-sitemap")]
#[command(version = "1.0.0")]
#[command(about = "Crawl one host and write its sitemap", long_about = None)]
struct Cli {
    /// Starting URL, including scheme (e.g. https://example.com/)
    #[arg(value_name = "URL")]
    url: String,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Sitemap output path
    #[arg(short = 'o', long, value_name = "FILE", conflicts_with = "no_sitemap")]
    sitemap: Option<PathBuf>,

    /// Do not write a sitemap
    #[arg(long)]
    no_sitemap: bool,

    /// User agent override
    #[arg(short = 'A', long, value_name = "AGENT")]
    user_agent: Option<String>,

    /// Number of URLs processed at the same time
    #[arg(short = 'j', long, value_name = "N")]
    concurrency: Option<usize>,

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

    let (config, config_hash) = match &cli.config {
        Some(path) => {
            let (cfg, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration {}", path.display()))?;
            (cfg, Some(hash))
        }
        None => (CrawlerConfig::default(), None),
    };
    let config = apply_overrides(config, &cli);

    // Setup logging based on verbosity
    let verbosity = if config.verbose { cli.verbose.max(1) } else { cli.verbose };
    setup_logging(verbosity, cli.quiet);

    if let (Some(path), Some(hash)) = (&cli.config, &config_hash) {
        tracing::info!(
            "Configuration loaded from {} (hash: {})",
            path.display(),
            hash
        );
    }

    let mut crawler = Crawler::new(&cli.url, config).context("Cannot start crawl")?;
    tracing::info!("Crawling {}", crawler.root().url());

    let mut progress = crawler.progress();
    let reporter = tokio::spawn(async move {
        while let Some(event) = progress.recv().await {
            report_progress(&event);
        }
    });

    let report = crawler.crawl().await;
    // Closing the channel lets the reporter drain and stop
    drop(crawler);
    let _ = reporter.await;

    tracing::info!(
        "Crawl completed in {}s",
        report.duration().num_milliseconds() as f64 / 1000.0
    );

    if !cli.quiet {
        println!("[ok]");
        println!("{}", report);
    }

    Ok(())
}

/// Lets command-line flags win over file values
fn apply_overrides(mut config: CrawlerConfig, cli: &Cli) -> CrawlerConfig {
    if cli.no_sitemap {
        config.sitemap = SitemapOutput::Disabled;
    } else if let Some(path) = &cli.sitemap {
        config.sitemap = SitemapOutput::Path(path.clone());
    }

    if let Some(agent) = &cli.user_agent {
        config.user_agent = Some(agent.clone());
    }

    if let Some(concurrency) = cli.concurrency {
        config.max_concurrency = concurrency;
    }

    if cli.verbose > 0 {
        config.verbose = true;
    }

    config
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("site_sitemap=info,warn"),
            1 => EnvFilter::new("site_sitemap=debug,info"),
            2 => EnvFilter::new("site_sitemap=trace,debug"),
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

fn report_progress(event: &CrawlProgress) {
    match event {
        CrawlProgress::Started { index, url } => tracing::debug!("[!] #{} {}", index, url),
        CrawlProgress::Visited { url, outcome } => match outcome {
            StepOutcome::Html { discovered } => {
                tracing::debug!("[!] {} html, {} new", url, discovered)
            }
            StepOutcome::NotHtml(mime) => tracing::debug!("[!] {} {}", url, mime),
            StepOutcome::ProbeFailed(reason) | StepOutcome::ExtractFailed(reason) => {
                tracing::debug!("[!] {} failed: {}", url, reason)
            }
        },
        CrawlProgress::Finished { urls } => tracing::debug!("[!] finished, {} urls", urls),
    }
}
