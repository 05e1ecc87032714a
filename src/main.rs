// src/main.rs
// =============================================================================
// This is the entry point of the link-mapper CLI.
//
// What happens here:
// 1. Set up logging (tracing, to stderr, filtered by RUST_LOG)
// 2. Parse command-line arguments using clap
// 3. Crawl the site
// 4. Print the page -> links map (text or JSON) on stdout
// 5. Exit with proper code (0 = crawl finished, 2 = error)
// =============================================================================

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use link_mapper::crawl::{CrawlConfig, Crawler};
use link_mapper::report;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Logs go to stderr so stdout only carries results
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();

    let config = CrawlConfig::from(cli.crawl_options()?);
    let printed_in_real_time = config.print_in_real_time;

    tracing::info!("Crawling website: {}", cli.url);
    if let Some(max_depth) = config.max_depth {
        tracing::info!("Max crawl depth: {}", max_depth);
    }

    let crawler = Crawler::new(cli.url.as_str(), config)?;

    let started = Instant::now();
    let pages = crawler.crawl().await;
    let elapsed = started.elapsed();

    if cli.json {
        report::print_json(&pages)?;
    } else if !printed_in_real_time {
        report::print_crawl_map(&pages);
    }

    tracing::info!("Crawled {} page(s)", pages.len());
    tracing::info!("Time spent crawling: {:.2?}", elapsed);

    Ok(0)
}
