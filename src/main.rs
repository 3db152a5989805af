//! CLI entry point: scan a page, download what it links to, report.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use harvester::{
    discovery::{fetch_page, normalize_page_url, HtmlLinkDiscovery, LinkDiscovery},
    downloader::DownloaderBuilder,
    http::{create_http_client, HttpClientConfig},
    progress::{no_files_found, render_report, ProgressDisplay, StyleOptions},
    transfer::HttpTransfer,
};
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use tracing::{debug, info};

mod cli;

use cli::Args;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(args.log_level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    debug!(?args, "CLI arguments parsed");

    let page_url = normalize_page_url(&args.url)?;
    let input = args.url.trim();
    if !input.starts_with("http://") && !input.starts_with("https://") {
        info!("No scheme given, using {}", page_url);
    }

    let mut headers = HeaderMap::new();
    if let Some(ref agent) = args.user_agent {
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(agent).context("invalid user agent")?,
        );
    }
    let client = create_http_client(HttpClientConfig {
        headers: Some(headers),
        ..HttpClientConfig::default()
    })?;

    let page = fetch_page(&client, &page_url)
        .await
        .with_context(|| format!("failed to load {}", page_url))?;
    let links = HtmlLinkDiscovery.discover(&page, args.category)?;

    if links.is_empty() {
        if !args.quiet {
            println!("{}", no_files_found(args.category.name()));
        }
        return Ok(());
    }
    if !args.quiet {
        println!("Found {} {} link(s) on {}", links.len(), args.category, page.url);
    }

    let style = if args.no_progress || args.quiet {
        StyleOptions::hidden()
    } else {
        StyleOptions::default()
    };

    let downloader = DownloaderBuilder::new()
        .directory(args.output.clone())
        .retry_policy(args.retry_policy())
        .transfer(Arc::new(HttpTransfer::new(client)))
        .observer(Arc::new(ProgressDisplay::new(style)))
        .build()?;

    let result = downloader
        .download_urls(&links)
        .await
        .with_context(|| format!("failed to prepare {}", args.output.display()))?;

    if !args.quiet {
        print!(
            "{}",
            render_report(
                &result,
                args.category.name(),
                downloader.directory(),
                downloader.retries()
            )
        );
    }

    Ok(())
}
