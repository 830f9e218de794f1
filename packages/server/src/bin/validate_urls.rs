//! Probe every stored platform link and report dead ones.
//!
//! Sends HEAD requests with a bounded timeout (GET when the origin
//! rejects HEAD) and counts ok / redirected / failed links. Exits
//! nonzero when any link fails, so this can run as a CI check.

use anyhow::{Context, Result};
use clap::Parser;
use enrichment::PlatformLink;
use futures::stream::{self, StreamExt};
use reqwest::redirect::Policy;
use reqwest::{Client, Method, StatusCode};
use server_core::config::Config;
use server_core::domains::tools::Tool;
use server_core::kernel::SCRAPER_USER_AGENT;
use sqlx::PgPool;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "validate_urls")]
#[command(about = "Check that every stored platform link still resolves")]
struct Cli {
    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 10)]
    timeout: u64,

    /// Links probed in parallel
    #[arg(long, default_value_t = 8)]
    concurrency: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load config
    let config = Config::from_env()?;

    // Connect to database
    let pool = PgPool::connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;

    println!("✓ Connected to database");

    let tools = Tool::find_all(&pool).await.context("Failed to load tools")?;
    println!("✓ Loaded {} tools\n", tools.len());

    // Redirects are not followed so they can be counted; a 3xx link
    // still works but should be updated to its destination
    let client = Client::builder()
        .timeout(Duration::from_secs(cli.timeout))
        .user_agent(SCRAPER_USER_AGENT)
        .redirect(Policy::none())
        .build()
        .context("Failed to create HTTP client")?;

    let links: Vec<(String, PlatformLink)> = tools
        .iter()
        .flat_map(|tool| {
            tool.platforms
                .0
                .iter()
                .cloned()
                .map(|link| (tool.name.clone(), link))
        })
        .collect();

    let outcomes = stream::iter(links)
        .map(|(name, link)| {
            let client = client.clone();
            async move {
                let outcome = probe(&client, &link.url).await;
                (name, link, outcome)
            }
        })
        .buffer_unordered(cli.concurrency.max(1))
        .collect::<Vec<_>>()
        .await;

    let mut ok_count = 0;
    let mut redirect_count = 0;
    let mut failure_count = 0;

    for (name, link, outcome) in outcomes {
        match outcome {
            Ok(status) if status.is_success() => {
                println!("  ✓ {} [{}] {}", name, link.kind, link.url);
                ok_count += 1;
            }
            Ok(status) if status.is_redirection() => {
                println!("  ↪ {} [{}] {} ({})", name, link.kind, link.url, status);
                redirect_count += 1;
            }
            Ok(status) => {
                println!("  ✗ {} [{}] {} ({})", name, link.kind, link.url, status);
                failure_count += 1;
            }
            Err(e) => {
                println!("  ✗ {} [{}] {} ({})", name, link.kind, link.url, e);
                failure_count += 1;
            }
        }
    }

    println!("\n✨ Validation complete!");
    println!("   Ok: {}", ok_count);
    println!("   Redirects: {}", redirect_count);
    println!("   Failures: {}", failure_count);

    if failure_count > 0 {
        std::process::exit(1);
    }

    Ok(())
}

/// HEAD first; origins that reject HEAD outright get one GET retry.
async fn probe(client: &Client, url: &str) -> Result<StatusCode> {
    let response = client.request(Method::HEAD, url).send().await?;

    if response.status() == StatusCode::METHOD_NOT_ALLOWED {
        let response = client.get(url).send().await?;
        return Ok(response.status());
    }

    Ok(response.status())
}
