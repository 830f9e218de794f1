//! Seed the tool directory from a JSON file.
//!
//! The file holds an array in the curator's candidate shape:
//! `[{"name": "...", "description": "...", "tags": [...], "pricing": "Free",
//!    "url": "https://...", "repo": "https://github.com/..."}]`

use anyhow::{Context, Result};
use clap::Parser;
use enrichment::{draft_from_candidate, CuratedCandidate};
use server_core::config::Config;
use server_core::domains::tools::Tool;
use sqlx::PgPool;

#[derive(Parser)]
#[command(name = "seed_tools")]
#[command(about = "Seed the tool directory from a JSON file of candidates")]
struct Cli {
    /// Path to a JSON array of tool candidates
    #[arg(default_value = "data/tools_seed.json")]
    file: std::path::PathBuf,

    /// Parse and report without writing to the database
    #[arg(long)]
    dry_run: bool,
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

    // Read seed data
    let json_data = std::fs::read_to_string(&cli.file)
        .with_context(|| format!("Failed to read seed file {}", cli.file.display()))?;
    let candidates: Vec<CuratedCandidate> =
        serde_json::from_str(&json_data).context("Failed to parse seed data")?;

    println!("✓ Loaded {} tools from JSON", candidates.len());

    // Snapshot stored names once; newly created names join the set so
    // duplicates within the file are skipped too
    let mut known_names = Tool::existing_names(&pool)
        .await
        .context("Failed to load existing tool names")?;

    println!("\n🚀 Starting seed process...\n");

    let total = candidates.len();
    let mut created_count = 0;
    let mut skipped_count = 0;

    for (idx, candidate) in candidates.into_iter().enumerate() {
        println!("[{}/{}] Processing: {}", idx + 1, total, candidate.name);

        let lowered = candidate.name.to_lowercase();
        if known_names.contains(&lowered) {
            println!("  ⊘ Skipping (already exists)");
            skipped_count += 1;
            continue;
        }

        let draft = draft_from_candidate(candidate);

        if cli.dry_run {
            println!(
                "  → Would create ({}, {} platform links)",
                draft.pricing,
                draft.platforms.len()
            );
            known_names.insert(lowered);
            created_count += 1;
            continue;
        }

        let tool = Tool::upsert_draft(&draft, &pool)
            .await
            .context("Failed to insert tool")?;

        println!("  ✓ Created {} ({})", tool.name, tool.pricing);
        known_names.insert(lowered);
        created_count += 1;
    }

    println!("\n✨ Seed complete!");
    println!("   Created: {}", created_count);
    println!("   Skipped: {}", skipped_count);
    println!("   Total: {}", total);

    Ok(())
}
