//! Catalog seeding command
//!
//! Rows are upserted, so re-running with the same file changes nothing.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use holocron_server::{HolocronConfig, SeedData};

use super::{connect_and_migrate, resolve_database_url};

#[derive(Parser, Debug)]
pub struct SeedArgs {
    /// Database URL (overrides config)
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    /// JSON fixture with `users`, `planets` and `people` arrays
    /// (default: bundled catalog)
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,
}

pub async fn run_seed(args: SeedArgs, config: &HolocronConfig) -> Result<()> {
    // Parse before connecting so a bad file fails fast
    let data = match &args.file {
        Some(path) => SeedData::from_path(path)?,
        None => SeedData::bundled()?,
    };

    let url = resolve_database_url(args.database_url, config)?;
    let store = connect_and_migrate(&url, config).await?;

    let report = data
        .apply(&store)
        .await
        .context("Failed to apply seed data")?;

    println!(
        "Seeded {} users, {} planets, {} people",
        report.users, report.planets, report.people
    );
    Ok(())
}
