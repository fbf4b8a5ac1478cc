//! Schema migration command

use anyhow::Result;
use clap::Parser;

use holocron_server::HolocronConfig;

use super::{connect_and_migrate, resolve_database_url};

#[derive(Parser, Debug)]
pub struct MigrateArgs {
    /// Database URL (overrides config)
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,
}

pub async fn run_migrate(args: MigrateArgs, config: &HolocronConfig) -> Result<()> {
    let url = resolve_database_url(args.database_url, config)?;
    connect_and_migrate(&url, config).await?;

    println!("Schema is up to date");
    Ok(())
}
