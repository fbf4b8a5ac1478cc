//! Command implementations for the holocron CLI

pub mod migrate;
pub mod routes;
pub mod seed;
pub mod serve;

use anyhow::{Context, Result};
use holocron_server::db::{create_pool_with_options, migrations};
use holocron_server::{HolocronConfig, PgStore};

pub use migrate::run_migrate;
pub use routes::run_routes;
pub use seed::run_seed;
pub use serve::run_serve;

/// Flag (or `DATABASE_URL` via clap) wins over the config file.
fn resolve_database_url(flag: Option<String>, config: &HolocronConfig) -> Result<String> {
    flag.filter(|url| !url.trim().is_empty())
        .or_else(|| config.database.url.clone())
        .context(
            "DATABASE_URL not set. Set via --database-url, DATABASE_URL env, \
             or [database] url in ~/.holocron/config.toml",
        )
}

/// Connect and bring the schema up to date.
async fn connect_and_migrate(url: &str, config: &HolocronConfig) -> Result<PgStore> {
    let pool = create_pool_with_options(url, config.database.max_connections)
        .await
        .context("Failed to create database pool")?;

    migrations::run(&pool)
        .await
        .context("Failed to run migrations")?;

    Ok(PgStore::new(pool))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_beats_config() {
        let mut config = HolocronConfig::default();
        config.database.url = Some("postgres://config/holocron".into());

        let url = resolve_database_url(Some("postgres://flag/holocron".into()), &config).unwrap();
        assert_eq!(url, "postgres://flag/holocron");

        let url = resolve_database_url(None, &config).unwrap();
        assert_eq!(url, "postgres://config/holocron");
    }

    #[test]
    fn missing_url_is_an_error() {
        let err = resolve_database_url(Some("  ".into()), &HolocronConfig::default()).unwrap_err();
        assert!(err.to_string().contains("DATABASE_URL not set"));
    }
}
