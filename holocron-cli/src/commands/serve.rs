//! HTTP server command
//!
//! Runs the API against Postgres, or against an in-memory store seeded with
//! the bundled catalog when `--memory` is given.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use holocron_server::http::run_server;
use holocron_server::models::UserId;
use holocron_server::{HolocronConfig, MemoryStore, SeedData, ServerConfig, Store};

use super::{connect_and_migrate, resolve_database_url};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to (default: 127.0.0.1:3000)
    #[arg(long, short = 'b')]
    pub bind: Option<SocketAddr>,

    /// Database URL (overrides config)
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    /// Use an in-memory store preloaded with the bundled catalog
    /// (any database URL is ignored)
    #[arg(long)]
    pub memory: bool,

    /// Load the bundled catalog before serving
    #[arg(long)]
    pub seed: bool,

    /// User whose favorites the API manages
    #[arg(long, value_name = "ID")]
    pub user_id: Option<i32>,

    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,
}

impl ServeArgs {
    fn server_config(&self, config: &HolocronConfig) -> ServerConfig {
        let mut server = config.server_config();
        if let Some(bind) = self.bind {
            server.bind_addr = bind;
        }
        if let Some(id) = self.user_id {
            server.acting_user = UserId(id);
        }
        if let Some(secs) = self.timeout {
            server.request_timeout = Duration::from_secs(secs);
        }
        server.cors_permissive |= self.cors_permissive;
        server
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs, config: &HolocronConfig) -> Result<()> {
    let server = args.server_config(config);

    let store: Arc<dyn Store> = if args.memory {
        tracing::warn!("Using in-memory store - data is lost on shutdown");
        Arc::new(MemoryStore::new())
    } else {
        let url = resolve_database_url(args.database_url.clone(), config)?;
        Arc::new(connect_and_migrate(&url, config).await?)
    };

    if args.memory || args.seed {
        let data = SeedData::bundled().context("Bundled catalog is invalid")?;
        data.apply(store.as_ref())
            .await
            .context("Failed to seed catalog")?;
    }

    tracing::info!("Starting holocron server on {}", server.bind_addr);

    // Run server (blocks until shutdown)
    run_server(store, server).await.context("Server error")?;

    Ok(())
}
