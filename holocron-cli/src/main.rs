//! holocron CLI - Star Wars catalog and favorites API
//!
//! Subcommands:
//! - `serve`: run the HTTP API (Postgres or in-memory)
//! - `migrate`: create the schema
//! - `seed`: load catalog fixtures
//! - `routes`: print the endpoint table

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use holocron_server::HolocronConfig;

mod commands;
mod tracing_setup;

use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "holocron",
    author,
    version,
    about = "Star Wars catalog and favorites API",
    long_about = "Serve people, planets and users from Postgres, and let the configured user \
                  keep a list of favorite planets and characters."
)]
struct Cli {
    /// Debug logging for holocron and the HTTP layer (RUST_LOG still wins)
    #[arg(long, global = true)]
    debug: bool,

    /// Export traces over OTLP (requires the `telemetry` feature)
    #[arg(long, global = true)]
    otel: bool,

    /// Config file (default: ~/.holocron/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),
    /// Create or update the database schema
    Migrate(commands::migrate::MigrateArgs),
    /// Load users, planets and people from a fixture file
    Seed(commands::seed::SeedArgs),
    /// Print the endpoints the server exposes
    Routes(commands::routes::RoutesArgs),
    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}

#[derive(Parser, Debug)]
struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    shell: Shell,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)] // PowerShell is a proper noun, not a suffix
enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    tracing_setup::init(&TracingConfig {
        debug: cli.debug,
        otel: cli.otel,
    })
    .ok();

    let result = run(cli).await;
    tracing_setup::shutdown_otel();
    result
}

async fn run(cli: Cli) -> Result<()> {
    // Only commands that touch the server need config
    let load_config = || {
        HolocronConfig::load(cli.config.as_deref()).context("Failed to load configuration")
    };

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args, &load_config()?).await?,
        Commands::Migrate(args) => commands::run_migrate(args, &load_config()?).await?,
        Commands::Seed(args) => commands::run_seed(args, &load_config()?).await?,
        Commands::Routes(args) => commands::run_routes(args)?,
        Commands::Completions(args) => run_completions(args)?,
    }

    Ok(())
}

fn run_completions(args: CompletionsArgs) -> Result<()> {
    use clap::CommandFactory;
    use clap_complete::{generate, Shell as CompletionShell};
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();

    let shell = match args.shell {
        Shell::Bash => CompletionShell::Bash,
        Shell::Zsh => CompletionShell::Zsh,
        Shell::Fish => CompletionShell::Fish,
        Shell::PowerShell => CompletionShell::PowerShell,
        Shell::Elvish => CompletionShell::Elvish,
    };

    generate(shell, &mut cmd, bin_name, &mut io::stdout());

    Ok(())
}
