//! Endpoint table

use anyhow::Result;
use clap::Parser;

use holocron_server::http::routes::ENDPOINTS;

#[derive(Parser, Debug)]
pub struct RoutesArgs {
    /// Print as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

pub fn run_routes(args: RoutesArgs) -> Result<()> {
    if args.json {
        println!("{}", serde_json::to_string_pretty(ENDPOINTS)?);
        return Ok(());
    }

    for endpoint in ENDPOINTS {
        println!(
            "{:<7} {:<24} {}",
            endpoint.method, endpoint.path, endpoint.description
        );
    }
    Ok(())
}
