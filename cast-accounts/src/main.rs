//! cast-accounts - show connection status for social accounts

use clap::Parser;
use serde_json::json;
use std::sync::Arc;

use libcrosscast::api::{ApiClient, TokenStore};
use libcrosscast::{Config, Platform, Result, Session};

#[derive(Parser, Debug)]
#[command(name = "cast-accounts")]
#[command(about = "Show connection status of your social accounts", long_about = None)]
struct Cli {
    /// Output format (text or json)
    #[arg(short, long, default_value = "text")]
    format: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("debug")
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter("error")
            .with_writer(std::io::stderr)
            .init();
    }

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }
}

fn describe(connected: bool, expired: bool) -> &'static str {
    match (connected, expired) {
        (false, _) => "not connected",
        (true, true) => "expired",
        (true, false) => "connected",
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;
    let session = Session::resolve(&config.auth);
    session.require_token()?;
    let api = Arc::new(ApiClient::new(&config.api, session)?);

    let mut rows = Vec::new();
    for platform in Platform::all() {
        match api.platform_token(platform).await {
            Ok(status) => rows.push((platform, describe(status.connected, status.expired))),
            Err(e) => {
                tracing::warn!("status lookup for {} failed: {}", platform, e);
                rows.push((platform, "unavailable"));
            }
        }
    }

    if cli.format == "json" {
        let entries: Vec<_> = rows
            .iter()
            .map(|(platform, status)| {
                json!({ "platform": platform.to_string(), "status": status })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries).expect("rows serialize"));
    } else {
        for (platform, status) in rows {
            println!("{:<10} {}", platform.to_string(), status);
        }
    }

    Ok(())
}
