//! cast-history - list recent publish history

use chrono::DateTime;
use clap::Parser;
use std::sync::Arc;

use libcrosscast::api::ApiClient;
use libcrosscast::{Config, Result, Session};

#[derive(Parser, Debug)]
#[command(name = "cast-history")]
#[command(about = "List recently published posts", long_about = None)]
struct Cli {
    /// Maximum number of entries to show
    #[arg(short, long, default_value_t = 20)]
    limit: usize,

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

fn format_timestamp(timestamp: Option<i64>) -> String {
    timestamp
        .and_then(|ts| DateTime::from_timestamp(ts, 0))
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn truncate(content: &str, max: usize) -> String {
    let flat = content.replace('\n', " ");
    if flat.chars().count() <= max {
        flat
    } else {
        let cut: String = flat.chars().take(max).collect();
        format!("{}…", cut)
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;
    let session = Session::resolve(&config.auth);
    session.require_token()?;
    let api = Arc::new(ApiClient::new(&config.api, session)?);

    let entries = api.recent_history(cli.limit).await?;

    if cli.format == "json" {
        println!("{}", serde_json::to_string_pretty(&entries).expect("entries serialize"));
        return Ok(());
    }

    if entries.is_empty() {
        println!("No publish history yet.");
        return Ok(());
    }

    for entry in entries {
        let url = entry
            .published_urls
            .first()
            .map(String::as_str)
            .unwrap_or("-");
        println!(
            "{}  {:<10} {}  {}",
            format_timestamp(entry.published_at),
            entry.platforms.join(","),
            truncate(&entry.post_content, 60),
            url
        );
    }

    Ok(())
}
