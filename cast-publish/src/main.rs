//! cast-publish - publish generated posts through connected social accounts

use clap::Parser;
use std::io::Read;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use libcrosscast::api::{ApiClient, GenerateRequest, TokenStore};
use libcrosscast::history::{HistoryRecorder, HistoryStore};
use libcrosscast::platforms::create_publishers;
use libcrosscast::{
    BatchPublisher, Config, CrosscastError, Event, EventBus, GeneratedPost, Platform,
    PublishContext, PublishReport, Result, Session,
};

#[derive(Parser, Debug)]
#[command(name = "cast-publish")]
#[command(about = "Publish platform-targeted posts through connected social accounts", long_about = None)]
struct Cli {
    /// JSON file of generated posts (reads from stdin if not provided)
    posts: Option<PathBuf>,

    /// Generate posts from a prompt instead of reading them
    #[arg(short = 'g', long)]
    prompt: Option<String>,

    /// Target specific platform(s) (comma-separated)
    #[arg(short, long)]
    platform: Option<String>,

    /// Target Facebook page id
    #[arg(long)]
    page_id: Option<String>,

    /// Target YouTube channel id
    #[arg(long)]
    channel_id: Option<String>,

    /// Thumbnail URL override for video posts
    #[arg(long)]
    thumbnail: Option<String>,

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

    // Initialize logging
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

    match run(cli).await {
        Ok(report) => {
            if !report.all_succeeded() {
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(e.exit_code());
        }
    }
}

fn parse_platform_filter(raw: &str) -> Result<Vec<Platform>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| Platform::from_str(s).map_err(CrosscastError::InvalidInput))
        .collect()
}

fn read_posts(cli: &Cli) -> Result<Vec<GeneratedPost>> {
    let content = match &cli.posts {
        Some(path) => std::fs::read_to_string(path).map_err(|e| {
            CrosscastError::InvalidInput(format!("cannot read {}: {}", path.display(), e))
        })?,
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer).map_err(|e| {
                CrosscastError::InvalidInput(format!("cannot read posts from stdin: {}", e))
            })?;
            buffer
        }
    };

    serde_json::from_str(&content)
        .map_err(|e| CrosscastError::InvalidInput(format!("invalid posts JSON: {}", e)))
}

async fn run(cli: Cli) -> Result<PublishReport> {
    let config = Config::load()?;
    let session = Session::resolve(&config.auth);
    let api = Arc::new(ApiClient::new(&config.api, session.clone())?);

    let filter = cli
        .platform
        .as_deref()
        .map(parse_platform_filter)
        .transpose()?;

    let mut posts: Vec<GeneratedPost> = if let Some(prompt) = &cli.prompt {
        let platforms = match &filter {
            Some(platforms) => platforms.clone(),
            None => config
                .defaults
                .platforms
                .iter()
                .map(|s| Platform::from_str(s).map_err(CrosscastError::InvalidInput))
                .collect::<Result<Vec<_>>>()?,
        };
        api.generate_posts(&GenerateRequest {
            prompt: prompt.clone(),
            platforms,
        })
        .await?
    } else {
        read_posts(&cli)?
    };

    if let Some(platforms) = &filter {
        posts.retain(|p| platforms.contains(&p.platform));
    }
    if posts.is_empty() {
        return Err(CrosscastError::InvalidInput(
            "no posts to publish".to_string(),
        ));
    }

    let ctx = PublishContext {
        facebook_page_id: cli.page_id.clone(),
        youtube_channel_id: cli.channel_id.clone(),
        thumbnail_url: cli.thumbnail.clone(),
    };

    let events = EventBus::new(100);
    let mut progress = events.subscribe();
    let text_output = cli.format != "json";
    let printer = tokio::spawn(async move {
        while let Ok(event) = progress.recv().await {
            if let Event::PublishProgress {
                platform, status, ..
            } = event
            {
                if text_output {
                    eprintln!("  {}: {}", platform, status);
                }
            }
        }
    });

    let tokens: Arc<dyn TokenStore> = api.clone();
    let history: Arc<dyn HistoryStore> = api.clone();
    let publisher = BatchPublisher::new(
        create_publishers(api),
        tokens,
        HistoryRecorder::new(history),
        events,
        session,
    )
    .with_inter_post_delay(Duration::from_millis(config.defaults.inter_post_delay_ms));

    let report = publisher.publish_batch(&posts, &ctx).await?;
    printer.abort();

    if cli.format == "json" {
        println!("{}", serde_json::to_string_pretty(&report).expect("report serializes"));
    } else {
        print_report(&report);
    }

    Ok(report)
}

fn print_report(report: &PublishReport) {
    println!(
        "Published to {}/{} platform(s)",
        report.summary.successful, report.summary.total
    );

    for result in &report.results {
        if result.success {
            let post_id = result.post_id.as_deref().unwrap_or("-");
            println!("  {}: ok ({})", result.platform, post_id);
        } else {
            let error = result.error.as_deref().unwrap_or("unknown error");
            let hint = if result.retryable {
                " [retry may help]"
            } else {
                ""
            };
            println!("  {}: failed - {}{}", result.platform, error, hint);
        }
    }
}
