use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use iptv_sentinel::{
    config::Config,
    probe::StreamProber,
    services::{CheckerService, ScraperService},
    sources::{load_source_list, HttpPlaylistFetcher},
    storage::{ChannelStore, ReportWriter},
    utils::build_http_client,
};

#[derive(Parser)]
#[command(name = "iptv-sentinel")]
#[command(version)]
#[command(about = "IPTV playlist aggregator with stream health probing")]
#[command(long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Log level
    #[arg(short = 'v', long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch source playlists and merge new channels into the store
    Scrape,
    /// Probe every stored channel and update health scores
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging with specified level
    let log_filter = format!("iptv_sentinel={}", cli.log_level);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting iptv-sentinel v{}", env!("CARGO_PKG_VERSION"));

    let config = Config::load_from_file(&cli.config)?;
    info!("Configuration loaded from: {}", cli.config);

    let client = build_http_client(&config.sources.user_agent);
    let store = ChannelStore::new(&config.storage.channels_path);

    match cli.command {
        Commands::Scrape => {
            let sources = load_source_list(&config.sources.list_path).await?;
            info!("Loaded {} sources from {}", sources.len(), config.sources.list_path.display());

            let fetcher = HttpPlaylistFetcher::new(client, config.sources.fetch_timeout());
            let scraper = ScraperService::new(fetcher);
            let outcome = scraper.run(&sources, &store).await?;
            info!(
                "Store now holds {} channels ({} new this run)",
                outcome.total_channels, outcome.new_channels
            );
        }
        Commands::Check => {
            let reports = ReportWriter::new(&config.storage.status_dir);
            let prober = StreamProber::new(client, config.probe.clone());
            let checker = CheckerService::new(prober);
            let summary = checker.run(&store, &reports).await?;
            info!(
                "Checked {} channels: {} live, {} slow, {} unstable, {} dead",
                summary.total(),
                summary.live,
                summary.slow,
                summary.unstable,
                summary.dead
            );
        }
    }

    Ok(())
}
