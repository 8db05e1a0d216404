//! Threat Console CLI
//!
//! Command-line front end for the crowd threat status console.

use std::path::PathBuf;

use clap::Parser;
use threat_console::{load_config, Config};
use tracing::Level;

#[derive(Parser)]
#[command(name = "threat-console")]
#[command(about = "Crowd threat status console and camera switcher")]
#[command(version)]
struct Args {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Backend base URL (overrides config file)
    #[arg(long)]
    server_url: Option<String>,

    /// Status poll interval in milliseconds (overrides config file)
    #[arg(long)]
    poll_interval_ms: Option<u64>,

    /// Log level
    #[arg(short, long, default_value = "info")]
    log_level: Level,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .init();

    tracing::debug!(
        "Parsed command line arguments: config={:?}, server_url={:?}, poll_interval_ms={:?}, log_level={:?}",
        args.config,
        args.server_url,
        args.poll_interval_ms,
        args.log_level
    );

    let mut config = if let Some(config_path) = &args.config {
        tracing::debug!("Loading configuration from {:?}", config_path);
        load_config(config_path)?
    } else {
        tracing::debug!("Using default configuration");
        Config::default()
    };

    if let Some(server_url) = args.server_url {
        config.server.base_url = server_url;
    }
    if let Some(poll_interval_ms) = args.poll_interval_ms {
        config.polling.interval_ms = poll_interval_ms;
    }

    tracing::info!("Starting threat console against {}", config.server.base_url);
    tracing::info!("Type a camera number and press enter to switch cameras, 'q' to quit");

    threat_console::run(config).await?;

    Ok(())
}
