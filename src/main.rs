use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use localcast::{ResponseComposer, ServiceConfig, logging, web};

/// Localized current weather and nearby places for a coordinate.
///
/// Provider credentials come from the config file or LOCALCAST_* environment
/// variables, e.g. LOCALCAST_WEATHER__API_KEY.
#[derive(Parser)]
#[command(name = "localcast", version, about, long_about = None)]
struct Cli {
    /// Path to a TOML config file. Defaults to the user config directory.
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Override the configured bind host.
    #[arg(long)]
    host: Option<String>,

    /// Override the configured port.
    #[arg(long, short = 'p')]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = ServiceConfig::load_from_path(cli.config)
        .context("Failed to load configuration")?;
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    logging::init(&config.logging)?;

    let composer = ResponseComposer::from_config(&config)
        .map_err(|e| anyhow::anyhow!(e.user_message()))?;

    web::run(&config.server, Arc::new(composer)).await?;
    Ok(())
}
