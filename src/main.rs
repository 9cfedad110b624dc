//! Crew board gateway.
//!
//! # Architecture Overview
//!
//! ```text
//!                       ┌──────────────────────────────────────────────┐
//!                       │                 CREW BOARD                   │
//!                       │                                              │
//!   Widget / CLI        │  ┌─────────┐   ┌───────────┐   ┌──────────┐  │
//!   ────────────────────┼─▶│  http   │──▶│ handlers  │──▶│ upstream │──┼──▶ platform APIs
//!                       │  │ server  │   │ soop-*    │   │  client  │  │    (station, posts,
//!                       │  └────┬────┘   └───────────┘   └──────────┘  │     thumbnails)
//!                       │       │ fallback                             │
//!                       │       ▼                                      │
//!                       │  ┌───────────┐  ┌─────────┐                  │
//!                       │  │ dev_proxy │─▶│ routing │ (dev only)       │
//!                       │  └───────────┘  └─────────┘                  │
//!                       │                                              │
//!                       │  /board: roster ─▶ fetch_live ─▶ render      │
//!                       └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use crew_board::config::{load_config, BoardConfig};
use crew_board::lifecycle::{signals, Shutdown};
use crew_board::observability::{logging, metrics};
use crew_board::HttpServer;

#[derive(Parser)]
#[command(name = "crew-board")]
#[command(about = "CORS gateway and live roster board for streaming crews", long_about = None)]
struct Args {
    /// TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override `listener.bind_address`.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => BoardConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.listener.bind_address = bind;
    }

    logging::init(&config.observability.log_level);
    tracing::info!("crew-board v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        station_host = %config.upstream.station_host,
        request_timeout_secs = config.timeouts.request_secs,
        upstream_timeout_secs = config.timeouts.upstream_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config)?;
    let server_shutdown = shutdown.subscribe();

    let signal_shutdown = shutdown.clone();
    tokio::spawn(async move {
        signals::forward_signals(&signal_shutdown).await;
    });

    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
