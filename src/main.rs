//! Bilibili parts proxy.
//!
//! Resolves a BV id or video link to the video's part list via Bilibili's
//! page-list API and returns it as JSON.
//!
//! # Architecture Overview
//!
//! ```text
//!                 ┌──────────────────────────────────────────────────────┐
//!                 │                  PARTS PROXY                         │
//!                 │                                                      │
//!   GET /bilibili-parts?url=...                                          │
//!   ──────────────┼─▶ request id ─▶ cors ─▶ handler                      │
//!                 │                           │                          │
//!                 │                           ▼                          │
//!                 │                      extractor (BV id)               │
//!                 │                           │                          │
//!                 │                           ▼                          │
//!                 │                      client ───────────────────────┼──▶ api.bilibili.com
//!                 │                           │                          │   /x/player/pagelist
//!                 │                           ▼                          │
//!   ◀─────────────┼──────────────────── translate {"parts": [...]}       │
//!                 └──────────────────────────────────────────────────────┘
//! ```

use std::net::SocketAddr;
use tokio::net::TcpListener;

use bilibili_parts_proxy::config;
use bilibili_parts_proxy::lifecycle::{signals, Shutdown};
use bilibili_parts_proxy::observability::{logging, metrics};
use bilibili_parts_proxy::HttpServer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    logging::init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "bilibili-parts-proxy starting");

    let config = config::load_from_env()?;

    tracing::info!(
        bind_address = %config.listener.bind_address(),
        allowed_origins = ?config.cors.allowed_origins,
        api_timeout_secs = config.upstream.timeout_secs,
        debug = config.observability.debug,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        if let Err(e) = metrics::init_metrics(addr) {
            tracing::error!(error = %e, "Failed to start metrics exporter");
        }
    }

    let listener = TcpListener::bind(config.listener.bind_address()).await?;
    let server = HttpServer::new(config)?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        if let Err(e) = signals::wait_for_signal().await {
            tracing::error!(error = %e, "Failed to listen for signals");
        }
        shutdown.trigger();
    });

    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
