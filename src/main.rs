//! Upstream Probe
//!
//! A small service that exercises four escalating strategies for bounding
//! the lifetime of an outbound HTTP call made while serving an inbound
//! request.
//!
//! # Architecture Overview
//!
//! ```text
//!                        ┌───────────────────────────────────────────────┐
//!                        │                 UPSTREAM PROBE                │
//!                        │                                               │
//!    GET /probe/<s>      │  ┌────────┐     ┌──────────────────────────┐  │
//!    ────────────────────┼─▶│  http  │────▶│ waiting strategy         │  │
//!                        │  │ server │     │ unbounded / deadline /   │  │
//!                        │  └────────┘     │ gate / context           │  │
//!                        │                 └────────────┬─────────────┘  │
//!                        │                              ▼                │
//!                        │                 ┌──────────────────────────┐  │    slow
//!                        │                 │ outbound call executor   │──┼─▶ upstream
//!                        │                 │ spawn → complete         │  │   (may never
//!                        │                 │ or abort → drain         │  │    answer)
//!                        │                 └──────────────────────────┘  │
//!                        └───────────────────────────────────────────────┘
//! ```
//!
//! The same process serves `POST /upstream`, a deliberately slow endpoint
//! standing in for an arbitrary downstream service. Outcomes are visible in
//! the logs only; inbound callers get an empty 200 either way.

use std::path::Path;

use tokio::net::TcpListener;

use upstream_probe::config::{self, AppConfig};
use upstream_probe::http::HttpServer;
use upstream_probe::lifecycle::Shutdown;
use upstream_probe::observability::logging;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();

    tracing::info!("upstream-probe v0.1.0 starting");

    // Load configuration from an optional TOML path; defaults otherwise.
    let config = match std::env::args().nth(1) {
        Some(path) => config::load_config(Path::new(&path))?,
        None => AppConfig::default(),
    };

    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream_url = %config.upstream.url,
        call_bound_ms = config.timeouts.call_ms,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config)?;
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
