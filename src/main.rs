//! Allowlisted HTTP fetch proxy.
//!
//! Fetches `?url=<target>` server-side and relays the body, content type and
//! a fixed set of CORS/caching headers back to the caller.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌──────────────────────────────────────────────┐
//!                      │                 FETCH PROXY                  │
//!   GET /?url=...      │  ┌────────┐   ┌───────────┐   ┌───────────┐  │
//!   ───────────────────┼─▶│  http  │──▶│ forwarder │──▶│ security  │  │
//!                      │  │ server │   │           │   │ allowlist │  │
//!                      │  └────────┘   └─────┬─────┘   └───────────┘  │
//!                      │                     ▼                        │
//!                      │              ┌─────────────┐  ┌──────────┐   │
//!                      │              │ resilience  │─▶│ upstream │───┼──▶ Origin
//!                      │              │retry+backoff│  │ (reqwest)│   │
//!                      │              └─────────────┘  └──────────┘   │
//!   200 / 4xx / 502    │  ┌──────────┐   ┌──────────┐                 │
//!   ◀──────────────────┼──│ response │◀──│  limits  │                 │
//!                      │  └──────────┘   └──────────┘                 │
//!                      └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use fetch_proxy::config::{self, ConfigError, FetchProxyConfig};
use fetch_proxy::observability::{logging, metrics};
use fetch_proxy::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "fetch-proxy", version)]
#[command(about = "Allowlisted HTTP fetch proxy", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file. Compiled defaults are used when absent.
    #[arg(short, long, env = "FETCH_PROXY_CONFIG")]
    config: Option<PathBuf>,

    /// Override `listener.bind_address`.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => FetchProxyConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
        config::validation::validate_config(&config).map_err(ConfigError::Validation)?;
    }

    logging::init_logging(&config.observability);

    tracing::info!("fetch-proxy v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        config_path = ?cli.config,
        bind_address = %config.listener.bind_address,
        allowed_host_suffix = %config.upstream.allowed_host_suffix,
        max_body_bytes = config.upstream.max_body_bytes,
        max_attempts = config.retries.max_attempts,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr)?,
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;

    let shutdown = Shutdown::new();
    shutdown.trigger_on_signal();

    let server = HttpServer::new(config)?;
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
