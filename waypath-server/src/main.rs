//! Campus wayfinding HTTP service.
//!
//! Serves walking routes over the surveyed path network, with an optional
//! remote routing provider and a straight-line fallback behind it.
//!
//! # Endpoints
//!
//! - `POST /api/v1/route` - Route between two coordinates
//! - `POST /api/v1/route/location` - Route to a catalog location by id
//! - `GET /api/v1/locations` - Browse and search the location catalog
//! - `GET /health` - Liveness probe with model counts
//!
//! # Configuration
//!
//! Settings come from a TOML file (`waypath.toml` by default); `--listen`
//! overrides the bind address. Log filtering follows `RUST_LOG`.

mod api;
mod config;
mod remote;
mod state;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tokio::signal;
use tracing::info;
use tracing_subscriber::EnvFilter;

use waypath_core::{NavModelConfig, create_nav_model};

use crate::config::ServerConfig;
use crate::remote::RemoteProvider;
use crate::state::AppState;

#[derive(Parser)]
struct Cli {
    /// Path to the server configuration file
    #[arg(short, long, default_value = "waypath.toml")]
    config: PathBuf,

    /// Bind address, overriding the configuration file
    #[arg(long)]
    listen: Option<SocketAddr>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let mut config = ServerConfig::load(&cli.config)?;
    if let Some(listen) = cli.listen {
        config.listen = listen;
    }

    let model = create_nav_model(&NavModelConfig {
        paths_path: config.data.paths.clone(),
        locations_path: config.data.locations.clone(),
    })?;

    let remote = match &config.remote {
        Some(remote_config) => {
            let provider = RemoteProvider::new(
                &remote_config.url,
                Duration::from_secs(remote_config.timeout_secs),
            )?;
            info!(url = %remote_config.url, "remote routing enabled");
            Some(provider)
        }
        None => None,
    };

    let app = api::build_router(
        AppState::new(model, remote),
        Duration::from_secs(config.request_timeout_secs),
        config.concurrency_limit,
    );

    info!(addr = %config.listen, "listening on");
    let listener = tokio::net::TcpListener::bind(config.listen).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
    info!("shutting down");
}
