//! HTTP server command

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;

use shopctl_server::db::create_pool;
use shopctl_server::http::{run_server, AppState, ServerConfig};

use crate::config::StoreArgs;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', default_value = "127.0.0.1:8081")]
    pub bind: SocketAddr,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    #[command(flatten)]
    pub store: StoreArgs,
}

/// Run the HTTP server until Ctrl+C or SIGTERM
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let store = args.store.into_config()?;

    tracing::info!(
        bind = %args.bind,
        max_connections = store.max_connections,
        timeout_ms = store.timeout.as_millis() as u64,
        "Starting shopctl server"
    );

    let pool = create_pool(&store)
        .await
        .context("Failed to create database pool")?;

    let config = ServerConfig {
        bind_addr: args.bind,
        cors_permissive: args.cors_permissive,
    };

    run_server(AppState::new(pool, store.timeout), config)
        .await
        .context("Server error")?;

    Ok(())
}
