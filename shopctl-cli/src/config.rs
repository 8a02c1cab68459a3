//! Store settings shared by commands that touch the database
//!
//! Precedence: command-line flag, then environment (including `.env`),
//! then built-in default.

use std::time::Duration;

use anyhow::{ensure, Context, Result};
use clap::Args;
use shopctl_server::db::pool::{DEFAULT_MAX_CONNECTIONS, DEFAULT_TIMEOUT};
use shopctl_server::StoreConfig;

#[derive(Args, Debug, Clone)]
pub struct StoreArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Maximum pooled connections
    #[arg(long, env = "SHOPCTL_MAX_CONNECTIONS", default_value_t = DEFAULT_MAX_CONNECTIONS)]
    pub max_connections: u32,

    /// Deadline in milliseconds for each store call or transfer
    #[arg(long, env = "SHOPCTL_DB_TIMEOUT_MS", default_value_t = DEFAULT_TIMEOUT.as_millis() as u64)]
    pub db_timeout_ms: u64,
}

impl StoreArgs {
    pub fn into_config(self) -> Result<StoreConfig> {
        let database_url = self
            .database_url
            .context("DATABASE_URL not set. Set via --database-url, DATABASE_URL env, or .env")?;
        ensure!(self.max_connections > 0, "--max-connections must be at least 1");
        ensure!(self.db_timeout_ms > 0, "--db-timeout-ms must be at least 1");

        Ok(StoreConfig {
            database_url,
            max_connections: self.max_connections,
            timeout: Duration::from_millis(self.db_timeout_ms),
        })
    }
}
