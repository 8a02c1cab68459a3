//! shopctl CLI - catalog server and account balance tooling
//!
//! - `serve`: run the HTTP API (catalog filter, user lookup, transfers)
//! - `transfer`: move balance between two accounts in one transaction
//! - `products-sql`: show the parameterized catalog query for a filter

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod config;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "shopctl",
    author,
    version,
    about = "Product catalog API and atomic balance transfers over PostgreSQL"
)]
struct Cli {
    /// Debug logging (RUST_LOG still takes precedence)
    #[arg(long, global = true)]
    debug: bool,

    /// Export traces over OTLP (requires the telemetry feature)
    #[arg(long, global = true)]
    otel: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),
    /// Transfer balance between two accounts
    Transfer(commands::transfer::TransferArgs),
    /// Print the catalog query and its numbered arguments for a filter
    ProductsSql(commands::products_sql::ProductsSqlArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Missing .env is fine; real environment variables still apply
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    tracing_setup::init(&tracing_setup::TracingConfig {
        debug: cli.debug,
        otel: cli.otel,
    })?;

    let result = match cli.command {
        Commands::Serve(args) => commands::serve::run_serve(args).await,
        Commands::Transfer(args) => commands::transfer::run_transfer(args).await,
        Commands::ProductsSql(args) => commands::products_sql::run_products_sql(args),
    };

    tracing_setup::shutdown();
    result
}
