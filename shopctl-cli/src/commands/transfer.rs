//! One-shot balance transfer

use anyhow::{Context, Result};
use clap::Parser;
use rust_decimal::Decimal;

use shopctl_server::db::create_pool;
use shopctl_server::ledger::{PgLedger, TransferExecutor};
use shopctl_server::models::Transfer;

use crate::config::StoreArgs;

/// Arguments for the transfer command
#[derive(Parser, Debug)]
pub struct TransferArgs {
    /// Source account id
    #[arg(long)]
    pub from: i64,

    /// Destination account id
    #[arg(long)]
    pub to: i64,

    /// Amount to move (must be greater than zero)
    #[arg(long)]
    pub amount: Decimal,

    #[command(flatten)]
    pub store: StoreArgs,
}

/// Execute one transfer and print the receipt as JSON
pub async fn run_transfer(args: TransferArgs) -> Result<()> {
    let transfer = Transfer::checked(args.from, args.to, args.amount)?;
    let store = args.store.into_config()?;

    let pool = create_pool(&store)
        .await
        .context("Failed to create database pool")?;
    let executor = TransferExecutor::new(PgLedger::new(pool), store.timeout);

    let receipt = executor
        .execute(transfer)
        .await
        .with_context(|| format!("Transfer {} -> {} failed", args.from, args.to))?;

    println!("{}", serde_json::to_string_pretty(&receipt)?);
    Ok(())
}
