//! shopctl-server: filtered product catalog and account transfers over HTTP
//!
//! Two pieces carry the invariants:
//! - [`query`]: builds the catalog query with positional placeholders,
//!   never formatting request values into SQL
//! - [`ledger`]: moves balances between accounts in one transaction,
//!   rolling back when the source would go negative
//!
//! Everything else (`db`, `http`) is thin plumbing around PostgreSQL and axum.

pub mod db;
pub mod http;
pub mod ledger;
pub mod models;
pub mod query;

pub use db::{create_pool, DbError, StoreConfig};
pub use http::{run_server, AppState, ServerConfig, ServerError};
pub use ledger::{TransferError, TransferExecutor};
