//! Database layer - connection pool and repositories
//!
//! # Design Principles
//!
//! - One shared PgPool, no Arc<Mutex<Connection>>
//! - Catalog listing uses a single JOIN query
//! - Every store call runs under a deadline
//! - Multi-step balance changes run in one transaction (see `ledger`)

pub mod error;
pub mod pool;
pub mod repos;

pub use error::DbError;
pub use pool::{create_pool, with_timeout, StoreConfig};
pub use repos::*;
