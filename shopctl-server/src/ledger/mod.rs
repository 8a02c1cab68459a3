//! Account balance ledger
//!
//! The transfer executor talks to the store through two traits:
//! [`Ledger`] opens a transaction scope and [`LedgerScope`] is the scope
//! itself. A scope is owned by exactly one transfer. It ends by being
//! consumed by `commit`/`rollback`, or by being dropped, which must
//! discard every change made through it.
//!
//! Implementations:
//! - [`PgLedger`]: PostgreSQL via a sqlx transaction
//! - [`MemoryLedger`]: in-process balances, used by tests and tooling

pub mod memory;
pub mod postgres;
pub mod transfer;

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::db::DbError;
use crate::models::AccountId;

pub use memory::MemoryLedger;
pub use postgres::PgLedger;
pub use transfer::{TransferError, TransferExecutor};

/// Source of transaction scopes
#[async_trait]
pub trait Ledger: Send + Sync {
    type Scope: LedgerScope;

    /// Open a new transaction scope.
    async fn begin(&self) -> Result<Self::Scope, DbError>;
}

/// One open transaction against account balances
#[async_trait]
pub trait LedgerScope: Send {
    /// Subtract `amount` from the account's balance.
    ///
    /// Fails with `NotFound` if no such account exists.
    async fn debit(&mut self, account: AccountId, amount: Decimal) -> Result<(), DbError>;

    /// Add `amount` to the account's balance.
    ///
    /// Fails with `NotFound` if no such account exists.
    async fn credit(&mut self, account: AccountId, amount: Decimal) -> Result<(), DbError>;

    /// Read the balance as seen inside this scope.
    async fn balance(&mut self, account: AccountId) -> Result<Decimal, DbError>;

    async fn commit(self) -> Result<(), DbError>;

    async fn rollback(self) -> Result<(), DbError>;
}
