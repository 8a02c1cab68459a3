//! Atomic balance transfer
//!
//! Protocol, all on one scope:
//! 1. begin
//! 2. debit source
//! 3. credit destination
//! 4. re-read source balance
//! 5. negative balance: roll back with `InsufficientFunds`
//! 6. otherwise commit
//!
//! Amounts and account pairs are not checked here; the balance re-read is
//! the only gate. Callers that want stricter input use `Transfer::checked`.

use std::time::Duration;

use rust_decimal::Decimal;
use tracing::{error, info, warn};

use super::{Ledger, LedgerScope};
use crate::db::DbError;
use crate::models::{AccountId, Transfer, TransferReceipt};

/// Transfer failure
#[derive(Debug, thiserror::Error)]
pub enum TransferError {
    /// Store call failed (or timed out); the scope was rolled back
    #[error(transparent)]
    Store(#[from] DbError),

    /// Source balance would end up negative; the scope was rolled back
    #[error("insufficient funds in account {account}: balance would be {balance}")]
    InsufficientFunds { account: AccountId, balance: Decimal },

    /// Rolling back after `cause` failed too
    #[error("{cause} (rollback failed: {rollback})")]
    RollbackFailed {
        cause: Box<TransferError>,
        rollback: DbError,
    },
}

impl TransferError {
    /// The failure that aborted the transfer, looking through rollback errors.
    pub fn primary(&self) -> &TransferError {
        match self {
            Self::RollbackFailed { cause, .. } => cause.primary(),
            other => other,
        }
    }

    /// Owned form of [`primary`](Self::primary).
    pub fn into_primary(self) -> TransferError {
        match self {
            Self::RollbackFailed { cause, .. } => cause.into_primary(),
            other => other,
        }
    }
}

/// Runs transfers against a ledger, each under a deadline
#[derive(Debug, Clone)]
pub struct TransferExecutor<L> {
    ledger: L,
    timeout: Duration,
}

impl<L: Ledger> TransferExecutor<L> {
    pub fn new(ledger: L, timeout: Duration) -> Self {
        Self { ledger, timeout }
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Execute one transfer. Never retries.
    ///
    /// If the deadline passes mid-transfer the open scope is dropped, which
    /// rolls it back, and `Store(DbError::Timeout)` is returned.
    #[tracing::instrument(
        name = "transfer",
        skip_all,
        fields(from = transfer.from, to = transfer.to, amount = %transfer.amount)
    )]
    pub async fn execute(&self, transfer: Transfer) -> Result<TransferReceipt, TransferError> {
        match tokio::time::timeout(self.timeout, self.run(&transfer)).await {
            Ok(result) => result,
            Err(_) => {
                let millis = self.timeout.as_millis() as u64;
                warn!(millis, "transfer timed out, scope dropped");
                Err(DbError::Timeout { millis }.into())
            }
        }
    }

    async fn run(&self, transfer: &Transfer) -> Result<TransferReceipt, TransferError> {
        let mut scope = self.ledger.begin().await?;

        match apply(&mut scope, transfer).await {
            Ok(from_balance) => {
                scope.commit().await?;
                info!(%from_balance, "transfer committed");
                Ok(TransferReceipt {
                    from: transfer.from,
                    to: transfer.to,
                    amount: transfer.amount,
                    from_balance,
                })
            }
            Err(cause) => Err(abort(scope, cause).await),
        }
    }
}

/// Steps 2-5. Returns the re-read source balance.
async fn apply<S: LedgerScope>(scope: &mut S, transfer: &Transfer) -> Result<Decimal, TransferError> {
    scope.debit(transfer.from, transfer.amount).await?;
    scope.credit(transfer.to, transfer.amount).await?;

    let balance = scope.balance(transfer.from).await?;
    if balance < Decimal::ZERO {
        return Err(TransferError::InsufficientFunds {
            account: transfer.from,
            balance,
        });
    }
    Ok(balance)
}

async fn abort<S: LedgerScope>(scope: S, cause: TransferError) -> TransferError {
    match scope.rollback().await {
        Ok(()) => {
            warn!(error = %cause, "transfer rolled back");
            cause
        }
        Err(rollback) => {
            error!(error = %cause, rollback_error = %rollback, "transfer rollback failed");
            TransferError::RollbackFailed {
                cause: Box::new(cause),
                rollback,
            }
        }
    }
}
