//! In-process ledger
//!
//! A scope holds the ledger lock for its whole lifetime and works on a
//! private copy of the balances. Commit publishes the copy; rollback or
//! drop throws it away. Scopes are therefore fully serialized.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;
use tokio::sync::{Mutex, OwnedMutexGuard};

use super::{Ledger, LedgerScope};
use crate::db::DbError;
use crate::models::AccountId;

type Balances = HashMap<AccountId, Decimal>;

/// Shared in-memory balances
#[derive(Debug, Clone, Default)]
pub struct MemoryLedger {
    balances: Arc<Mutex<Balances>>,
}

impl MemoryLedger {
    pub fn with_balances(balances: impl IntoIterator<Item = (AccountId, Decimal)>) -> Self {
        Self {
            balances: Arc::new(Mutex::new(balances.into_iter().collect())),
        }
    }

    /// Committed balance of an account, waiting for any open scope.
    pub async fn balance_of(&self, account: AccountId) -> Option<Decimal> {
        self.balances.lock().await.get(&account).copied()
    }

    /// Committed balances of all accounts.
    pub async fn snapshot(&self) -> Balances {
        self.balances.lock().await.clone()
    }
}

/// Open scope over a [`MemoryLedger`]
#[derive(Debug)]
pub struct MemoryScope {
    committed: OwnedMutexGuard<Balances>,
    staged: Balances,
}

impl MemoryScope {
    fn entry(&mut self, account: AccountId) -> Result<&mut Decimal, DbError> {
        self.staged
            .get_mut(&account)
            .ok_or_else(|| DbError::not_found("account", account))
    }

    fn apply(
        &mut self,
        account: AccountId,
        op: impl FnOnce(Decimal) -> Option<Decimal>,
    ) -> Result<(), DbError> {
        let balance = self.entry(account)?;
        *balance = op(*balance).ok_or(DbError::Overflow { account })?;
        Ok(())
    }
}

#[async_trait]
impl Ledger for MemoryLedger {
    type Scope = MemoryScope;

    async fn begin(&self) -> Result<MemoryScope, DbError> {
        let committed = Arc::clone(&self.balances).lock_owned().await;
        let staged = committed.clone();
        Ok(MemoryScope { committed, staged })
    }
}

#[async_trait]
impl LedgerScope for MemoryScope {
    async fn debit(&mut self, account: AccountId, amount: Decimal) -> Result<(), DbError> {
        self.apply(account, |balance| balance.checked_sub(amount))
    }

    async fn credit(&mut self, account: AccountId, amount: Decimal) -> Result<(), DbError> {
        self.apply(account, |balance| balance.checked_add(amount))
    }

    async fn balance(&mut self, account: AccountId) -> Result<Decimal, DbError> {
        self.entry(account).map(|balance| *balance)
    }

    async fn commit(self) -> Result<(), DbError> {
        let MemoryScope {
            mut committed,
            staged,
        } = self;
        *committed = staged;
        Ok(())
    }

    async fn rollback(self) -> Result<(), DbError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(v: i64) -> Decimal {
        Decimal::from(v)
    }

    #[tokio::test]
    async fn commit_publishes_changes() {
        let ledger = MemoryLedger::with_balances([(1, dec(10))]);
        let mut scope = ledger.begin().await.unwrap();
        scope.credit(1, dec(5)).await.unwrap();
        scope.commit().await.unwrap();

        assert_eq!(ledger.balance_of(1).await, Some(dec(15)));
    }

    #[tokio::test]
    async fn drop_discards_changes() {
        let ledger = MemoryLedger::with_balances([(1, dec(10))]);
        {
            let mut scope = ledger.begin().await.unwrap();
            scope.debit(1, dec(3)).await.unwrap();
            assert_eq!(scope.balance(1).await.unwrap(), dec(7));
        }

        assert_eq!(ledger.balance_of(1).await, Some(dec(10)));
    }

    #[tokio::test]
    async fn missing_account_is_not_found() {
        let ledger = MemoryLedger::default();
        let mut scope = ledger.begin().await.unwrap();
        let err = scope.credit(9, dec(1)).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { resource: "account", .. }));
    }

    #[tokio::test]
    async fn overflow_is_an_error() {
        let ledger = MemoryLedger::with_balances([(1, Decimal::MAX), (2, Decimal::MIN)]);
        let mut scope = ledger.begin().await.unwrap();

        let err = scope.credit(1, dec(1)).await.unwrap_err();
        assert!(matches!(err, DbError::Overflow { account: 1 }));
        let err = scope.debit(2, dec(1)).await.unwrap_err();
        assert!(matches!(err, DbError::Overflow { account: 2 }));

        assert_eq!(scope.balance(1).await.unwrap(), Decimal::MAX);
    }
}
