//! PostgreSQL ledger backed by the `users` table

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, Transaction};

use super::{Ledger, LedgerScope};
use crate::db::DbError;
use crate::models::AccountId;

const DEBIT: &str = "UPDATE users SET balance = balance - $1 WHERE id = $2";
const CREDIT: &str = "UPDATE users SET balance = balance + $1 WHERE id = $2";
const BALANCE: &str = "SELECT balance FROM users WHERE id = $1";

/// Ledger over a shared connection pool
#[derive(Debug, Clone)]
pub struct PgLedger {
    pool: PgPool,
}

impl PgLedger {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Open sqlx transaction.
///
/// Dropping it without commit rolls back when the connection returns to
/// the pool.
pub struct PgLedgerScope {
    tx: Transaction<'static, Postgres>,
}

impl PgLedgerScope {
    async fn adjust(
        &mut self,
        statement: &'static str,
        account: AccountId,
        amount: Decimal,
    ) -> Result<(), DbError> {
        let result = sqlx::query(statement)
            .bind(amount)
            .bind(account)
            .execute(&mut *self.tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("account", account));
        }
        Ok(())
    }
}

#[async_trait]
impl Ledger for PgLedger {
    type Scope = PgLedgerScope;

    async fn begin(&self) -> Result<PgLedgerScope, DbError> {
        let tx = self.pool.begin().await?;
        Ok(PgLedgerScope { tx })
    }
}

#[async_trait]
impl LedgerScope for PgLedgerScope {
    async fn debit(&mut self, account: AccountId, amount: Decimal) -> Result<(), DbError> {
        self.adjust(DEBIT, account, amount).await
    }

    async fn credit(&mut self, account: AccountId, amount: Decimal) -> Result<(), DbError> {
        self.adjust(CREDIT, account, amount).await
    }

    async fn balance(&mut self, account: AccountId) -> Result<Decimal, DbError> {
        sqlx::query_scalar::<_, Decimal>(BALANCE)
            .bind(account)
            .fetch_optional(&mut *self.tx)
            .await?
            .ok_or_else(|| DbError::not_found("account", account))
    }

    async fn commit(self) -> Result<(), DbError> {
        Ok(self.tx.commit().await?)
    }

    async fn rollback(self) -> Result<(), DbError> {
        Ok(self.tx.rollback().await?)
    }
}
