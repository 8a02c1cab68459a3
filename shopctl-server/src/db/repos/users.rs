//! User account repository
//!
//! Plain single-row access. Balance transfers go through
//! [`crate::ledger`] instead.

use sqlx::PgPool;

use super::DbError;
use crate::models::{Account, AccountId, NewAccount};

/// User account repository
pub struct UserRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a single account by id.
    pub async fn get(&self, id: AccountId) -> Result<Account, DbError> {
        sqlx::query_as::<_, Account>(
            "SELECT id, name, email, balance FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("user", id))
    }

    /// Insert an account and return the stored row.
    pub async fn create(&self, account: NewAccount) -> Result<Account, DbError> {
        let created = sqlx::query_as::<_, Account>(
            r#"
            INSERT INTO users (name, email, balance)
            VALUES ($1, $2, $3)
            RETURNING id, name, email, balance
            "#,
        )
        .bind(account.name())
        .bind(account.email())
        .bind(account.balance())
        .fetch_one(self.pool)
        .await?;

        Ok(created)
    }
}
