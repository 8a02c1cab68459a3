//! Product repository
//!
//! Executes the composed catalog query. Arguments are bound in the order
//! the composer produced them; nothing is formatted into the SQL here.

use sqlx::PgPool;

use super::DbError;
use crate::models::{FilterSpec, Product};
use crate::query::{compose_products_query, SqlArg};

/// Product repository
pub struct ProductRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Search the catalog with optional category/price filters.
    pub async fn search(&self, spec: &FilterSpec) -> Result<Vec<Product>, DbError> {
        let built = compose_products_query(spec);

        let mut query = sqlx::query_as::<_, Product>(built.sql());
        for arg in built.args() {
            query = match arg {
                SqlArg::Text(value) => query.bind(value.as_str()),
                SqlArg::Int(value) => query.bind(*value),
            };
        }

        Ok(query.fetch_all(self.pool).await?)
    }
}
