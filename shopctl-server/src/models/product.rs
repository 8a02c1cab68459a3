//! Catalog product row

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Product joined with its category name
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub price: i64,
}
