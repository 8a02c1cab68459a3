pub mod products_sql;
pub mod serve;
pub mod transfer;
