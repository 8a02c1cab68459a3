//! Repository implementations for database access
//!
//! Each repository borrows the shared pool and binds every value as a
//! positional argument.

pub mod products;
pub mod users;

pub use super::DbError;
pub use products::ProductRepo;
pub use users::UserRepo;
