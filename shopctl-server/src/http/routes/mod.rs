//! Route handlers organized by resource

pub mod health;
pub mod products;
pub mod transfers;
pub mod users;
