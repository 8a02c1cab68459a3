//! Domain models with validation at construction
//!
//! Strict inputs (account ids, new accounts, transfer amounts) return
//! ValidationError. Catalog filters degrade instead: unusable values are
//! dropped.

pub mod account;
pub mod filter;
pub mod pagination;
pub mod product;
pub mod validation;

pub use account::{parse_account_id, Account, AccountId, NewAccount, Transfer, TransferReceipt};
pub use filter::{FilterParams, FilterSpec, SortKey};
pub use pagination::Page;
pub use product::Product;
pub use validation::ValidationError;
