//! Account Store module
//!
//! In-memory source of truth for accounts.
//! Snapshot reads, insert-if-absent creation and validated two-account commits.

mod error;
mod repository;

pub use error::StoreError;
pub use repository::AccountStore;
