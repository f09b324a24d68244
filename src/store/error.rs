//! Account Store Errors
//!
//! Error types for account store operations.

use crate::domain::BankError;

/// Errors that can occur in the account store
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// Insert-if-absent found an existing account
    #[error("Account already exists: {0}")]
    AlreadyExists(String),

    /// Account names are non-empty
    #[error("Account name must not be empty")]
    EmptyName,

    /// Optimistic concurrency conflict
    ///
    /// `actual` is `None` when the account is no longer in the store.
    #[error("Concurrency conflict for account {name}: expected version {expected}, found {actual:?}")]
    ConcurrencyConflict {
        name: String,
        expected: u64,
        actual: Option<u64>,
    },

    /// Both sides of a commit name the same account
    #[error("Cannot commit account {0} against itself")]
    SameAccount(String),
}

impl From<StoreError> for BankError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::AlreadyExists(name) => BankError::AccountAlreadyExists(name),
            StoreError::EmptyName => {
                BankError::InvalidValue("Account name must not be empty".to_string())
            }
            StoreError::ConcurrencyConflict { name, .. } => BankError::OutOfSequence(name),
            StoreError::SameAccount(_) => BankError::AccountsAreEqual,
        }
    }
}
