//! Domain Error Types
//!
//! Pure domain errors that don't depend on infrastructure.

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Bank operation failures
///
/// These errors represent business rule violations and optimistic-lock
/// conflicts. Each variant maps to one stable wire code (see [`ErrorCode`]).
/// They are independent of the web/infrastructure layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BankError {
    /// An account with this name is already present
    #[error("Account already exists: {0}")]
    AccountAlreadyExists(String),

    /// Account not found
    #[error("Account does not exist: {0}")]
    AccountDoesNotExist(String),

    /// Source account cannot cover the transfer
    #[error("Insufficient funds: required {required}, available {available}")]
    InsufficientFunds { required: i64, available: i64 },

    /// Non-positive transfer amount, negative opening balance or empty name
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    /// Snapshot went stale before commit (optimistic locking)
    #[error("Account out of sequence: {0}")]
    OutOfSequence(String),

    /// Transfer to same account
    #[error("Cannot transfer to the same account")]
    AccountsAreEqual,
}

impl BankError {
    /// Create an insufficient funds error
    pub fn insufficient_funds(required: i64, available: i64) -> Self {
        Self::InsufficientFunds {
            required,
            available,
        }
    }

    /// Wire code for this error
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::AccountAlreadyExists(_) => ErrorCode::AccountAlreadyExists,
            Self::AccountDoesNotExist(_) => ErrorCode::AccountDoesNotExist,
            Self::InsufficientFunds { .. } => ErrorCode::InsufficientFunds,
            Self::InvalidValue(_) => ErrorCode::InvalidValue,
            Self::OutOfSequence(_) => ErrorCode::OutOfSequence,
            Self::AccountsAreEqual => ErrorCode::AccountsAreEqual,
        }
    }

    /// Check if this error is retryable with a fresh snapshot
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::OutOfSequence(_))
    }
}

/// Stable numeric error codes an adapter must preserve on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum ErrorCode {
    NoError = 0,
    AccountAlreadyExists = 500,
    AccountDoesNotExist = 501,
    InsufficientFunds = 502,
    InvalidValue = 503,
    OutOfSequence = 504,
    AccountsAreEqual = 505,
}

impl ErrorCode {
    /// Numeric value of the code
    pub fn as_u16(self) -> u16 {
        self as u16
    }
}

impl Serialize for ErrorCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u16(self.as_u16())
    }
}
