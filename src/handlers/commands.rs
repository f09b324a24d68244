//! Command definitions
//!
//! Commands represent intentions to change the system state.

use serde::{Deserialize, Serialize};

use crate::domain::Account;

// =========================================================================
// CreateAccountCommand
// =========================================================================

/// Command to open a new account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAccountCommand {
    pub name: String,
    /// Opening balance in integer units, must not be negative
    pub balance: i64,
}

impl CreateAccountCommand {
    pub fn new(name: impl Into<String>, balance: i64) -> Self {
        Self {
            name: name.into(),
            balance,
        }
    }
}

// =========================================================================
// TransferCommand
// =========================================================================

/// Command to move funds between two accounts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferCommand {
    /// Source account name
    pub from: String,
    /// Destination account name
    pub to: String,
    /// Amount to move, must be positive
    pub value: i64,
}

impl TransferCommand {
    pub fn new(from: impl Into<String>, to: impl Into<String>, value: i64) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            value,
        }
    }
}

/// Result of a successful transfer: both accounts as committed
#[derive(Debug, Clone, Serialize)]
pub struct TransferResult {
    pub from: Account,
    pub to: Account,
    pub value: i64,
}
