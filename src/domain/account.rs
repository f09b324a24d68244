//! Account
//!
//! An account is an immutable value: name, balance and the version it was
//! read at. `withdraw` and `deposit` never touch the stored record, they
//! return the proposed next value that a caller hands back to the store.

use serde::Serialize;

use super::{Amount, Balance, BankError};

/// A versioned snapshot of one account
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Account {
    /// Unique, immutable account name
    name: String,

    /// Balance in integer currency units, never negative
    balance: Balance,

    /// Optimistic-lock fencing token, 0 at creation
    version: u64,
}

impl Account {
    /// A brand new account at version 0
    ///
    /// Only the store opens accounts; everyone else gets copies from it.
    pub(crate) fn open(name: String, balance: Balance) -> Self {
        Self {
            name,
            balance,
            version: 0,
        }
    }

    /// Take `amount` out of this snapshot
    pub fn withdraw(&self, amount: &Amount) -> Result<Self, BankError> {
        let balance = self.balance.debit(amount).map_err(|_| {
            BankError::insufficient_funds(amount.value(), self.balance.value())
        })?;

        Ok(Self {
            balance,
            ..self.clone()
        })
    }

    /// Put `amount` into this snapshot
    pub fn deposit(&self, amount: &Amount) -> Result<Self, BankError> {
        let balance = self
            .balance
            .credit(amount)
            .map_err(|e| BankError::InvalidValue(e.to_string()))?;

        Ok(Self {
            balance,
            ..self.clone()
        })
    }

    /// The version that replaces this one in the store on commit
    pub(crate) fn next_version(mut self) -> Self {
        self.version += 1;
        self
    }

    // =========================================================================
    // Getters
    // =========================================================================

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn balance(&self) -> Balance {
        self.balance
    }

    pub fn version(&self) -> u64 {
        self.version
    }
}
