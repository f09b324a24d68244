//! Create Account Handler
//!
//! Validates the opening balance and inserts the account.

use crate::domain::{Account, Balance, BankError};
use crate::store::AccountStore;

use super::CreateAccountCommand;

/// Handler for account creation
pub struct CreateAccountHandler {
    store: AccountStore,
}

impl CreateAccountHandler {
    pub fn new(store: AccountStore) -> Self {
        Self { store }
    }

    /// Execute the create account command
    pub fn execute(&self, command: CreateAccountCommand) -> Result<Account, BankError> {
        let balance = Balance::new(command.balance)
            .map_err(|e| BankError::InvalidValue(e.to_string()))?;

        let account = self.store.create(command.name, balance)?;

        tracing::info!(
            account = %account.name(),
            balance = %account.balance(),
            "Account opened"
        );

        Ok(account)
    }
}
