//! Transfer Handler
//!
//! Handles transfers between two accounts: validate against a snapshot,
//! compute both new balances locally, then make one commit attempt.

use crate::domain::{Amount, BankError};
use crate::store::AccountStore;

use super::{TransferCommand, TransferResult};

/// Handler for transfers
pub struct TransferHandler {
    store: AccountStore,
}

impl TransferHandler {
    pub fn new(store: AccountStore) -> Self {
        Self { store }
    }

    /// Execute the transfer command
    ///
    /// A stale snapshot surfaces as `BankError::OutOfSequence`; the caller
    /// may resubmit the same command, which reads fresh copies.
    pub fn execute(&self, command: TransferCommand) -> Result<TransferResult, BankError> {
        let amount =
            Amount::new(command.value).map_err(|e| BankError::InvalidValue(e.to_string()))?;

        if command.from == command.to {
            return Err(BankError::AccountsAreEqual);
        }

        let (from, to) = self.store.get_pair(&command.from, &command.to);
        let from = from.ok_or_else(|| BankError::AccountDoesNotExist(command.from.clone()))?;
        let to = to.ok_or_else(|| BankError::AccountDoesNotExist(command.to.clone()))?;

        // Optimistic: the snapshot may already be stale, commit catches that
        if !from.balance().is_sufficient_for(&amount) {
            return Err(BankError::insufficient_funds(
                amount.value(),
                from.balance().value(),
            ));
        }

        let from = from.withdraw(&amount)?;
        let to = to.deposit(&amount)?;

        let (from, to) = self.store.commit(&from, &to)?;

        tracing::info!(
            from = %from.name(),
            to = %to.name(),
            value = amount.value(),
            "Transfer committed"
        );

        Ok(TransferResult {
            from,
            to,
            value: amount.value(),
        })
    }
}
