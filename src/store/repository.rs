//! Account Store
//!
//! Optimistic concurrency control over an in-memory account map.
//!
//! Readers take detached copies straight out of the map and never wait on
//! writers. Writers (create, commit) are serialized by a single commit lock
//! so the version check and the write happen as one step:
//!
//! ```text
//! 1. lock commit section
//! 2. re-read stored versions of both accounts
//! 3. IF either missing or version moved: reject, store untouched
//! 4. bump commit epoch (odd), write both versions + 1, bump epoch (even)
//! 5. unlock
//! ```
//!
//! The store never retries. A conflict is handed back to the caller, who
//! decides whether to read again and resubmit.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use parking_lot::Mutex;

use crate::domain::{Account, Balance};

use super::StoreError;

/// Busy-wait rounds on an in-flight commit before yielding the thread
const SPINS_BEFORE_YIELD: u32 = 64;

#[derive(Debug, Default)]
struct Inner {
    /// Current version of every account, keyed by name
    accounts: DashMap<String, Account>,

    /// Commit serialization lock
    ///
    /// Held for the re-read + compare + write of a single create or commit.
    /// Never held while business rules run or events are logged.
    commit_lock: Mutex<()>,

    /// Odd while a commit is writing, even otherwise.
    ///
    /// Multi-account reads compare it before and after reading and retry if
    /// a commit overlapped, so they never see half of a commit.
    commit_epoch: AtomicU64,
}

/// Handle to the account store
///
/// Cloning is cheap and every clone refers to the same accounts. Construct
/// one at startup and pass it to whatever needs it.
#[derive(Debug, Clone, Default)]
pub struct AccountStore {
    inner: Arc<Inner>,
}

impl AccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Detached copy of the latest committed version of `name`
    pub fn get(&self, name: &str) -> Option<Account> {
        self.inner
            .accounts
            .get(name)
            .map(|entry| entry.value().clone())
    }

    /// Copies of two accounts taken at the same point in the commit order
    pub fn get_pair(&self, first: &str, second: &str) -> (Option<Account>, Option<Account>) {
        self.read_consistent(|| (self.get(first), self.get(second)))
    }

    /// Consistent copy of every account, sorted by name
    pub fn accounts(&self) -> Vec<Account> {
        let mut accounts = self.read_consistent(|| {
            self.inner
                .accounts
                .iter()
                .map(|entry| entry.value().clone())
                .collect::<Vec<_>>()
        });
        accounts.sort_by(|a, b| a.name().cmp(b.name()));
        accounts
    }

    /// Sum of all balances at a single point in the commit order
    pub fn total_balance(&self) -> i128 {
        self.accounts()
            .iter()
            .map(|account| i128::from(account.balance().value()))
            .sum()
    }

    pub fn len(&self) -> usize {
        self.inner.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.accounts.is_empty()
    }

    /// Run `read` until no commit overlapped it
    ///
    /// This is the one read path that can wait on a writer: while a commit is
    /// mid-write it spins briefly, then yields the thread.
    fn read_consistent<T>(&self, read: impl Fn() -> T) -> T {
        let mut spins = 0u32;
        loop {
            let before = self.inner.commit_epoch.load(Ordering::SeqCst);
            if before % 2 == 1 {
                spins += 1;
                if spins < SPINS_BEFORE_YIELD {
                    std::hint::spin_loop();
                } else {
                    std::thread::yield_now();
                }
                continue;
            }

            let value = read();

            if self.inner.commit_epoch.load(Ordering::SeqCst) == before {
                return value;
            }
        }
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Insert a new account at version 0 unless the name is taken
    pub fn create(&self, name: impl Into<String>, balance: Balance) -> Result<Account, StoreError> {
        let name = name.into();
        if name.is_empty() {
            return Err(StoreError::EmptyName);
        }

        let account = {
            let _guard = self.inner.commit_lock.lock();

            match self.inner.accounts.entry(name) {
                Entry::Occupied(entry) => {
                    return Err(StoreError::AlreadyExists(entry.key().clone()))
                }
                Entry::Vacant(slot) => {
                    let account = Account::open(slot.key().clone(), balance);
                    slot.insert(account.clone());
                    account
                }
            }
        };

        tracing::debug!(
            account = %account.name(),
            balance = %account.balance(),
            "Account created"
        );

        Ok(account)
    }

    /// Write two modified snapshots if neither account moved since it was read
    ///
    /// `first` and `second` carry the version they were read at. On success
    /// both are stored with version + 1 and the stored values are returned.
    /// On conflict nothing is written.
    pub fn commit(
        &self,
        first: &Account,
        second: &Account,
    ) -> Result<(Account, Account), StoreError> {
        if first.name() == second.name() {
            return Err(StoreError::SameAccount(first.name().to_string()));
        }

        let committed = {
            let _guard = self.inner.commit_lock.lock();

            self.check_version(first)
                .and_then(|_| self.check_version(second))
                .map(|_| {
                    self.write_pair(first.clone().next_version(), second.clone().next_version())
                })
        };

        match committed {
            Ok((first, second)) => {
                tracing::debug!(
                    first = %first.name(),
                    first_version = first.version(),
                    second = %second.name(),
                    second_version = second.version(),
                    "Commit accepted"
                );
                Ok((first, second))
            }
            Err(e) => {
                tracing::warn!(error = %e, "Commit rejected");
                Err(e)
            }
        }
    }

    /// Store both accounts inside one odd epoch
    ///
    /// Must be called with the commit lock held.
    fn write_pair(&self, first: Account, second: Account) -> (Account, Account) {
        self.inner.commit_epoch.fetch_add(1, Ordering::SeqCst);
        self.inner
            .accounts
            .insert(first.name().to_string(), first.clone());
        self.inner
            .accounts
            .insert(second.name().to_string(), second.clone());
        self.inner.commit_epoch.fetch_add(1, Ordering::SeqCst);

        (first, second)
    }

    /// Hold the commit section, stalling every writer until the guard drops
    #[cfg(test)]
    pub(crate) fn hold_commit_section(&self) -> parking_lot::MutexGuard<'_, ()> {
        self.inner.commit_lock.lock()
    }

    /// Compare a snapshot's version with the stored one
    ///
    /// Must be called with the commit lock held.
    fn check_version(&self, snapshot: &Account) -> Result<(), StoreError> {
        let actual = self
            .inner
            .accounts
            .get(snapshot.name())
            .map(|entry| entry.version());

        if actual != Some(snapshot.version()) {
            return Err(StoreError::ConcurrencyConflict {
                name: snapshot.name().to_string(),
                expected: snapshot.version(),
                actual,
            });
        }

        Ok(())
    }
}
