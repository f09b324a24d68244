//! Store concurrency integration tests

use std::sync::Barrier;
use std::thread;

use occ_bank::handlers::{TransferCommand, TransferHandler};
use occ_bank::{Amount, BankError, StoreError};

mod common;

#[test]
fn test_concurrent_transfers_conserve_total() {
    let names = ["a", "b", "c", "d"];
    let store = common::setup_store(&[("a", 500), ("b", 500), ("c", 500), ("d", 500)]);
    let barrier = Barrier::new(names.len());

    let committed: usize = thread::scope(|s| {
        let handles: Vec<_> = (0..names.len())
            .map(|i| {
                let handler = TransferHandler::new(store.clone());
                let barrier = &barrier;
                s.spawn(move || {
                    barrier.wait();
                    let mut committed = 0;
                    for n in 0..500 {
                        let from = names[i];
                        let to = names[(i + 1 + n % 3) % names.len()];
                        match handler.execute(TransferCommand::new(from, to, 3)) {
                            Ok(_) => committed += 1,
                            Err(BankError::OutOfSequence(_))
                            | Err(BankError::InsufficientFunds { .. }) => {}
                            Err(e) => panic!("Unexpected error: {:?}", e),
                        }
                    }
                    committed
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).sum()
    });

    assert!(committed > 0);
    assert_eq!(store.total_balance(), 2_000);

    // Every commit bumps two versions
    let version_sum: u64 = store.accounts().iter().map(|a| a.version()).sum();
    assert_eq!(version_sum, 2 * committed as u64);
    assert!(store.accounts().iter().all(|a| a.balance().value() >= 0));
}

#[test]
fn test_same_stale_snapshot_committed_twice_concurrently() {
    let store = common::setup_store(&[("alice", 100), ("bob", 0)]);
    let amount = Amount::new(70).unwrap();

    // Both callers computed from the same snapshot
    let alice = store.get("alice").unwrap().withdraw(&amount).unwrap();
    let bob = store.get("bob").unwrap().deposit(&amount).unwrap();
    let barrier = Barrier::new(2);

    let results: Vec<_> = thread::scope(|s| {
        let handles: Vec<_> = (0..2)
            .map(|_| {
                let (store, alice, bob, barrier) = (store.clone(), &alice, &bob, &barrier);
                s.spawn(move || {
                    barrier.wait();
                    store.commit(alice, bob)
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(results
        .iter()
        .any(|r| matches!(r, Err(StoreError::ConcurrencyConflict { .. }))));

    assert_eq!(store.get("alice").unwrap().balance().value(), 30);
    assert_eq!(store.get("bob").unwrap().balance().value(), 70);
    assert_eq!(store.get("alice").unwrap().version(), 1);
}
