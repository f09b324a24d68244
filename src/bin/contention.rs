//! Contention Tool
//!
//! Hammers one in-process store with concurrent transfers and checks that
//! money is neither created nor destroyed.
//!
//! Run with: cargo run --bin contention --release -- --accounts 8 --threads 8 --transfers 10000

use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;
use std::time::Instant;

use rand::Rng;

use occ_bank::handlers::{
    CreateAccountCommand, CreateAccountHandler, TransferCommand, TransferHandler,
};
use occ_bank::AccountStore;

const INITIAL_BALANCE: i64 = 1_000;

#[derive(Default)]
struct Counters {
    committed: AtomicU64,
    conflicts: AtomicU64,
    gave_up: AtomicU64,
    rejected: AtomicU64,
}

fn arg(args: &[String], flag: &str, default: u64) -> u64 {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let account_count = arg(&args, "--accounts", 8).max(2);
    let thread_count = arg(&args, "--threads", 8).max(1);
    let transfers_per_thread = arg(&args, "--transfers", 10_000);
    let max_retries = arg(&args, "--retries", 3);

    println!(
        "Contention Test - {} accounts, {} threads x {} transfers, {} retries",
        account_count, thread_count, transfers_per_thread, max_retries
    );

    let store = AccountStore::new();
    let create = CreateAccountHandler::new(store.clone());
    let names: Vec<String> = (0..account_count).map(|i| format!("account-{}", i)).collect();
    for name in &names {
        create.execute(CreateAccountCommand::new(name.clone(), INITIAL_BALANCE))?;
    }
    let expected_total = store.total_balance();

    let counters = Counters::default();
    let start = Instant::now();

    thread::scope(|s| {
        for _ in 0..thread_count {
            let handler = TransferHandler::new(store.clone());
            let names = &names;
            let counters = &counters;
            s.spawn(move || {
                let mut rng = rand::thread_rng();
                for _ in 0..transfers_per_thread {
                    let from = rng.gen_range(0..names.len());
                    let mut to = rng.gen_range(0..names.len() - 1);
                    if to >= from {
                        to += 1;
                    }
                    let command = TransferCommand::new(
                        names[from].clone(),
                        names[to].clone(),
                        rng.gen_range(1..=100),
                    );

                    // Retry policy belongs to the caller
                    let mut attempt = 0;
                    loop {
                        match handler.execute(command.clone()) {
                            Ok(_) => {
                                counters.committed.fetch_add(1, Ordering::Relaxed);
                                break;
                            }
                            Err(e) if e.is_retryable() && attempt < max_retries => {
                                counters.conflicts.fetch_add(1, Ordering::Relaxed);
                                attempt += 1;
                            }
                            Err(e) if e.is_retryable() => {
                                counters.conflicts.fetch_add(1, Ordering::Relaxed);
                                counters.gave_up.fetch_add(1, Ordering::Relaxed);
                                break;
                            }
                            Err(_) => {
                                counters.rejected.fetch_add(1, Ordering::Relaxed);
                                break;
                            }
                        }
                    }
                }
            });
        }
    });

    let elapsed = start.elapsed();
    let committed = counters.committed.load(Ordering::Relaxed);
    let final_total = store.total_balance();

    println!("\n=== Contention Test Results ===");
    println!("Committed: {}", committed);
    println!("Conflicts: {}", counters.conflicts.load(Ordering::Relaxed));
    println!("Gave up after retries: {}", counters.gave_up.load(Ordering::Relaxed));
    println!("Rejected (funds/validation): {}", counters.rejected.load(Ordering::Relaxed));
    println!("Time: {:.2}s", elapsed.as_secs_f64());
    println!("Rate: {:.0} commits/sec", committed as f64 / elapsed.as_secs_f64());
    println!("Total balance: {} (expected {})", final_total, expected_total);

    if final_total != expected_total {
        anyhow::bail!(
            "Balance not conserved: expected {}, found {}",
            expected_total,
            final_total
        );
    }

    Ok(())
}
