//! occ_bank Library
//!
//! In-memory bank accounts with optimistic concurrency control.
//! Re-exports modules for the binaries, integration testing and external use.

pub mod api;
pub mod config;
pub mod domain;
pub mod handlers;
pub mod store;

mod error;

pub use config::{Config, LogFormat};
pub use domain::{Account, Amount, AmountError, Balance, BankError, ErrorCode, OperationStatus};
pub use error::{AppError, AppResult};
pub use store::{AccountStore, StoreError};
