//! Command Handlers module
//!
//! The two bank operations. Each handler applies the business rules to
//! snapshots and drives a single store write.

mod commands;
mod create_account_handler;
mod transfer_handler;


pub use commands::*;
pub use create_account_handler::CreateAccountHandler;
pub use transfer_handler::TransferHandler;
