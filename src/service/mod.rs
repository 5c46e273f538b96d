//! Service module
//!
//! Business operations over the ledger store.

mod balance_service;

pub use balance_service::{BalanceService, DEFAULT_OPERATION_TIMEOUT};
