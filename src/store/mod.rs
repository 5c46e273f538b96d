//! Ledger Store module
//!
//! Persistence layer for wallet balances.

mod memory;
mod repository;

pub use memory::MemoryLedgerStore;
pub use repository::{LedgerStore, PgLedgerStore};
