//! Domain module
//!
//! Core domain types and the shared error taxonomy.

pub mod error;
pub mod operation;
pub mod wallet;

pub use error::{InfraError, LedgerError, LedgerResult};
pub use operation::{BalanceOperation, OperationKind};
pub use wallet::Wallet;
