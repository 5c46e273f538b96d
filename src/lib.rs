//! wallet_ledger Library
//!
//! Re-exports modules for the server binary, the load tester and
//! integration tests.

pub mod api;
pub mod config;
pub mod db;
pub mod domain;
pub mod service;
pub mod store;

mod error;

pub use config::{Config, ConfigError, LogFormat};
pub use domain::{BalanceOperation, InfraError, LedgerError, LedgerResult, OperationKind, Wallet};
pub use error::{AppError, ErrorResponse};
pub use service::BalanceService;
pub use store::{LedgerStore, MemoryLedgerStore, PgLedgerStore};
