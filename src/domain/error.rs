//! Ledger Error Types
//!
//! One taxonomy shared by the store and the service. Domain violations
//! pass through every layer unchanged; infrastructure failures collect a
//! module breadcrumb as each layer re-wraps them.

use std::fmt;

use thiserror::Error;
use uuid::Uuid;

/// Result alias used across the store and service layers
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Errors produced by balance reads and updates.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// No wallet row matches the id
    #[error("Wallet not found: {0}")]
    WalletNotFound(Uuid),

    /// The delta would drive the balance below zero
    #[error("Insufficient funds in wallet {0}")]
    InsufficientFunds(Uuid),

    /// Operation kind outside DEPOSIT / WITHDRAW
    #[error("Invalid operation: {0:?} (must be DEPOSIT or WITHDRAW)")]
    InvalidOperation(String),

    /// The amount cannot be turned into a signed delta
    #[error("Amount out of range: {0}")]
    AmountOutOfRange(i64),

    /// Unexpected store or connectivity failure
    #[error(transparent)]
    Infrastructure(#[from] InfraError),
}

impl LedgerError {
    /// Build an infrastructure error rooted at `module`
    pub fn infrastructure(
        module: impl Into<String>,
        endpoint: impl Into<String>,
        message: impl fmt::Display,
    ) -> Self {
        Self::Infrastructure(InfraError::new(module, endpoint, message))
    }

    /// Prepend `module` to the breadcrumb of an infrastructure error.
    ///
    /// Domain variants are returned unchanged so the outermost layer can
    /// still match on their kind.
    pub fn within(self, module: &str) -> Self {
        match self {
            Self::Infrastructure(inner) => Self::Infrastructure(inner.within(module)),
            other => other,
        }
    }

    /// Check if this is a client error (caller's fault, not retriable as-is)
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::WalletNotFound(_)
                | Self::InsufficientFunds(_)
                | Self::InvalidOperation(_)
                | Self::AmountOutOfRange(_)
        )
    }
}

/// Infrastructure failure with the call path that produced it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("ERROR|{endpoint}|{module}: {message}")]
pub struct InfraError {
    /// Dot-separated call path, outermost layer first
    pub module: String,
    /// Address of the backing service involved
    pub endpoint: String,
    /// Original failure text
    pub message: String,
}

impl InfraError {
    pub fn new(
        module: impl Into<String>,
        endpoint: impl Into<String>,
        message: impl fmt::Display,
    ) -> Self {
        Self {
            module: module.into(),
            endpoint: endpoint.into(),
            message: message.to_string(),
        }
    }

    /// Prepend a module tag to the breadcrumb
    pub fn within(mut self, module: &str) -> Self {
        self.module = if self.module.is_empty() {
            module.to_string()
        } else {
            format!("{}.{}", module, self.module)
        };
        self
    }
}
