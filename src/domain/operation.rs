//! Balance Operations
//!
//! Turns a wire-level operation type and amount into a signed delta.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::{LedgerError, LedgerResult};

/// Supported operation kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperationKind {
    Deposit,
    Withdraw,
}

impl OperationKind {
    /// Signed delta for `amount`.
    ///
    /// The sign of `amount` is not checked here: a negative deposit
    /// decreases the balance and a negative withdraw increases it.
    pub fn delta(self, amount: i64) -> LedgerResult<i64> {
        match self {
            OperationKind::Deposit => Ok(amount),
            OperationKind::Withdraw => amount
                .checked_neg()
                .ok_or(LedgerError::AmountOutOfRange(amount)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Deposit => "DEPOSIT",
            OperationKind::Withdraw => "WITHDRAW",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OperationKind {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DEPOSIT" => Ok(OperationKind::Deposit),
            "WITHDRAW" => Ok(OperationKind::Withdraw),
            other => Err(LedgerError::InvalidOperation(other.to_string())),
        }
    }
}

/// A single requested change to one wallet. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceOperation {
    pub wallet_id: Uuid,
    pub kind: OperationKind,
    pub amount: i64,
}

impl BalanceOperation {
    pub fn new(wallet_id: Uuid, kind: OperationKind, amount: i64) -> Self {
        Self {
            wallet_id,
            kind,
            amount,
        }
    }

    pub fn delta(&self) -> LedgerResult<i64> {
        self.kind.delta(self.amount)
    }
}
