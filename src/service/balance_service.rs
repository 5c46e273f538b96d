//! Balance Service
//!
//! Validates operations, applies them to the ledger store under a
//! per-call deadline and normalizes the outcome into `LedgerError`.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use uuid::Uuid;

use crate::domain::{BalanceOperation, LedgerError, LedgerResult, OperationKind};
use crate::store::LedgerStore;

/// Deadline applied to every store call
pub const DEFAULT_OPERATION_TIMEOUT: Duration = Duration::from_secs(5);

/// Service for reading and updating wallet balances
#[derive(Clone)]
pub struct BalanceService {
    store: Arc<dyn LedgerStore>,
    timeout: Duration,
}

impl BalanceService {
    pub fn new(store: Arc<dyn LedgerStore>) -> Self {
        Self {
            store,
            timeout: DEFAULT_OPERATION_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Current balance of a wallet
    pub async fn get_balance(&self, wallet_id: Uuid) -> LedgerResult<i64> {
        self.bounded(self.store.fetch(wallet_id))
            .await
            .map_err(|e| e.within("GetBalance"))
    }

    /// Apply a DEPOSIT or WITHDRAW given as its wire string.
    ///
    /// An unknown operation type is rejected without touching the store.
    pub async fn update_balance(
        &self,
        wallet_id: Uuid,
        operation_type: &str,
        amount: i64,
    ) -> LedgerResult<()> {
        let kind: OperationKind = operation_type.parse()?;
        self.apply(BalanceOperation::new(wallet_id, kind, amount))
            .await
    }

    /// Apply an already-parsed operation
    pub async fn apply(&self, operation: BalanceOperation) -> LedgerResult<()> {
        if operation.amount < 0 {
            // Passed through unchanged; the store constraint is the only guard.
            tracing::warn!(
                wallet_id = %operation.wallet_id,
                operation = %operation.kind,
                amount = operation.amount,
                "Negative amount in balance operation"
            );
        }

        let delta = operation.delta()?;

        self.bounded(self.store.apply_delta(operation.wallet_id, delta))
            .await
            .map_err(|e| e.within("UpdateBalance"))?;

        tracing::info!(
            wallet_id = %operation.wallet_id,
            operation = %operation.kind,
            delta,
            "Balance updated"
        );
        Ok(())
    }

    /// Run a store call under the service deadline. The store future is
    /// dropped (cancelled) when the deadline expires.
    async fn bounded<T, F>(&self, call: F) -> LedgerResult<T>
    where
        F: Future<Output = LedgerResult<T>>,
    {
        match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(LedgerError::infrastructure(
                "",
                "",
                format!("operation timed out after {:?}", self.timeout),
            )),
        }
    }
}
