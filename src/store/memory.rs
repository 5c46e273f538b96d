//! In-memory Ledger Store
//!
//! Same contract as the PostgreSQL store. The map's write guard stands in
//! for the storage engine: the non-negative check and the write happen
//! under one guard, which is what the database CHECK constraint gives
//! the real store.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{LedgerError, LedgerResult};

use super::LedgerStore;

const ENDPOINT: &str = "memory";

#[derive(Debug, Default)]
pub struct MemoryLedgerStore {
    wallets: RwLock<HashMap<Uuid, i64>>,
}

impl MemoryLedgerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a wallet.
    ///
    /// # Panics
    ///
    /// Panics if `balance` is negative; the table's CHECK constraint would
    /// reject such a row too.
    pub fn with_wallet(mut self, wallet_id: Uuid, balance: i64) -> Self {
        assert!(balance >= 0, "seed balance must be non-negative, got {}", balance);
        self.wallets
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(wallet_id, balance);
        self
    }

    pub fn len(&self) -> usize {
        self.wallets.read().map(|w| w.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn poisoned(operation: &str) -> LedgerError {
        LedgerError::infrastructure(
            format!("MemoryLedgerStore.{}", operation),
            ENDPOINT,
            "wallet map lock poisoned",
        )
    }
}

#[async_trait]
impl LedgerStore for MemoryLedgerStore {
    async fn initialize_schema(&self) -> LedgerResult<()> {
        Ok(())
    }

    async fn fetch(&self, wallet_id: Uuid) -> LedgerResult<i64> {
        let wallets = self.wallets.read().map_err(|_| Self::poisoned("fetch"))?;
        wallets
            .get(&wallet_id)
            .copied()
            .ok_or(LedgerError::WalletNotFound(wallet_id))
    }

    async fn apply_delta(&self, wallet_id: Uuid, delta: i64) -> LedgerResult<()> {
        let mut wallets = self
            .wallets
            .write()
            .map_err(|_| Self::poisoned("apply_delta"))?;

        let balance = wallets
            .get_mut(&wallet_id)
            .ok_or(LedgerError::WalletNotFound(wallet_id))?;

        let updated = balance.checked_add(delta).ok_or_else(|| {
            LedgerError::infrastructure(
                "MemoryLedgerStore.apply_delta",
                ENDPOINT,
                "bigint out of range",
            )
        })?;

        if updated < 0 {
            return Err(LedgerError::InsufficientFunds(wallet_id));
        }

        *balance = updated;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[tokio::test]
    async fn test_fetch_seeded_wallet() {
        let id = Uuid::new_v4();
        let store = MemoryLedgerStore::new().with_wallet(id, 100);

        assert_eq!(store.fetch(id).await, Ok(100));
        assert_eq!(store.fetch_wallet(id).await.unwrap().balance, 100);
        assert_eq!(store.len(), 1);
    }

    #[test]
    #[should_panic(expected = "seed balance must be non-negative")]
    fn test_negative_seed_panics() {
        let _ = MemoryLedgerStore::new().with_wallet(Uuid::new_v4(), -1);
    }

    #[tokio::test]
    async fn test_fetch_unknown_wallet() {
        let store = MemoryLedgerStore::new();
        let id = Uuid::new_v4();

        assert!(store.is_empty());
        assert_eq!(store.fetch(id).await, Err(LedgerError::WalletNotFound(id)));
    }

    #[tokio::test]
    async fn test_apply_delta_rejects_negative_result() {
        let id = Uuid::new_v4();
        let store = MemoryLedgerStore::new().with_wallet(id, 100);

        assert_eq!(
            store.apply_delta(id, -101).await,
            Err(LedgerError::InsufficientFunds(id))
        );
        assert_eq!(store.fetch(id).await, Ok(100));

        store.apply_delta(id, -100).await.unwrap();
        assert_eq!(store.fetch(id).await, Ok(0));
    }

    #[tokio::test]
    async fn test_apply_delta_unknown_wallet() {
        let store = MemoryLedgerStore::new();
        let id = Uuid::new_v4();

        assert_eq!(
            store.apply_delta(id, 10).await,
            Err(LedgerError::WalletNotFound(id))
        );
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_apply_delta_overflow_is_infrastructure() {
        let id = Uuid::new_v4();
        let store = MemoryLedgerStore::new().with_wallet(id, i64::MAX);

        let result = store.apply_delta(id, 1).await;
        assert!(matches!(result, Err(LedgerError::Infrastructure(_))));
        assert_eq!(store.fetch(id).await, Ok(i64::MAX));
    }

    #[tokio::test]
    async fn test_concurrent_deltas_never_go_negative() {
        let id = Uuid::new_v4();
        let store = Arc::new(MemoryLedgerStore::new().with_wallet(id, 50));

        // 100 withdrawals of 1 against a balance of 50: exactly 50 succeed
        let mut tasks = Vec::new();
        for _ in 0..100 {
            let store = store.clone();
            tasks.push(tokio::spawn(async move { store.apply_delta(id, -1).await }));
        }

        let mut succeeded = 0;
        let mut rejected = 0;
        for task in tasks {
            match task.await.unwrap() {
                Ok(()) => succeeded += 1,
                Err(LedgerError::InsufficientFunds(_)) => rejected += 1,
                Err(e) => panic!("Unexpected error: {:?}", e),
            }
        }

        assert_eq!(succeeded, 50);
        assert_eq!(rejected, 50);
        assert_eq!(store.fetch(id).await, Ok(0));
    }
}
