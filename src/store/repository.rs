//! Ledger Store Repository
//!
//! Durable wallet balances in PostgreSQL. The non-negative balance
//! invariant lives in the table's CHECK constraint and every delta is a
//! single conditional UPDATE, so concurrent writers never need an
//! application-level lock.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::{LedgerError, LedgerResult, Wallet};

/// SQLSTATE raised by PostgreSQL when a CHECK constraint rejects a row
const CHECK_VIOLATION: &str = "23514";

const CREATE_TABLE_SQL: &str = r#"
    CREATE TABLE IF NOT EXISTS wallet (
        id UUID PRIMARY KEY,
        amount BIGINT NOT NULL DEFAULT 0 CHECK (amount >= 0)
    )
"#;

// Redundant with the primary key; kept for schema compatibility.
const CREATE_INDEX_SQL: &str = "CREATE INDEX IF NOT EXISTS wallet_id_idx ON wallet(id)";

/// Storage contract for wallet balances.
///
/// Implementations must enforce `balance >= 0` at the point of mutation:
/// `apply_delta` may not read the balance, decide, and then write.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Idempotently create the wallet table and its index
    async fn initialize_schema(&self) -> LedgerResult<()>;

    /// Current balance of a wallet
    async fn fetch(&self, wallet_id: Uuid) -> LedgerResult<i64>;

    /// Atomically add `delta` to the wallet balance
    async fn apply_delta(&self, wallet_id: Uuid, delta: i64) -> LedgerResult<()>;

    /// Full wallet row
    async fn fetch_wallet(&self, wallet_id: Uuid) -> LedgerResult<Wallet> {
        let balance = self.fetch(wallet_id).await?;
        Ok(Wallet::new(wallet_id, balance))
    }
}

/// PostgreSQL-backed ledger store. The pool is injected by the caller.
#[derive(Debug, Clone)]
pub struct PgLedgerStore {
    pool: PgPool,
    endpoint: String,
}

impl PgLedgerStore {
    /// Create a store over an existing pool.
    ///
    /// `endpoint` is only used to label infrastructure errors.
    pub fn new(pool: PgPool, endpoint: impl Into<String>) -> Self {
        Self {
            pool,
            endpoint: endpoint.into(),
        }
    }

    fn infra(&self, operation: &str, err: impl std::fmt::Display) -> LedgerError {
        LedgerError::infrastructure(
            format!("PgLedgerStore.{}", operation),
            self.endpoint.as_str(),
            err,
        )
    }
}

/// Classify a failed UPDATE: constraint rejection vs. anything else
fn is_check_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().as_deref() == Some(CHECK_VIOLATION),
        _ => false,
    }
}

#[async_trait]
impl LedgerStore for PgLedgerStore {
    async fn initialize_schema(&self) -> LedgerResult<()> {
        sqlx::query(CREATE_TABLE_SQL)
            .execute(&self.pool)
            .await
            .map_err(|e| self.infra("initialize_schema", e))?;

        sqlx::query(CREATE_INDEX_SQL)
            .execute(&self.pool)
            .await
            .map_err(|e| self.infra("initialize_schema", e))?;

        tracing::info!("Wallet schema ready");
        Ok(())
    }

    async fn fetch(&self, wallet_id: Uuid) -> LedgerResult<i64> {
        let balance: Option<i64> = sqlx::query_scalar("SELECT amount FROM wallet WHERE id = $1")
            .bind(wallet_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| self.infra("fetch", e))?;

        balance.ok_or(LedgerError::WalletNotFound(wallet_id))
    }

    async fn fetch_wallet(&self, wallet_id: Uuid) -> LedgerResult<Wallet> {
        let row: Option<(Uuid, i64)> = sqlx::query_as("SELECT id, amount FROM wallet WHERE id = $1")
            .bind(wallet_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| self.infra("fetch_wallet", e))?;

        row.map(|(id, amount)| Wallet::new(id, amount))
            .ok_or(LedgerError::WalletNotFound(wallet_id))
    }

    async fn apply_delta(&self, wallet_id: Uuid, delta: i64) -> LedgerResult<()> {
        let result = sqlx::query("UPDATE wallet SET amount = amount + $1 WHERE id = $2")
            .bind(delta)
            .bind(wallet_id)
            .execute(&self.pool)
            .await;

        let rows_affected = match result {
            Ok(done) => done.rows_affected(),
            Err(e) if is_check_violation(&e) => {
                tracing::debug!(wallet_id = %wallet_id, delta, "Balance constraint rejected delta");
                return Err(LedgerError::InsufficientFunds(wallet_id));
            }
            Err(e) => return Err(self.infra("apply_delta", e)),
        };

        if rows_affected == 0 {
            return Err(LedgerError::WalletNotFound(wallet_id));
        }

        tracing::debug!(wallet_id = %wallet_id, delta, "Delta applied");
        Ok(())
    }
}
