//! Database module
//!
//! Connection pool construction and connectivity checks.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::Config;
use crate::domain::{LedgerError, LedgerResult};

/// Build the shared connection pool and verify it can reach the database.
///
/// The pool bounds the number of in-flight database operations; it is
/// handed to the store rather than kept as a global.
pub async fn create_pool(config: &Config) -> LedgerResult<PgPool> {
    let endpoint = config.db_endpoint();

    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .min_connections(config.db_min_connections)
        .max_lifetime(config.db_max_lifetime)
        .idle_timeout(config.db_idle_timeout)
        .connect(&config.database_url())
        .await
        .map_err(|e| LedgerError::infrastructure("db.create_pool", endpoint.as_str(), e))?;

    if let Err(e) = verify_connection(&pool).await {
        pool.close().await;
        return Err(LedgerError::infrastructure("db.create_pool", endpoint, e));
    }

    tracing::info!(
        endpoint = %endpoint,
        max_connections = config.db_max_connections,
        min_connections = config.db_min_connections,
        "Database pool ready"
    );
    Ok(pool)
}

/// Simple connectivity check
pub async fn verify_connection(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
