//! Common test utilities

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

use wallet_ledger::store::{LedgerStore, PgLedgerStore};

/// Connect to the test database and make sure the schema exists.
///
/// Returns `None` when DATABASE_URL is not set so the suite can run on
/// machines without PostgreSQL.
pub async fn setup_test_db() -> Option<PgPool> {
    dotenvy::dotenv().ok();
    let database_url = match std::env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            eprintln!("DATABASE_URL not set, skipping database test");
            return None;
        }
    };

    let pool = PgPoolOptions::new()
        .max_connections(20)
        .connect(&database_url)
        .await
        .expect("Failed to connect to DB");

    PgLedgerStore::new(pool.clone(), "test")
        .initialize_schema()
        .await
        .expect("Failed to create schema");

    Some(pool)
}

/// Insert a wallet with a fresh id. Tests never share wallets, so no
/// truncation is needed between them.
pub async fn seed_wallet(pool: &PgPool, balance: i64) -> Uuid {
    let wallet_id = Uuid::new_v4();
    sqlx::query("INSERT INTO wallet (id, amount) VALUES ($1, $2)")
        .bind(wallet_id)
        .bind(balance)
        .execute(pool)
        .await
        .expect("Failed to seed wallet");
    wallet_id
}
