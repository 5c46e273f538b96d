//! Wallet read model

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A wallet row. `balance` is stored in the `amount` column and is never negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wallet {
    pub id: Uuid,
    pub balance: i64,
}

impl Wallet {
    pub fn new(id: Uuid, balance: i64) -> Self {
        Self { id, balance }
    }
}
