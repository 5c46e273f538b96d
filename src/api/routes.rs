//! API Routes
//!
//! HTTP endpoint definitions.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;
use crate::service::BalanceService;

// =========================================================================
// Request/Response types
// =========================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateBalanceRequest {
    /// `valletId` is accepted for clients of the first API revision
    #[serde(rename = "walletId", alias = "valletId")]
    pub wallet_id: Uuid,
    #[serde(rename = "operationType")]
    pub operation_type: String,
    pub amount: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateBalanceResponse {
    pub wallet_id: Uuid,
    pub operation_type: String,
    pub amount: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BalanceResponse {
    pub wallet_id: Uuid,
    pub balance: i64,
}

// =========================================================================
// API Router
// =========================================================================

/// Create the API router
pub fn create_router() -> Router<BalanceService> {
    Router::new()
        .route("/wallets/:wallet_id", get(get_balance))
        .route("/wallet", post(update_balance))
}

// =========================================================================
// GET /wallets/:wallet_id
// =========================================================================

/// Get wallet balance
async fn get_balance(
    State(service): State<BalanceService>,
    Path(wallet_id): Path<String>,
) -> Result<Json<BalanceResponse>, AppError> {
    let wallet_id = parse_wallet_id(&wallet_id)?;

    let balance = service.get_balance(wallet_id).await?;

    Ok(Json(BalanceResponse { wallet_id, balance }))
}

// =========================================================================
// POST /wallet
// =========================================================================

/// Deposit to or withdraw from a wallet
async fn update_balance(
    State(service): State<BalanceService>,
    payload: Result<Json<UpdateBalanceRequest>, JsonRejection>,
) -> Result<Json<UpdateBalanceResponse>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::InvalidRequest(e.body_text()))?;

    service
        .update_balance(request.wallet_id, &request.operation_type, request.amount)
        .await?;

    Ok(Json(UpdateBalanceResponse {
        wallet_id: request.wallet_id,
        operation_type: request.operation_type,
        amount: request.amount,
    }))
}

fn parse_wallet_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::InvalidRequest(format!("Wrong uuid: {}", raw)))
}
