//! Error handling module
//!
//! HTTP-facing error type and response conversion.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::domain::LedgerError;

/// Application error types
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Client errors (4xx)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    // Ledger errors, domain or infrastructure
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

/// Error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub error_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_code, details) = match &self {
            // 400 Bad Request
            AppError::InvalidRequest(msg) => {
                (StatusCode::BAD_REQUEST, "invalid_request", Some(msg.clone()))
            }

            AppError::Ledger(ledger_err) => match ledger_err {
                LedgerError::InvalidOperation(op) => {
                    (StatusCode::BAD_REQUEST, "invalid_operation", Some(op.clone()))
                }
                LedgerError::InsufficientFunds(id) => {
                    (StatusCode::BAD_REQUEST, "insufficient_funds", Some(id.to_string()))
                }
                LedgerError::AmountOutOfRange(amount) => {
                    (StatusCode::BAD_REQUEST, "amount_out_of_range", Some(amount.to_string()))
                }

                // 404 Not Found
                LedgerError::WalletNotFound(id) => {
                    (StatusCode::NOT_FOUND, "wallet_not_found", Some(id.to_string()))
                }

                // 500, logged here once with the full breadcrumb
                LedgerError::Infrastructure(inner) => {
                    tracing::error!(
                        module = %inner.module,
                        endpoint = %inner.endpoint,
                        "Infrastructure error: {}",
                        inner.message
                    );
                    (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None)
                }
            },
        };

        // Internal failures are flattened; no detail leaks to the caller
        let error = if status.is_server_error() {
            "Internal Server Error".to_string()
        } else {
            self.to_string()
        };

        let body = ErrorResponse {
            error,
            error_code: error_code.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}
