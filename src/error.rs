//! Error handling module
//!
//! Centralized error types and HTTP response conversion.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::storage::StorageError;

/// Application-wide Result type
pub type AppResult<T> = Result<T, AppError>;

/// Application error types
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Client errors (4xx)
    #[error("{0}")]
    InvalidRequest(String),

    #[error("Account not found")]
    AccountNotFound(i32),

    #[error("Method not allowed {0}")]
    MethodNotAllowed(String),

    #[error("Route not found: {0}")]
    RouteNotFound(String),

    // Storage faults, passed through unchanged
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub error_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl AppError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "invalid_request"),
            AppError::AccountNotFound(_) => (StatusCode::NOT_FOUND, "account_not_found"),
            AppError::MethodNotAllowed(_) => {
                (StatusCode::METHOD_NOT_ALLOWED, "method_not_allowed")
            }
            AppError::RouteNotFound(_) => (StatusCode::NOT_FOUND, "route_not_found"),
            AppError::Storage(StorageError::AccountNotFound(_)) => {
                (StatusCode::NOT_FOUND, "account_not_found")
            }
            AppError::Storage(StorageError::BalanceOverflow(_)) => {
                (StatusCode::BAD_REQUEST, "balance_out_of_range")
            }
            AppError::Storage(StorageError::Database(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "database_error")
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_code) = self.status_and_code();

        let (error, details) = match &self {
            AppError::AccountNotFound(id) => (self.to_string(), Some(id.to_string())),
            AppError::Storage(StorageError::Database(e)) => {
                tracing::error!("Database error: {:?}", e);
                ("Database error".to_string(), None)
            }
            _ => (self.to_string(), None),
        };

        let body = ErrorResponse {
            error,
            error_code: error_code.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}
