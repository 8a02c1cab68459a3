//! API error types with IntoResponse
//!
//! Errors are converted to JSON responses with appropriate status codes.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use rust_decimal::Decimal;
use serde_json::json;

use crate::db::DbError;
use crate::ledger::TransferError;
use crate::models::{AccountId, ValidationError};

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Validation failed (400)
    Validation(ValidationError),

    /// Resource not found (404)
    NotFound { resource: &'static str, id: String },

    /// Transfer would overdraw the source account (409)
    InsufficientFunds { account: AccountId, balance: Decimal },

    /// Store did not answer in time (504)
    Timeout { millis: u64 },

    /// Database error (500, logged)
    Database(DbError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::Validation(e) => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": "validation_error",
                    "message": e.to_string()
                }),
            ),
            Self::NotFound { resource, id } => (
                StatusCode::NOT_FOUND,
                json!({
                    "error": "not_found",
                    "message": format!("{} '{}' not found", resource, id)
                }),
            ),
            Self::InsufficientFunds { account, .. } => (
                StatusCode::CONFLICT,
                json!({
                    "error": "insufficient_funds",
                    "message": format!("insufficient funds for account {}", account)
                }),
            ),
            Self::Timeout { millis } => (
                StatusCode::GATEWAY_TIMEOUT,
                json!({
                    "error": "timeout",
                    "message": format!("store did not respond within {}ms", millis)
                }),
            ),
            Self::Database(e) => {
                // Log the actual error, return generic message
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": "internal_error",
                        "message": "an internal error occurred"
                    }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound { resource, id } => Self::NotFound { resource, id },
            DbError::Timeout { millis } => Self::Timeout { millis },
            _ => Self::Database(e),
        }
    }
}

impl From<TransferError> for ApiError {
    fn from(e: TransferError) -> Self {
        // Rollback failures were logged by the executor; report the cause.
        match e.into_primary() {
            TransferError::InsufficientFunds { account, balance } => {
                Self::InsufficientFunds { account, balance }
            }
            TransferError::Store(db) => db.into(),
            TransferError::RollbackFailed { rollback, .. } => Self::Database(rollback),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn validation_error_is_400() {
        let err = ApiError::Validation(ValidationError::Empty { field: "id" });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn missing_account_is_404() {
        let err: ApiError = DbError::not_found("account", 9).into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn timeout_is_504() {
        let err: ApiError = DbError::Timeout { millis: 3000 }.into();
        assert_eq!(err.into_response().status(), StatusCode::GATEWAY_TIMEOUT);
    }

    #[tokio::test]
    async fn insufficient_funds_is_409() {
        let err: ApiError = TransferError::InsufficientFunds {
            account: 1,
            balance: Decimal::from(-15),
        }
        .into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["error"], "insufficient_funds");
    }

    #[tokio::test]
    async fn rollback_failure_maps_to_cause() {
        let err: ApiError = TransferError::RollbackFailed {
            cause: Box::new(TransferError::InsufficientFunds {
                account: 1,
                balance: Decimal::from(-1),
            }),
            rollback: DbError::Timeout { millis: 5 },
        }
        .into();
        assert!(matches!(err, ApiError::InsufficientFunds { account: 1, .. }));
    }

    #[tokio::test]
    async fn database_error_hides_details() {
        let err = ApiError::Database(DbError::Sqlx(sqlx::Error::RowNotFound));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["message"], "an internal error occurred");
    }
}
