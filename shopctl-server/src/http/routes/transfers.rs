//! Balance transfer endpoint

use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::models::{AccountId, Transfer, TransferReceipt};

/// Transfer request
#[derive(Debug, Deserialize)]
pub struct TransferRequest {
    pub from: AccountId,
    pub to: AccountId,
    pub amount: Decimal,
}

/// POST /transfers
///
/// Rejects non-positive amounts before touching the store. Transfers to
/// the same account are passed through.
async fn create_transfer(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TransferRequest>,
) -> Result<Json<TransferReceipt>, ApiError> {
    let transfer = Transfer::checked(req.from, req.to, req.amount)?;
    let receipt = state.transfers.execute(transfer).await?;
    Ok(Json(receipt))
}

/// Transfer routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/transfers", post(create_transfer))
}
