//! User account endpoints

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::db::{with_timeout, UserRepo};
use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::models::{parse_account_id, Account, NewAccount};

/// Lookup query params; `id` is parsed strictly
#[derive(Debug, Default, Deserialize)]
pub struct LookupParams {
    pub id: Option<String>,
}

/// Create user request
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub balance: Option<Decimal>,
}

/// GET /user?id=N
async fn get_user(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LookupParams>,
) -> Result<Json<Account>, ApiError> {
    let id = parse_account_id(params.id.as_deref())?;
    let account = with_timeout(state.store_timeout, UserRepo::new(&state.pool).get(id)).await?;
    Ok(Json(account))
}

/// POST /user - create an account
async fn create_user(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<Account>), ApiError> {
    let account = NewAccount::new(&req.name, &req.email, req.balance)?;
    let created = with_timeout(state.store_timeout, UserRepo::new(&state.pool).create(account)).await?;

    tracing::info!(id = created.id, "user created");
    Ok((StatusCode::CREATED, Json(created)))
}

/// User routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/user", get(get_user).post(create_user))
}
