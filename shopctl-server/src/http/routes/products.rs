//! Catalog endpoint

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{Query, State},
    http::HeaderName,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};

use crate::db::{with_timeout, ProductRepo};
use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::models::{FilterParams, FilterSpec};

/// Informational header carrying store latency for the catalog query
pub const QUERY_TIME_HEADER: HeaderName = HeaderName::from_static("x-query-time");

/// GET /products?category=&min_price=&max_price=&sort=&limit=&offset=
///
/// Unusable filter values are ignored rather than rejected.
async fn list_products(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FilterParams>,
) -> Response {
    let spec = FilterSpec::from(params);

    let started = Instant::now();
    let result = with_timeout(state.store_timeout, ProductRepo::new(&state.pool).search(&spec)).await;
    let elapsed = format!("{:?}", started.elapsed());

    match result {
        Ok(products) => {
            tracing::debug!(rows = products.len(), query_time = %elapsed, "products listed");
            ([(QUERY_TIME_HEADER, elapsed)], Json(products)).into_response()
        }
        Err(e) => ([(QUERY_TIME_HEADER, elapsed)], ApiError::from(e)).into_response(),
    }
}

/// Catalog routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/products", get(list_products))
}
