use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use chrono::NaiveDate;
use serde::Serialize;
use tracing::info;

use crate::db::{price_queries, stock_queries};
use crate::errors::AppError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(get_stats))
}

#[derive(Debug, Serialize)]
struct StatsResponse {
    stocks: i64,
    price_rows: i64,
    latest_date: Option<NaiveDate>,
}

/// GET /api/stats
///
/// Dataset counters, useful as a post-ingest sanity check.
async fn get_stats(State(state): State<AppState>) -> Result<Json<StatsResponse>, AppError> {
    info!("GET /stats - Dataset stats");
    let stocks = stock_queries::count(&state.pool).await?;
    let price_rows = price_queries::count(&state.pool).await?;
    let latest_date = price_queries::latest_date(&state.pool).await?;
    Ok(Json(StatsResponse {
        stocks,
        price_rows,
        latest_date,
    }))
}
