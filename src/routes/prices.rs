use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::models::{Period, PriceBar};
use crate::services::price_service;
use crate::services::summary::PeriodSummary;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/:ticker/prices", get(get_prices))
        .route("/:ticker/summary", get(get_summary))
}

#[derive(Debug, Deserialize)]
struct PeriodParams {
    period: Option<String>,
}

impl PeriodParams {
    /// Missing parameter defaults to 1y (existing client contract);
    /// an unrecognized token is rejected.
    fn resolve(&self) -> Result<Period, AppError> {
        match self.period.as_deref() {
            None => Ok(Period::default()),
            Some(token) => Period::parse(token).ok_or_else(|| {
                AppError::Validation(format!(
                    "Invalid period '{}'; expected one of 1y, 2y, 5y",
                    token
                ))
            }),
        }
    }
}

/// GET /api/stocks/:ticker/prices?period=1y|2y|5y
///
/// Daily OHLCV bars, oldest first. Known ticker with no bars in range
/// returns an empty list, not an error.
async fn get_prices(
    Path(ticker): Path<String>,
    Query(params): Query<PeriodParams>,
    State(state): State<AppState>,
) -> Result<Json<Vec<PriceBar>>, AppError> {
    let period = params.resolve()?;
    info!("GET /stocks/{}/prices - period={}", ticker, period.as_str());
    let series = price_service::get_series(&state.pool, &state.stocks, &ticker, period).await?;
    Ok(Json(series))
}

/// GET /api/stocks/:ticker/summary?period=1y|2y|5y
///
/// Period statistics (latest close, high/low over closes, return %).
async fn get_summary(
    Path(ticker): Path<String>,
    Query(params): Query<PeriodParams>,
    State(state): State<AppState>,
) -> Result<Json<PeriodSummary>, AppError> {
    let period = params.resolve()?;
    info!("GET /stocks/{}/summary - period={}", ticker, period.as_str());
    let summary = price_service::get_summary(&state.pool, &state.stocks, &ticker, period).await?;
    Ok(Json(summary))
}
