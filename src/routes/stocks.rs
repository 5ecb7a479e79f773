use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::models::{Stock, StockListItem, StockSearchResult};
use crate::state::AppState;

/// Callers (the autocomplete box) never need more than a screenful.
const MAX_SEARCH_RESULTS: usize = 20;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_stocks))
        .route("/search", get(search_stocks))
        .route("/:ticker", get(get_stock))
}

/// GET /api/stocks
///
/// All constituents (ticker + name), ordered by ticker.
async fn list_stocks(State(state): State<AppState>) -> Json<Vec<StockListItem>> {
    info!("GET /stocks - Listing all stocks");
    let items = state.stocks.all().iter().map(StockListItem::from).collect();
    Json(items)
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    q: Option<String>,
}

/// GET /api/stocks/search?q=<query>
///
/// Ranked matches by ticker or company name; at most 20. An empty query
/// yields an empty list.
async fn search_stocks(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Json<Vec<StockSearchResult>> {
    let query = params.q.unwrap_or_default();
    info!("GET /stocks/search - q={:?}", query);
    let results = state
        .stocks
        .search(&query, MAX_SEARCH_RESULTS)
        .into_iter()
        .map(StockSearchResult::from)
        .collect();
    Json(results)
}

/// GET /api/stocks/:ticker
///
/// Metadata for a single stock.
async fn get_stock(
    Path(ticker): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Stock>, AppError> {
    info!("GET /stocks/{} - Stock metadata", ticker);
    state
        .stocks
        .get(&ticker)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Stock '{}' not found", ticker)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_routes_compile() {
        let _router = router();
    }
}
