use axum::http::Method;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

use crate::routes::{health, prices, stats, stocks};
use crate::state::AppState;

pub fn create_app(state: AppState) -> Router {
    // Read-only API; any browser origin may chart it.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET])
        .allow_headers(Any);

    Router::<AppState>::new()
        .nest("/health", health::router())
        .nest("/api/stocks", stocks::router().merge(prices::router()))
        .nest("/api/stats", stats::router())
        .layer(cors)
        .with_state(state)
}
