use std::sync::Arc;

use sqlx::SqlitePool;

use crate::services::search_index::SearchIndex;

/// Shared read-only handles: the price store pool and the stock index built
/// at startup. Plain data passed into the router, no globals.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub stocks: Arc<SearchIndex>,
}
