use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{info, warn};

use stockview_backend::logging::{init_logging, LoggingConfig};
use stockview_backend::services::search_index::SearchIndex;
use stockview_backend::state::AppState;
use stockview_backend::{app, db};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    init_logging(LoggingConfig::from_env())?;

    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://stock_data.db".to_string());

    let pool = db::connect(&database_url).await?;
    db::init::ensure_schema(&pool).await?;

    // The constituent list is immutable for the process lifetime; load it
    // once and serve lookups and search from memory.
    let stocks = db::stock_queries::fetch_all(&pool).await?;
    if stocks.is_empty() {
        warn!("No stocks in the database - run `fetch_data` to ingest the dataset");
    }
    let index = SearchIndex::new(stocks);
    info!("Loaded {} stocks into the search index", index.len());

    let state = AppState {
        pool,
        stocks: Arc::new(index),
    };
    let app = app::create_app(state);

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(5000);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(&addr).await?;
    info!("Stockview backend running at http://{}/", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
