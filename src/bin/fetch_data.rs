//! One-time (idempotent) dataset build: load the S&P 500 constituent list
//! from CSV and download five years of daily OHLCV per ticker.
//!
//! Run:
//!     cargo run --bin fetch_data
//!
//! Safe to re-run; existing (ticker, date) rows are left untouched.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use stockview_backend::db;
use stockview_backend::external::mock::MockProvider;
use stockview_backend::external::provider::MarketDataProvider;
use stockview_backend::external::yahoo::YahooProvider;
use stockview_backend::logging::{init_logging, LoggingConfig};
use stockview_backend::services::{constituent_import, ingest_service};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    init_logging(LoggingConfig::from_env()).map_err(|e| anyhow::anyhow!("{}", e))?;

    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://stock_data.db".to_string());
    let csv_path = PathBuf::from(
        std::env::var("CONSTITUENTS_CSV")
            .unwrap_or_else(|_| "data/constituents.sample.csv".to_string()),
    );
    let years: u32 = std::env::var("HISTORY_YEARS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(5);

    let provider_name = std::env::var("PRICE_PROVIDER").unwrap_or_else(|_| "yahoo".to_string());
    let provider: Arc<dyn MarketDataProvider> = match provider_name.to_lowercase().as_str() {
        "yahoo" => {
            info!("Using market data provider: Yahoo Finance");
            Arc::new(YahooProvider::new())
        }
        "mock" => {
            info!("Using market data provider: mock random walk");
            Arc::new(MockProvider)
        }
        other => {
            anyhow::bail!("Invalid PRICE_PROVIDER: {}. Must be 'yahoo' or 'mock'", other);
        }
    };

    let pool = db::connect(&database_url)
        .await
        .with_context(|| format!("Failed to open database {}", database_url))?;
    db::init::ensure_schema(&pool).await?;

    let stocks = constituent_import::load_constituents(&csv_path)?;
    info!(
        "Loaded {} constituents from {}",
        stocks.len(),
        csv_path.display()
    );

    let report = ingest_service::run(&pool, provider.as_ref(), &stocks, years).await?;

    info!(
        "Ingest complete: {} stocks, {} tickers fetched, {} failed, {} new bars",
        report.stocks_upserted,
        report.tickers_fetched,
        report.tickers_failed,
        report.bars_inserted
    );

    Ok(())
}
