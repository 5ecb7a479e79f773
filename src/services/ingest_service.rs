use sqlx::SqlitePool;
use tokio::time::{sleep, Duration};
use tracing::{info, warn};

use crate::db::{price_queries, stock_queries};
use crate::external::provider::{ExternalBar, MarketDataProvider, ProviderError};
use crate::models::Stock;

const MAX_RETRIES: u32 = 3;
// Polite delay between tickers so free-tier providers don't throttle us.
const PER_TICKER_DELAY_MS: u64 = 250;

#[derive(Debug, Default)]
pub struct IngestReport {
    pub stocks_upserted: usize,
    pub tickers_fetched: usize,
    pub tickers_failed: usize,
    pub bars_inserted: u64,
}

/// One-time (idempotent) dataset build: upsert the constituent list, then
/// download daily history per ticker and insert the bars, skipping
/// (ticker, date) pairs already present. A failing ticker is logged and
/// skipped; it never aborts the run.
pub async fn run(
    pool: &SqlitePool,
    provider: &dyn MarketDataProvider,
    stocks: &[Stock],
    years: u32,
) -> Result<IngestReport, anyhow::Error> {
    stock_queries::upsert_many(pool, stocks).await?;
    info!("Upserted {} stocks", stocks.len());

    let mut report = IngestReport {
        stocks_upserted: stocks.len(),
        ..Default::default()
    };

    for (i, stock) in stocks.iter().enumerate() {
        match fetch_with_retry(provider, &stock.ticker, years).await {
            Ok(bars) => {
                let inserted = price_queries::insert_ignore_bars(pool, &stock.ticker, &bars).await?;
                report.tickers_fetched += 1;
                report.bars_inserted += inserted;
                info!(
                    "[{}/{}] {}: {} bars ({} new)",
                    i + 1,
                    stocks.len(),
                    stock.ticker,
                    bars.len(),
                    inserted
                );
            }
            Err(e) => {
                report.tickers_failed += 1;
                warn!("[{}/{}] {}: skipped ({})", i + 1, stocks.len(), stock.ticker, e);
            }
        }

        if i + 1 < stocks.len() {
            sleep(Duration::from_millis(PER_TICKER_DELAY_MS)).await;
        }
    }

    Ok(report)
}

async fn fetch_with_retry(
    provider: &dyn MarketDataProvider,
    ticker: &str,
    years: u32,
) -> Result<Vec<ExternalBar>, ProviderError> {
    let mut retry_count = 0;
    loop {
        match provider.fetch_daily_history(ticker, years).await {
            Ok(bars) => return Ok(bars),
            Err(ProviderError::RateLimited) if retry_count < MAX_RETRIES => {
                retry_count += 1;
                let delay = Duration::from_secs(5 * retry_count as u64);
                warn!(
                    "Rate limited fetching {}, retrying in {}s (attempt {}/{})",
                    ticker,
                    delay.as_secs(),
                    retry_count,
                    MAX_RETRIES
                );
                sleep(delay).await;
            }
            Err(e) => return Err(e),
        }
    }
}
