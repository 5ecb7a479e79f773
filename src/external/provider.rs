use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

/// One daily bar as returned by a market-data provider, before it is
/// persisted. Bars without a close are dropped at the provider boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct ExternalBar {
    pub date: NaiveDate,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: f64,
    pub volume: Option<i64>,
}

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("network error: {0}")]
    Network(String),

    #[error("bad response: {0}")]
    BadResponse(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("rate limited")]
    RateLimited,

    #[error("no data for ticker")]
    NotFound,
}

#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Daily OHLCV history covering roughly the last `years` calendar years,
    /// sorted oldest first.
    async fn fetch_daily_history(
        &self,
        ticker: &str,
        years: u32,
    ) -> Result<Vec<ExternalBar>, ProviderError>;
}
