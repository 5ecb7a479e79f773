use async_trait::async_trait;
use serde::Deserialize;

use crate::external::provider::{ExternalBar, MarketDataProvider, ProviderError};

/// Yahoo Finance v8 chart API. Free, no API key required.
pub struct YahooProvider {
    client: reqwest::Client,
    base_url: String,
}

impl YahooProvider {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent("Mozilla/5.0 (compatible; Stockview/0.1)")
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
            base_url: "https://query1.finance.yahoo.com".to_string(),
        }
    }
}

impl Default for YahooProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<Quote>,
}

#[derive(Debug, Deserialize)]
struct Quote {
    open: Option<Vec<Option<f64>>>,
    high: Option<Vec<Option<f64>>>,
    low: Option<Vec<Option<f64>>>,
    close: Vec<Option<f64>>,
    volume: Option<Vec<Option<i64>>>,
}

fn series_value<T: Copy>(series: &Option<Vec<Option<T>>>, i: usize) -> Option<T> {
    series.as_ref().and_then(|v| v.get(i).copied().flatten())
}

/// Flatten the chart payload into bars, oldest first. Entries without a
/// close (holidays, suspended sessions) are skipped.
fn bars_from_chart(result: &ChartResult) -> Result<Vec<ExternalBar>, ProviderError> {
    let timestamps = result
        .timestamp
        .as_ref()
        .ok_or_else(|| ProviderError::BadResponse("no timestamps in response".into()))?;

    let quote = result
        .indicators
        .quote
        .first()
        .ok_or_else(|| ProviderError::BadResponse("no quote data in response".into()))?;

    if timestamps.len() != quote.close.len() {
        return Err(ProviderError::Parse(
            "timestamp and close arrays have different lengths".into(),
        ));
    }

    let mut bars: Vec<ExternalBar> = timestamps
        .iter()
        .enumerate()
        .filter_map(|(i, ts)| {
            let close = quote.close.get(i).copied().flatten()?;
            let date = chrono::DateTime::from_timestamp(*ts, 0)?.date_naive();
            Some(ExternalBar {
                date,
                open: series_value(&quote.open, i),
                high: series_value(&quote.high, i),
                low: series_value(&quote.low, i),
                close,
                volume: series_value(&quote.volume, i),
            })
        })
        .collect();

    bars.sort_by(|a, b| a.date.cmp(&b.date));
    Ok(bars)
}

#[async_trait]
impl MarketDataProvider for YahooProvider {
    async fn fetch_daily_history(
        &self,
        ticker: &str,
        years: u32,
    ) -> Result<Vec<ExternalBar>, ProviderError> {
        let url = format!("{}/v8/finance/chart/{}", self.base_url, ticker);

        // Yahoo only understands a fixed range vocabulary.
        let range = match years {
            0 | 1 => "1y",
            2 => "2y",
            _ => "5y",
        };

        let resp = self
            .client
            .get(&url)
            .query(&[("interval", "1d"), ("range", range)])
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        match resp.status().as_u16() {
            404 => return Err(ProviderError::NotFound),
            429 => return Err(ProviderError::RateLimited),
            s if s >= 400 => {
                return Err(ProviderError::BadResponse(format!("HTTP {}", resp.status())))
            }
            _ => {}
        }

        let body: ChartResponse = resp
            .json()
            .await
            .map_err(|e| ProviderError::Parse(e.to_string()))?;

        if let Some(error) = body.chart.error {
            if error.description.contains("No data found") {
                return Err(ProviderError::NotFound);
            }
            return Err(ProviderError::BadResponse(error.description));
        }

        let results = body
            .chart
            .result
            .ok_or_else(|| ProviderError::BadResponse("no results in response".into()))?;
        let result = results.first().ok_or(ProviderError::NotFound)?;

        let bars = bars_from_chart(result)?;
        if bars.is_empty() {
            return Err(ProviderError::NotFound);
        }
        Ok(bars)
    }
}
