use sqlx::SqlitePool;
use tracing::error;

use crate::db::price_queries;
use crate::errors::AppError;
use crate::models::{Period, PriceBar};
use crate::services::search_index::SearchIndex;
use crate::services::summary::{self, PeriodSummary};

/// Fetch the bounded, ordered series for a ticker and period.
///
/// The window is anchored at the ticker's latest bar date, not "today", so a
/// static dataset always yields a full window. An unknown ticker is a 404;
/// a known ticker with no bars in range is an empty series.
pub async fn get_series(
    pool: &SqlitePool,
    index: &SearchIndex,
    ticker: &str,
    period: Period,
) -> Result<Vec<PriceBar>, AppError> {
    let stock = index
        .get(ticker)
        .ok_or_else(|| AppError::NotFound(format!("Stock '{}' not found", ticker)))?;

    let Some(as_of) = price_queries::max_date(pool, &stock.ticker)
        .await
        .map_err(|e| {
            error!("Failed to resolve as-of date for {}: {}", stock.ticker, e);
            AppError::Db(e)
        })?
    else {
        return Ok(Vec::new());
    };

    let start = period.start_from(as_of);
    price_queries::fetch_range(pool, &stock.ticker, start)
        .await
        .map_err(|e| {
            error!("Failed to fetch price series for {}: {}", stock.ticker, e);
            AppError::Db(e)
        })
}

/// Summary statistics over the same window `get_series` returns.
pub async fn get_summary(
    pool: &SqlitePool,
    index: &SearchIndex,
    ticker: &str,
    period: Period,
) -> Result<PeriodSummary, AppError> {
    let series = get_series(pool, index, ticker, period).await?;
    summary::summarize(&series).ok_or_else(|| {
        AppError::NotFound(format!(
            "No price data found for '{}' in period {}",
            ticker,
            period.as_str()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{price_queries::insert_ignore_bars, test_pool};
    use crate::external::provider::ExternalBar;
    use crate::models::Stock;
    use chrono::NaiveDate;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn bar(date: NaiveDate, close: f64) -> ExternalBar {
        ExternalBar {
            date,
            open: None,
            high: None,
            low: None,
            close,
            volume: None,
        }
    }

    fn index() -> SearchIndex {
        SearchIndex::new(vec![
            Stock {
                ticker: "AAPL".to_string(),
                name: "Apple Inc.".to_string(),
                sector: Some("Information Technology".to_string()),
                industry: None,
            },
            Stock {
                ticker: "NEWCO".to_string(),
                name: "Newly Listed Co".to_string(),
                sector: None,
                industry: None,
            },
        ])
    }

    #[tokio::test]
    async fn test_unknown_ticker_is_not_found() {
        let pool = test_pool().await;
        let err = get_series(&pool, &index(), "ZZZ", Period::OneYear)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_known_ticker_without_bars_is_empty_not_error() {
        let pool = test_pool().await;
        let series = get_series(&pool, &index(), "NEWCO", Period::OneYear)
            .await
            .unwrap();
        assert!(series.is_empty());
    }

    #[tokio::test]
    async fn test_window_is_anchored_at_latest_bar() {
        let pool = test_pool().await;
        // Latest bar 2024-06-15; the 1y window starts 2023-06-15, so the
        // 2023-06-14 bar falls outside it and 2023-06-15 is included.
        insert_ignore_bars(
            &pool,
            "AAPL",
            &[
                bar(d(2023, 6, 14), 95.0),
                bar(d(2023, 6, 15), 96.0),
                bar(d(2024, 1, 10), 100.0),
                bar(d(2024, 6, 15), 110.0),
            ],
        )
        .await
        .unwrap();

        let series = get_series(&pool, &index(), "AAPL", Period::OneYear)
            .await
            .unwrap();
        let dates: Vec<NaiveDate> = series.iter().map(|b| b.date).collect();
        assert_eq!(dates, vec![d(2023, 6, 15), d(2024, 1, 10), d(2024, 6, 15)]);
        assert!(series.windows(2).all(|w| w[0].date < w[1].date));
    }

    #[tokio::test]
    async fn test_ticker_lookup_is_case_insensitive() {
        let pool = test_pool().await;
        insert_ignore_bars(&pool, "AAPL", &[bar(d(2024, 6, 14), 100.0)])
            .await
            .unwrap();

        let series = get_series(&pool, &index(), "aapl", Period::FiveYears)
            .await
            .unwrap();
        assert_eq!(series.len(), 1);
    }

    #[tokio::test]
    async fn test_summary_over_window() {
        let pool = test_pool().await;
        insert_ignore_bars(
            &pool,
            "AAPL",
            &[
                bar(d(2024, 6, 12), 100.0),
                bar(d(2024, 6, 13), 110.0),
                bar(d(2024, 6, 14), 90.0),
            ],
        )
        .await
        .unwrap();

        let s = get_summary(&pool, &index(), "AAPL", Period::OneYear)
            .await
            .unwrap();
        assert_eq!(s.latest_close, 90.0);
        assert_eq!(s.period_high, 110.0);
        assert_eq!(s.period_low, 90.0);
        assert_eq!(s.period_return_pct, Some(-10.0));
    }

    #[tokio::test]
    async fn test_summary_of_empty_series_is_not_found() {
        let pool = test_pool().await;
        let err = get_summary(&pool, &index(), "NEWCO", Period::OneYear)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
