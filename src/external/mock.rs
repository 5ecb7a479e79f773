use async_trait::async_trait;
use chrono::{Datelike, Duration, Utc, Weekday};

use crate::external::provider::{ExternalBar, MarketDataProvider, ProviderError};

/// Random-walk bar generator for offline development, so the full ingest +
/// serve path can be exercised without network access.
pub struct MockProvider;

#[async_trait]
impl MarketDataProvider for MockProvider {
    async fn fetch_daily_history(
        &self,
        _ticker: &str,
        years: u32,
    ) -> Result<Vec<ExternalBar>, ProviderError> {
        let today = Utc::now().date_naive();
        let days = (years.max(1) as i64) * 365;
        let mut close = 100.0_f64;
        let mut bars = Vec::new();

        for offset in (0..=days).rev() {
            let date = today - Duration::days(offset);
            // Weekdays only; holidays are a refinement real data brings anyway.
            if matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
                continue;
            }

            close *= 1.0 + (rand::random::<f64>() - 0.5) * 0.02;
            let spread = close * 0.01;
            bars.push(ExternalBar {
                date,
                open: Some(close - spread / 2.0),
                high: Some(close + spread),
                low: Some(close - spread),
                close,
                volume: Some((rand::random::<f64>() * 5_000_000.0) as i64 + 500_000),
            });
        }

        Ok(bars)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_history_shape() {
        let bars = MockProvider.fetch_daily_history("AAPL", 1).await.unwrap();

        // Roughly a year of weekdays.
        assert!(bars.len() > 240 && bars.len() < 270);
        assert!(bars.windows(2).all(|w| w[0].date < w[1].date));
        assert!(bars.iter().all(|b| b.close > 0.0));
        assert!(bars
            .iter()
            .all(|b| !matches!(b.date.weekday(), Weekday::Sat | Weekday::Sun)));
    }
}
