use serde::Serialize;

use crate::models::PriceBar;

/// Summary statistics over one period's series of bars.
///
/// `period_return_pct` is None (JSON null) when the first close is zero,
/// where the percentage return is undefined.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodSummary {
    pub latest_close: f64,
    pub period_high: f64,
    pub period_low: f64,
    pub period_return_pct: Option<f64>,
}

/// Aggregate an ordered series. Returns None for an empty series; the
/// caller decides how to surface that (the API maps it to a 404).
///
/// High/low are computed over closes, not the intraday high/low fields —
/// those are display-only.
pub fn summarize(bars: &[PriceBar]) -> Option<PeriodSummary> {
    let first = bars.first()?;
    let last = bars.last()?;

    let mut period_high = f64::MIN;
    let mut period_low = f64::MAX;
    for bar in bars {
        period_high = period_high.max(bar.close);
        period_low = period_low.min(bar.close);
    }

    let period_return_pct = if first.close == 0.0 {
        None
    } else {
        Some((last.close - first.close) / first.close * 100.0)
    };

    Some(PeriodSummary {
        latest_close: last.close,
        period_high,
        period_low,
        period_return_pct,
    })
}
