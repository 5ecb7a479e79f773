use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One daily OHLCV bar. Unique per (ticker, date); the ticker itself is
/// implied by the query and not part of the wire shape.
///
/// `close` is always present (ingestion skips bars without one); the other
/// fields may be null in the source data and are carried through for display
/// only — aggregation uses closes exclusively.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: f64,
    pub volume: Option<i64>,
}
