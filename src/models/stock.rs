use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// S&P 500 constituent. Reference data: loaded once at startup, never
// mutated by the API layer.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Stock {
    pub ticker: String,
    pub name: String,
    pub sector: Option<String>,
    pub industry: Option<String>,
}

/// Trimmed-down shape for the `GET /api/stocks` dropdown listing.
#[derive(Debug, Clone, Serialize)]
pub struct StockListItem {
    pub ticker: String,
    pub name: String,
}

/// Shape returned by `GET /api/stocks/search`.
#[derive(Debug, Clone, Serialize)]
pub struct StockSearchResult {
    pub ticker: String,
    pub name: String,
    pub sector: Option<String>,
}

impl From<&Stock> for StockListItem {
    fn from(s: &Stock) -> Self {
        Self {
            ticker: s.ticker.clone(),
            name: s.name.clone(),
        }
    }
}

impl From<&Stock> for StockSearchResult {
    fn from(s: &Stock) -> Self {
        Self {
            ticker: s.ticker.clone(),
            name: s.name.clone(),
            sector: s.sector.clone(),
        }
    }
}
