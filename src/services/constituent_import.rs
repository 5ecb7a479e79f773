use anyhow::{Context, Result};
use csv::ReaderBuilder;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

use crate::models::Stock;

#[derive(Debug, Deserialize)]
struct ConstituentRow {
    ticker: String,
    name: String,
    #[serde(default)]
    sector: Option<String>,
    #[serde(default)]
    industry: Option<String>,
}

/// Tickers come in index notation (BRK.B); providers want dashes (BRK-B).
fn normalize_ticker(raw: &str) -> String {
    raw.trim().to_uppercase().replace('.', "-")
}

/// Load the constituent list from a CSV file with headers
/// `ticker,name,sector,industry`.
pub fn load_constituents(path: &Path) -> Result<Vec<Stock>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open constituents file: {}", path.display()))?;
    parse_constituents(file)
        .with_context(|| format!("Failed to parse constituents file: {}", path.display()))
}

fn parse_constituents<R: Read>(reader: R) -> Result<Vec<Stock>> {
    let mut csv_reader = ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let mut stocks = Vec::new();
    for (line, record) in csv_reader.deserialize::<ConstituentRow>().enumerate() {
        let row = record.with_context(|| format!("Invalid constituent row {}", line + 1))?;

        let ticker = normalize_ticker(&row.ticker);
        if ticker.is_empty() {
            anyhow::bail!("Empty ticker in constituent row {}", line + 1);
        }

        stocks.push(Stock {
            ticker,
            name: row.name,
            sector: row.sector.filter(|s| !s.is_empty()),
            industry: row.industry.filter(|s| !s.is_empty()),
        });
    }

    Ok(stocks)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_normalizes_tickers() {
        let csv = "ticker,name,sector,industry\n\
                   aapl,Apple Inc.,Information Technology,Consumer Electronics\n\
                   BRK.B,Berkshire Hathaway,Financials,Multi-Sector Holdings\n";
        let stocks = parse_constituents(csv.as_bytes()).unwrap();
        assert_eq!(stocks.len(), 2);
        assert_eq!(stocks[0].ticker, "AAPL");
        assert_eq!(stocks[1].ticker, "BRK-B");
        assert_eq!(
            stocks[1].sector.as_deref(),
            Some("Financials")
        );
    }

    #[test]
    fn test_parse_allows_missing_optional_columns() {
        let csv = "ticker,name,sector,industry\nAAPL,Apple Inc.,,\n";
        let stocks = parse_constituents(csv.as_bytes()).unwrap();
        assert_eq!(stocks[0].sector, None);
        assert_eq!(stocks[0].industry, None);
    }

    #[test]
    fn test_parse_rejects_empty_ticker() {
        let csv = "ticker,name,sector,industry\n,Ghost Corp,,\n";
        assert!(parse_constituents(csv.as_bytes()).is_err());
    }
}
