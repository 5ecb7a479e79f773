use std::collections::HashMap;

use crate::models::Stock;

/// In-memory view of the stocks table, built once at startup and shared
/// read-only across requests. Doubles as the ticker lookup used to separate
/// "unknown ticker" from "no bars in range".
pub struct SearchIndex {
    stocks: Vec<Stock>,
    by_ticker: HashMap<String, usize>,
}

impl SearchIndex {
    pub fn new(mut stocks: Vec<Stock>) -> Self {
        stocks.sort_by(|a, b| a.ticker.cmp(&b.ticker));
        let by_ticker = stocks
            .iter()
            .enumerate()
            .map(|(i, s)| (s.ticker.to_uppercase(), i))
            .collect();
        Self { stocks, by_ticker }
    }

    pub fn len(&self) -> usize {
        self.stocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stocks.is_empty()
    }

    /// All stocks, ordered by ticker.
    pub fn all(&self) -> &[Stock] {
        &self.stocks
    }

    /// Case-insensitive ticker lookup.
    pub fn get(&self, ticker: &str) -> Option<&Stock> {
        self.by_ticker
            .get(&ticker.trim().to_uppercase())
            .map(|&i| &self.stocks[i])
    }

    /// Rank stocks against a free-text query.
    ///
    /// Empty (or all-whitespace) queries return nothing rather than the full
    /// list, so the first keystroke of an autocomplete box stays cheap.
    /// Ordering is deterministic: exact ticker, ticker prefix, ticker
    /// substring, then name substring, ties broken by ticker.
    pub fn search(&self, query: &str, limit: usize) -> Vec<&Stock> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Vec::new();
        }

        let q_upper = trimmed.to_uppercase();
        let q_lower = trimmed.to_lowercase();

        let mut matches: Vec<(u8, &Stock)> = self
            .stocks
            .iter()
            .filter_map(|s| {
                let ticker = s.ticker.to_uppercase();
                let rank = if ticker == q_upper {
                    0
                } else if ticker.starts_with(&q_upper) {
                    1
                } else if ticker.contains(&q_upper) {
                    2
                } else if s.name.to_lowercase().contains(&q_lower) {
                    3
                } else {
                    return None;
                };
                Some((rank, s))
            })
            .collect();

        // Stable sort: within a rank the ticker ordering of `stocks` holds.
        matches.sort_by_key(|(rank, _)| *rank);
        matches.truncate(limit);
        matches.into_iter().map(|(_, s)| s).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stock(ticker: &str, name: &str) -> Stock {
        Stock {
            ticker: ticker.to_string(),
            name: name.to_string(),
            sector: None,
            industry: None,
        }
    }

    fn index() -> SearchIndex {
        SearchIndex::new(vec![
            stock("MSFT", "Microsoft Corporation"),
            stock("AAPL", "Apple Inc."),
            stock("GOOGL", "Alphabet Inc. (Class A)"),
            stock("AMZN", "Amazon.com"),
            stock("CAT", "Caterpillar"),
            stock("APA", "APA Corporation"),
        ])
    }

    #[test]
    fn test_all_is_sorted_by_ticker() {
        let idx = index();
        let tickers: Vec<&str> = idx.all().iter().map(|s| s.ticker.as_str()).collect();
        assert_eq!(tickers, vec!["AAPL", "AMZN", "APA", "CAT", "GOOGL", "MSFT"]);
    }

    #[test]
    fn test_get_is_case_insensitive() {
        let idx = index();
        assert_eq!(idx.get("aapl").unwrap().name, "Apple Inc.");
        assert_eq!(idx.get(" AAPL ").unwrap().name, "Apple Inc.");
        assert!(idx.get("ZZZ").is_none());
    }

    #[test]
    fn test_exact_ticker_is_top_match() {
        let idx = index();
        let results = idx.search("AAPL", 20);
        assert_eq!(results[0].ticker, "AAPL");
    }

    #[test]
    fn test_empty_query_returns_nothing() {
        let idx = index();
        assert!(idx.search("", 20).is_empty());
        assert!(idx.search("   ", 20).is_empty());
    }

    #[test]
    fn test_ticker_matches_rank_before_name_matches() {
        let idx = index();
        // "CAT" is an exact ticker; "Caterpillar" would also match by name.
        let results = idx.search("cat", 20);
        assert_eq!(results[0].ticker, "CAT");

        // "A" prefix-matches AAPL/AMZN/APA before any name containing "a".
        let results = idx.search("A", 20);
        let tickers: Vec<&str> = results.iter().map(|s| s.ticker.as_str()).collect();
        assert_eq!(tickers, vec!["AAPL", "AMZN", "APA", "CAT", "GOOGL", "MSFT"]);
    }

    #[test]
    fn test_name_substring_matches() {
        let idx = index();
        let results = idx.search("alphabet", 20);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].ticker, "GOOGL");
    }

    #[test]
    fn test_limit_caps_results() {
        let idx = index();
        let results = idx.search("a", 2);
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn test_search_is_deterministic() {
        let idx = index();
        let first: Vec<String> = idx.search("a", 20).iter().map(|s| s.ticker.clone()).collect();
        let second: Vec<String> = idx.search("a", 20).iter().map(|s| s.ticker.clone()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_no_match_is_empty_not_error() {
        let idx = index();
        assert!(idx.search("zzzz", 20).is_empty());
    }
}
