use chrono::{Months, NaiveDate};

/// Lookback window selector for the price-history endpoints.
///
/// The token set ("1y" | "2y" | "5y") is part of the external contract.
/// A missing query parameter defaults to one year; an unrecognized token is
/// rejected by the handler with a validation error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    OneYear,
    TwoYears,
    FiveYears,
}

impl Default for Period {
    fn default() -> Self {
        Period::OneYear
    }
}

impl Period {
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "1y" => Some(Period::OneYear),
            "2y" => Some(Period::TwoYears),
            "5y" => Some(Period::FiveYears),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Period::OneYear => "1y",
            Period::TwoYears => "2y",
            Period::FiveYears => "5y",
        }
    }

    fn months(&self) -> u32 {
        match self {
            Period::OneYear => 12,
            Period::TwoYears => 24,
            Period::FiveYears => 60,
        }
    }

    /// Inclusive lower bound of the window, measured back from the latest
    /// date available for the ticker.
    ///
    /// Exact calendar subtraction, not a 365-day approximation: chrono clamps
    /// only when the target month is shorter (Feb 29 - 1y = Feb 28).
    pub fn start_from(&self, as_of: NaiveDate) -> NaiveDate {
        as_of - Months::new(self.months())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_parse_valid_tokens() {
        assert_eq!(Period::parse("1y"), Some(Period::OneYear));
        assert_eq!(Period::parse("2y"), Some(Period::TwoYears));
        assert_eq!(Period::parse("5y"), Some(Period::FiveYears));
    }

    #[test]
    fn test_parse_rejects_unknown_tokens() {
        assert_eq!(Period::parse("3y"), None);
        assert_eq!(Period::parse("1Y"), None);
        assert_eq!(Period::parse(""), None);
        assert_eq!(Period::parse("ytd"), None);
    }

    #[test]
    fn test_default_is_one_year() {
        assert_eq!(Period::default(), Period::OneYear);
    }

    #[test]
    fn test_start_is_exact_calendar_subtraction() {
        assert_eq!(
            Period::OneYear.start_from(d(2024, 6, 15)),
            d(2023, 6, 15)
        );
        assert_eq!(
            Period::TwoYears.start_from(d(2024, 6, 15)),
            d(2022, 6, 15)
        );
        assert_eq!(
            Period::FiveYears.start_from(d(2024, 6, 15)),
            d(2019, 6, 15)
        );
    }

    #[test]
    fn test_start_clamps_leap_day() {
        // 2023 has no Feb 29; chrono clamps to the last valid day.
        assert_eq!(
            Period::OneYear.start_from(d(2024, 2, 29)),
            d(2023, 2, 28)
        );
        // Four years back lands on a leap year again.
        assert_eq!(
            Period::FiveYears.start_from(d(2025, 2, 28)),
            d(2020, 2, 28)
        );
    }

    #[test]
    fn test_token_round_trip() {
        for p in [Period::OneYear, Period::TwoYears, Period::FiveYears] {
            assert_eq!(Period::parse(p.as_str()), Some(p));
        }
    }
}
