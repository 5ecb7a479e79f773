use chrono::NaiveDate;
use sqlx::SqlitePool;

use crate::external::provider::ExternalBar;
use crate::models::PriceBar;

/// Fetch all bars for a ticker with date >= `start`, oldest first.
pub async fn fetch_range(
    pool: &SqlitePool,
    ticker: &str,
    start: NaiveDate,
) -> Result<Vec<PriceBar>, sqlx::Error> {
    sqlx::query_as::<_, PriceBar>(
        "SELECT date, open, high, low, close, volume
         FROM daily_prices
         WHERE ticker = ?1 AND date >= ?2
         ORDER BY date ASC",
    )
    .bind(ticker)
    .bind(start)
    .fetch_all(pool)
    .await
}

/// Latest bar date for a ticker; None when no bars exist.
pub async fn max_date(pool: &SqlitePool, ticker: &str) -> Result<Option<NaiveDate>, sqlx::Error> {
    sqlx::query_scalar::<_, Option<NaiveDate>>(
        "SELECT MAX(date) FROM daily_prices WHERE ticker = ?1",
    )
    .bind(ticker)
    .fetch_one(pool)
    .await
}

pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM daily_prices")
        .fetch_one(pool)
        .await
}

/// Latest bar date across the whole dataset.
pub async fn latest_date(pool: &SqlitePool) -> Result<Option<NaiveDate>, sqlx::Error> {
    sqlx::query_scalar::<_, Option<NaiveDate>>("SELECT MAX(date) FROM daily_prices")
        .fetch_one(pool)
        .await
}

/// Insert downloaded bars, ignoring (ticker, date) pairs already present.
/// Returns the number of newly inserted rows.
pub async fn insert_ignore_bars(
    pool: &SqlitePool,
    ticker: &str,
    bars: &[ExternalBar],
) -> Result<u64, sqlx::Error> {
    let mut tx = pool.begin().await?;
    let mut inserted = 0u64;

    for bar in bars {
        let result = sqlx::query(
            "INSERT INTO daily_prices (ticker, date, open, high, low, close, volume)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
             ON CONFLICT (ticker, date) DO NOTHING",
        )
        .bind(ticker)
        .bind(bar.date)
        .bind(bar.open)
        .bind(bar.high)
        .bind(bar.low)
        .bind(bar.close)
        .bind(bar.volume)
        .execute(&mut *tx)
        .await?;
        inserted += result.rows_affected();
    }

    tx.commit().await?;
    Ok(inserted)
}
